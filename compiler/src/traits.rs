use std::collections::BTreeMap;
use easy_converter_wire::DataBuffer;
use crate::error::ConvertError;

/// Types that read themselves from a wire row, the way generated model
/// classes are constructed from a `DataBuffer`.
pub trait FromWire: Sized {
    fn from_wire(bb: &mut DataBuffer) -> Result<Self, ConvertError>;
}

macro_rules! primitive_from_wire {
    ($($ty:ty => $read:ident),* $(,)?) => {
        $(
            impl FromWire for $ty {
                fn from_wire(bb: &mut DataBuffer) -> Result<Self, ConvertError> {
                    Ok(bb.$read()?)
                }
            }
        )*
    };
}

primitive_from_wire! {
    i32    => read_int,
    i64    => read_long,
    f32    => read_float,
    f64    => read_double,
    bool   => read_bool,
    String => read_string,
}

impl<T: FromWire> FromWire for Vec<T> {
    fn from_wire(bb: &mut DataBuffer) -> Result<Self, ConvertError> {
        let count = bb.read_count()?;
        (0..count).map(|_| T::from_wire(bb)).collect()
    }
}

impl<K: FromWire + Ord, V: FromWire> FromWire for BTreeMap<K, V> {
    fn from_wire(bb: &mut DataBuffer) -> Result<Self, ConvertError> {
        let count = bb.read_count()?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = K::from_wire(bb)?;
            let value = V::from_wire(bb)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// Reads every line of a packed table as one `T`.
pub fn read_table<T: FromWire>(packed: &str) -> Result<Vec<T>, ConvertError> {
    if packed.is_empty() {
        return Ok(Vec::new());
    }
    packed
        .split('\n')
        .map(|line| {
            let mut bb = DataBuffer::new(line.trim_end_matches('\r'));
            T::from_wire(&mut bb)
        })
        .collect()
}
