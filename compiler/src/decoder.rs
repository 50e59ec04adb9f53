//! Reads wire rows back the way generated readers do, driven by a resolved
//! scheme instead of generated code.

use easy_converter_wire::{DataBuffer, Value};
use crate::{
    encoder::unresolved,
    error::ConvertError,
    types::{Field, FieldKind, PrimitiveKind, ResolvedType, Scheme, StructDef},
};

pub fn decode_row(scheme: &Scheme, row: &str) -> Result<Vec<Value>, ConvertError> {
    let mut bb = DataBuffer::new(row);
    let mut values = Vec::with_capacity(scheme.fields.len());
    for field in &scheme.fields {
        let value = decode_field(field, &mut bb).map_err(|e| e.in_field(&field.table, &field.name))?;
        values.push(value);
    }
    if !bb.is_exhausted() {
        return Err(ConvertError::Decode(format!(
            "Trailing data after the last field of {} at index {}",
            scheme.table,
            bb.index()
        )));
    }
    Ok(values)
}

/// Decodes a packed table: one wire row per line.
pub fn decode_table(scheme: &Scheme, packed: &str) -> Result<Vec<Vec<Value>>, ConvertError> {
    if packed.is_empty() {
        return Ok(Vec::new());
    }
    packed
        .split('\n')
        .map(|line| decode_row(scheme, line.trim_end_matches('\r')))
        .collect()
}

pub fn decode_field(field: &Field, bb: &mut DataBuffer) -> Result<Value, ConvertError> {
    let value = match &field.kind {
        FieldKind::Primitive(kind) => match kind {
            PrimitiveKind::Int    => Value::Int(bb.read_int()?),
            PrimitiveKind::Long   => Value::Long(bb.read_long()?),
            PrimitiveKind::Float  => Value::Float(bb.read_float()?),
            PrimitiveKind::Bool   => Value::Bool(bb.read_bool()?),
            PrimitiveKind::String => Value::String(bb.read_string()?),
        },
        FieldKind::List(element) => {
            let count = bb.read_count()?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(decode_field(element, bb)?);
            }
            Value::List(items)
        }
        FieldKind::Dictionary { key, value } => {
            let count = bb.read_count()?;
            let mut pairs = Vec::with_capacity(count);
            for _ in 0..count {
                let k = decode_field(key, bb)?;
                let v = decode_field(value, bb)?;
                pairs.push((k, v));
            }
            Value::Map(pairs)
        }
        FieldKind::Struct(def) => decode_struct(def, bb)?,
        FieldKind::Enum(_) => Value::Enum(bb.read_long()?),
        FieldKind::Reference(reference) => match reference.target() {
            Some(ResolvedType::Struct(def)) => decode_struct(&def, bb)?,
            Some(ResolvedType::Enum(_)) => Value::Enum(bb.read_long()?),
            None => return Err(unresolved(field, reference)),
        },
    };
    Ok(value)
}

fn decode_struct(def: &StructDef, bb: &mut DataBuffer) -> Result<Value, ConvertError> {
    let mut fields = Vec::with_capacity(def.fields.len());
    for field in &def.fields {
        fields.push((field.name.clone(), decode_field(field, bb)?));
    }
    Ok(Value::Struct(fields))
}
