use crate::{escape, unescape, WireError, SEPARATOR};

/// A wire row meant for reading, slot by slot.
///
/// Every read consumes one comma delimited slot. A row of `n` slots has
/// `n - 1` separators, so after the last slot has been read the cursor
/// sits one past the end of the text and [`DataBuffer::is_exhausted`]
/// turns true.
///
/// ```
/// let mut bb = easy_converter_wire::DataBuffer::new("3,1,2,3");
/// assert_eq!(bb.read_count(), Ok(3));
/// assert_eq!(bb.read_int(), Ok(1));
/// ```
pub struct DataBuffer<'a> {
    data:  &'a str,
    index: usize,
}

impl<'a> DataBuffer<'a> {
    pub fn new(data: &'a str) -> DataBuffer<'a> {
        DataBuffer { data, index: 0 }
    }

    /// Retrieves the underlying row text.
    pub fn data(&self) -> &'a str {
        self.data
    }

    /// Byte offset of the next slot.
    pub fn index(&self) -> usize {
        self.index
    }

    /// True once every slot of the row has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.index > self.data.len()
    }

    /// Reads the next slot verbatim, without reversing any sentinel.
    pub fn read_raw(&mut self) -> Result<&'a str, WireError> {
        if self.is_exhausted() {
            return Err(WireError::Underrun { index: self.index });
        }
        let rest = &self.data[self.index..];
        let len = rest.find(SEPARATOR).unwrap_or(rest.len());
        let slot = &rest[..len];
        self.index += len + 1;
        Ok(slot)
    }

    pub fn read_int(&mut self) -> Result<i32, WireError> {
        self.read_number("int")
    }

    pub fn read_long(&mut self) -> Result<i64, WireError> {
        self.read_number("long")
    }

    pub fn read_float(&mut self) -> Result<f32, WireError> {
        self.read_number("float")
    }

    pub fn read_double(&mut self) -> Result<f64, WireError> {
        self.read_number("double")
    }

    /// Anything other than a case-insensitive `true` reads as false.
    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.read_raw()?.eq_ignore_ascii_case("true"))
    }

    /// Reads a text slot and reverses both sentinels.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        Ok(unescape(self.read_raw()?))
    }

    /// Reads the length prefix written in front of a list or map payload.
    pub fn read_count(&mut self) -> Result<usize, WireError> {
        let index = self.index;
        let count: i64 = self.read_number("count")?;
        usize::try_from(count).map_err(|_| WireError::NegativeCount { count, index })
    }

    fn read_number<T: std::str::FromStr>(&mut self, kind: &'static str) -> Result<T, WireError> {
        let index = self.index;
        let text = self.read_raw()?;
        text.trim().parse::<T>().map_err(|_| WireError::InvalidNumber {
            kind,
            text: text.to_string(),
            index,
        })
    }
}

/// A wire row meant for writing. Separators are inserted between slots
/// automatically.
#[derive(Debug, Default, Clone)]
pub struct DataBufferMut {
    data:  String,
    slots: usize,
}

impl DataBufferMut {
    pub fn new() -> DataBufferMut {
        DataBufferMut::default()
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Number of slots written so far.
    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn into_string(self) -> String {
        self.data
    }

    /// Appends one slot. The text must already be escaped; any bare comma
    /// in it becomes a structural separator.
    pub fn write_raw(&mut self, text: &str) {
        if self.slots > 0 {
            self.data.push(SEPARATOR);
        }
        self.data.push_str(text);
        self.slots += 1;
    }

    /// Escapes and appends one text slot.
    pub fn write_text(&mut self, text: &str) {
        self.write_raw(&escape(text));
    }

    pub fn write_count(&mut self, count: usize) {
        self.write_raw(&count.to_string());
    }

    pub fn write_int(&mut self, value: i64) {
        self.write_raw(&value.to_string());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_raw(if value { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_slots_in_order() {
        let mut bb = DataBuffer::new("12,-7,1.5,TRUE,text");
        assert_eq!(bb.read_int(), Ok(12));
        assert_eq!(bb.read_long(), Ok(-7));
        assert_eq!(bb.read_float(), Ok(1.5));
        assert_eq!(bb.read_bool(), Ok(true));
        assert_eq!(bb.read_string(), Ok("text".to_string()));
        assert!(bb.is_exhausted());
        assert_eq!(bb.read_raw(), Err(WireError::Underrun { index: 20 }));
    }

    #[test]
    fn read_empty_slots() {
        let mut bb = DataBuffer::new(",");
        assert_eq!(bb.read_raw(), Ok(""));
        assert!(!bb.is_exhausted());
        assert_eq!(bb.read_raw(), Ok(""));
        assert!(bb.is_exhausted());

        let mut empty = DataBuffer::new("");
        assert_eq!(empty.read_string(), Ok(String::new()));
        assert!(empty.is_exhausted());
    }

    #[test]
    fn read_invalid_number() {
        let mut bb = DataBuffer::new("1,abc");
        assert_eq!(bb.index(), 0);
        bb.read_int().unwrap();
        assert_eq!(
            bb.read_int(),
            Err(WireError::InvalidNumber { kind: "int", text: "abc".into(), index: 2 })
        );
    }

    #[test]
    fn read_negative_count() {
        let mut bb = DataBuffer::new("-1");
        assert_eq!(bb.read_count(), Err(WireError::NegativeCount { count: -1, index: 0 }));
    }

    #[test]
    fn write_separates_slots() {
        let mut out = DataBufferMut::new();
        out.write_count(0);
        assert_eq!(out.data(), "0");
        out.write_raw("");
        out.write_int(-3);
        out.write_bool(false);
        out.write_text("x\ny");
        assert_eq!(out.slots(), 5);
        assert_eq!(out.into_string(), "0,,-3,false,x;l/~y");
    }

    #[test]
    fn write_then_read_sequence() {
        let mut out = DataBufferMut::new();
        out.write_count(2);
        out.write_text("a\\,b");
        out.write_text("multi\nline");
        out.write_bool(true);

        let mut bb = DataBuffer::new(out.data());
        assert_eq!(bb.read_count(), Ok(2));
        assert_eq!(bb.read_string(), Ok("a,b".to_string()));
        assert_eq!(bb.read_string(), Ok("multi\nline".to_string()));
        assert_eq!(bb.read_bool(), Ok(true));
        assert!(bb.is_exhausted());
    }
}
