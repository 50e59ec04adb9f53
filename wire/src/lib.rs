//! Text wire format shared by the Easy Converter compiler and the readers it
//! feeds.
//!
//! A wire row is a flat list of comma separated slots. Primitive text is
//! escaped so that a bare `,` is always structural; lists and maps carry a
//! count slot in front of their payload; structs are a fixed run of slots.
//!
//! ```
//! use easy_converter_wire::*;
//!
//! let mut out = DataBufferMut::new();
//! out.write_count(2);
//! out.write_text("a\\,b");
//! out.write_text("line\nbreak");
//! assert_eq!(out.data(), "2,a:l/~b,line;l/~break");
//!
//! let mut bb = DataBuffer::new(out.data());
//! assert_eq!(bb.read_count(), Ok(2));
//! assert_eq!(bb.read_string(), Ok("a,b".to_string()));
//! assert_eq!(bb.read_string(), Ok("line\nbreak".to_string()));
//! assert!(bb.is_exhausted());
//! ```

pub mod buffer;
pub mod error;
pub mod value;

pub use buffer::*;
pub use error::WireError;
pub use value::*;

/// Stands in for a literal newline inside a cell.
pub const SENTINEL_NEWLINE: &str = ";l/~";
/// Stands in for an author-escaped comma (`\,`) inside a cell.
pub const SENTINEL_COMMA: &str = ":l/~";
/// Slot separator, both inside a row and inside nested collections.
pub const SEPARATOR: char = ',';

/// Applies the two sentinel substitutions. Idempotent, since neither
/// sentinel contains a newline or a `\,` sequence.
pub fn escape(text: &str) -> String {
    text.replace('\n', SENTINEL_NEWLINE)
        .replace("\\,", SENTINEL_COMMA)
}

/// Reverses [`escape`] the way generated readers do: the comma sentinel
/// becomes a plain `,`, dropping the author's backslash.
pub fn unescape(text: &str) -> String {
    text.replace(SENTINEL_NEWLINE, "\n")
        .replace(SENTINEL_COMMA, ",")
}
