//! easy-converter
//!
//! Runtime-facing surface for converted tables.
//!
//! - `FromWire` trait and `read_table` (re-exported from compiler)
//! - Scheme and decoded rows as JSON for the emitters

use serde::Serialize;

pub use easy_converter_compiler::{
    convert_tables, ConvertError, ConvertOptions, CellValue, RawTable, Scheme, Table,
};
pub use easy_converter_compiler::traits::{read_table, FromWire};
pub use easy_converter_wire::{DataBuffer, DataBufferMut, Value};

/// Pretty-printed JSON of a resolved scheme, the hand-off to the model
/// emitters.
pub fn scheme_to_json(scheme: &Scheme) -> Result<String, ConvertError> {
    Ok(serde_json::to_string_pretty(scheme)?)
}

#[derive(Serialize)]
struct DecodedTable<'a> {
    table: &'a str,
    rows:  Vec<Vec<Value>>,
}

/// Decodes a packed table with its scheme into a pretty-printed JSON string.
pub fn decode_to_json(scheme: &Scheme, packed: &str) -> Result<String, ConvertError> {
    let rows = easy_converter_compiler::decode_table(scheme, packed)?;
    let decoded = DecodedTable { table: &scheme.table, rows };
    Ok(serde_json::to_string_pretty(&decoded)?)
}

pub mod traits {
    pub use easy_converter_compiler::traits::{read_table, FromWire};
}

pub mod error {
    pub use easy_converter_compiler::error::ConvertError;
}

pub mod wire {
    pub use easy_converter_wire::{escape, unescape, DataBuffer, DataBufferMut, Value};
}
