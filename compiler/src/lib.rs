//! easy-converter-compiler
//!
//! This crate implements:
//!  1) A tokenizer + recursive-descent parser for column type definitions
//!     (`List<int>`, `Map<string,Struct<int,id,int,count>>`, `@Items,SReward`, ...),
//!  2) Naming helpers for anonymous structs, enums and list elements,
//!  3) The scheme builder and eager duplicate-name checks,
//!  4) The two-pass reference resolver over a whole set of tables,
//!  5) The cell/row encoder into the escaped, length-prefixed wire format,
//!     and a scheme-driven decoder for reading rows back,
//!  6) Error types (`ConvertError`) and the `FromWire` trait.

pub mod error;
pub mod types;
pub mod utils;
pub mod tokenizer;
pub mod naming;
pub mod parser;
pub mod verifier;
pub mod scheme;
pub mod resolver;
pub mod encoder;
pub mod decoder;
pub mod compiler;
pub mod traits;

pub use compiler::{convert_tables, encode_rows, ConvertOptions, RawTable};
pub use decoder::{decode_row, decode_table};
pub use encoder::{encode, encode_cell, encode_row};
pub use error::ConvertError;
pub use parser::{parse_definition, parse_field};
pub use resolver::{resolve_references, ReferenceIndex, Resolution};
pub use scheme::build_scheme;
pub use types::{CellValue, Field, FieldKind, RowData, Scheme, Table};
