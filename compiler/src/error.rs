use easy_converter_wire::WireError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unrecognized token {text:?} at column {column}")]
    Lex { text: String, column: usize },

    #[error("Parse error at token {position}: {msg}")]
    Parse { msg: String, position: usize },

    #[error("Duplicate {kind} {name} in {owner}")]
    DuplicateName {
        kind:  &'static str,
        owner: String,
        name:  String,
    },

    #[error("Reference not found: {target_table},{target_type} in {table},{field}")]
    UnresolvedReference {
        table:        String,
        field:        String,
        target_table: String,
        target_type:  String,
    },

    #[error("Invalid enum key {key:?} for {table},{field}")]
    UnknownEnumKey {
        table: String,
        field: String,
        key:   String,
    },

    #[error("Struct {type_name} contains itself through {table},{field}")]
    RecursiveStruct {
        table:     String,
        field:     String,
        type_name: String,
    },

    #[error("Header rows of {table} differ in length: {names} names, {defs} definitions")]
    HeaderMismatch {
        table: String,
        names: usize,
        defs:  usize,
    },

    #[error("Malformed cell {raw:?} for {table},{field}: {msg}")]
    MalformedCell {
        table: String,
        field: String,
        raw:   String,
        msg:   String,
    },

    #[error("In {table},{field}: {source}")]
    InField {
        table:  String,
        field:  String,
        #[source]
        source: Box<ConvertError>,
    },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ConvertError {
    /// Tags an error with the column it came from, unless it already
    /// carries that context.
    pub fn in_field(self, table: &str, field: &str) -> ConvertError {
        match self {
            e @ ConvertError::InField { .. }
            | e @ ConvertError::UnresolvedReference { .. }
            | e @ ConvertError::UnknownEnumKey { .. }
            | e @ ConvertError::MalformedCell { .. }
            | e @ ConvertError::RecursiveStruct { .. } => e,
            e => ConvertError::InField {
                table:  table.to_string(),
                field:  field.to_string(),
                source: Box::new(e),
            },
        }
    }

    /// The innermost error, with any `InField` context peeled off.
    pub fn root(&self) -> &ConvertError {
        match self {
            ConvertError::InField { source, .. } => source.root(),
            e => e,
        }
    }
}

impl From<WireError> for ConvertError {
    fn from(e: WireError) -> Self {
        ConvertError::Decode(e.to_string())
    }
}
