use crate::error::ConvertError;

/// Wraps text in double quotes with JSON escaping, for error messages.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn error(msg: &str, position: usize) -> ConvertError {
    ConvertError::Parse {
        msg: msg.to_string(),
        position,
    }
}
