use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("Read past the end of the buffer at index {index}")]
    Underrun { index: usize },

    #[error("Invalid {kind} \"{text}\" at index {index}")]
    InvalidNumber {
        kind:  &'static str,
        text:  String,
        index: usize,
    },

    #[error("Negative count {count} at index {index}")]
    NegativeCount { count: i64, index: usize },
}
