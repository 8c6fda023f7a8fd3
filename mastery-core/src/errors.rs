use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("form incomplete: {0}")]
    FormIncomplete(&'static str),
    #[error("index {index} out of range for {len} item(s)")]
    InvalidIndex { index: usize, len: usize },
    #[error("a deck must keep at least one topic")]
    LastTopic,
    #[error("cannot study a topic without cards")]
    EmptySession,
    #[error("storage error: {0}")]
    Storage(String),
}
