use std::fmt;

/// A CSS color that failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorError {
    pub message: String,
    /// 1-based column in the input where the problem was found.
    pub col: usize,
}

impl ColorError {
    pub(crate) fn new(msg: impl Into<String>, col: usize) -> Self {
        Self { message: msg.into(), col }
    }
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color at column {}: {}", self.col, self.message)
    }
}

impl std::error::Error for ColorError {}
