//! Error types for predicate parsing.
//!
//! Offsets are byte positions into the parsed text.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    #[error("Unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("Invalid number '{literal}' at offset {offset}")]
    InvalidNumber { literal: String, offset: usize },

    #[error("Expected {expected} at offset {offset}, found {found}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        offset: usize,
    },

    #[error("Expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str },

    #[error("Unknown interface '{name}' at offset {offset}")]
    UnknownInterface { name: String, offset: usize },

    #[error("Brackets nested deeper than {limit} at offset {offset}")]
    NestingTooDeep { limit: usize, offset: usize },
}

impl ParseError {
    /// Byte offset of the error, when it points into the input.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedCharacter { offset, .. }
            | Self::UnterminatedString { offset }
            | Self::InvalidNumber { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::UnknownInterface { offset, .. }
            | Self::NestingTooDeep { offset, .. } => Some(*offset),
            Self::UnexpectedEnd { .. } => None,
        }
    }
}

/// Result type for parse operations
pub type Result<T> = std::result::Result<T, ParseError>;
