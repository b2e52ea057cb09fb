//! Error types for the core crate.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown interface: {0}")]
    UnknownInterface(String),

    #[error("Unknown value '{symbol}' for enumeration {enumeration}")]
    UnknownEnumSymbol { enumeration: String, symbol: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
