//! Error types for the device layer.

use solid_core::{CoreError, InterfaceType};

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Device already registered under this UDI
    #[error("Device already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Property value that cannot be represented
    #[error("Invalid value for {interface}.{property}: {reason}")]
    InvalidProperty {
        interface: InterfaceType,
        property: String,
        reason: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for device operations
pub type Result<T> = std::result::Result<T, DeviceError>;
