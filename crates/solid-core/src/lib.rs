//! Solid core types.
//!
//! This crate defines the vocabulary shared by the predicate engine and the
//! device layer:
//!
//! - **Interface types**: the capability tags a device can expose
//! - **Values**: typed generic property values
//! - **Schema**: enumeration metadata for the standard interfaces
//! - **Device traits**: the read-only surface predicates are matched against
//!
//! ## Example
//!
//! ```rust
//! use solid_core::{schema, InterfaceType, Value};
//!
//! let ty: InterfaceType = "OpticalDrive".parse().unwrap();
//! let media = schema::enumeration(ty, "supportedMedia").unwrap();
//! assert_eq!(media.resolve("Dvdr|Dvdrw"), Some(0x18));
//! assert!(Value::UInt(0x18).loosely_equals(&Value::Int(0x18)));
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod interface;
pub mod schema;
pub mod value;

pub use device::{Device, DeviceInterface};
pub use error::{CoreError, Result};
pub use interface::InterfaceType;
pub use schema::EnumMeta;
pub use value::Value;
