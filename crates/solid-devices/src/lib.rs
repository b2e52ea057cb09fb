//! Solid Devices Crate
//!
//! An in-memory device layer: device records with typed per-interface
//! properties, loaded from JSON fixtures and queried with predicates.
//!
//! ## Example
//!
//! ```rust
//! use solid_devices::DeviceRegistry;
//!
//! let registry = DeviceRegistry::from_json_str(r#"{
//!     "devices": [
//!         { "udi": "/fake/bat0", "interfaces": { "Battery": { "type": "PrimaryBattery" } } },
//!         { "udi": "/fake/ac", "interfaces": { "AcAdapter": { "isPlugged": true } } }
//!     ]
//! }"#)?;
//!
//! let found = registry.list_from_query_str("Battery.type == 'PrimaryBattery'", None);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].udi, "/fake/bat0");
//! # Ok::<(), solid_devices::DeviceError>(())
//! ```

pub mod device;
pub mod error;
pub mod fixture;
pub mod registry;

pub use device::{DeviceRecord, InterfaceData};
pub use error::{DeviceError, Result};
pub use registry::DeviceRegistry;
