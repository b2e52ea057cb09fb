//! Device Registry - device records keyed by UDI
//!
//! The registry answers the listing queries callers use to find devices:
//! by interface type, or by predicate. Records are shared as `Arc`s so
//! queries never hold the lock while matching.
//!
//! ```rust,no_run
//! use solid_devices::DeviceRegistry;
//!
//! let registry = DeviceRegistry::load_file("fixtures/fakecomputer.json")?;
//! for device in registry.list_from_query_str("IS StorageVolume", None) {
//!     println!("{}", device.udi);
//! }
//! # Ok::<(), solid_devices::DeviceError>(())
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use solid_core::{Device, InterfaceType};
use solid_predicate::Predicate;

use crate::device::DeviceRecord;
use crate::error::{DeviceError, Result};
use crate::fixture;

/// Thread-safe set of devices.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: RwLock<BTreeMap<String, Arc<DeviceRecord>>>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a JSON fixture document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let registry = Self::new();
        for record in fixture::parse_devices(json)? {
            registry.insert(record)?;
        }
        tracing::debug!(devices = registry.len(), "Loaded device fixture");
        Ok(registry)
    }

    /// Build a registry from a JSON fixture file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Reading device fixture");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Register a device. UDIs must be non-empty and unique.
    pub fn insert(&self, record: DeviceRecord) -> Result<()> {
        if record.udi.is_empty() {
            return Err(DeviceError::InvalidParameter(
                "udi cannot be empty".into(),
            ));
        }

        let mut devices = self.devices.write();
        if devices.contains_key(&record.udi) {
            return Err(DeviceError::AlreadyExists(record.udi));
        }
        tracing::trace!(udi = %record.udi, "Registered device");
        devices.insert(record.udi.clone(), Arc::new(record));
        Ok(())
    }

    pub fn remove(&self, udi: &str) -> Option<Arc<DeviceRecord>> {
        self.devices.write().remove(udi)
    }

    pub fn get(&self, udi: &str) -> Option<Arc<DeviceRecord>> {
        self.devices.read().get(udi).cloned()
    }

    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }

    /// Every device, in UDI order.
    pub fn all_devices(&self) -> Vec<Arc<DeviceRecord>> {
        self.devices.read().values().cloned().collect()
    }

    /// Devices exposing `ty`, optionally restricted to direct children of
    /// `parent_udi`.
    pub fn list_from_type(
        &self,
        ty: InterfaceType,
        parent_udi: Option<&str>,
    ) -> Vec<Arc<DeviceRecord>> {
        let devices = self.candidates(parent_udi, |device| device.has_interface(ty));
        tracing::debug!(interface = %ty, found = devices.len(), "Listed devices by type");
        devices
    }

    /// Devices matching `predicate`, optionally restricted to direct children
    /// of `parent_udi`. An invalid predicate matches nothing.
    pub fn list_from_query(
        &self,
        predicate: &Predicate,
        parent_udi: Option<&str>,
    ) -> Vec<Arc<DeviceRecord>> {
        if !predicate.is_valid() {
            tracing::debug!("Invalid predicate, returning no devices");
            return Vec::new();
        }

        let used = predicate.used_types();
        let candidates = self.candidates(parent_udi, |device| {
            used.iter().any(|ty| device.has_interface(*ty))
        });

        let matched: Vec<_> = candidates
            .into_iter()
            .filter(|device| {
                let hit = predicate.matches(device.as_ref());
                tracing::trace!(udi = %device.udi, matched = hit, "Evaluated predicate");
                hit
            })
            .collect();

        tracing::debug!(
            predicate = %predicate,
            found = matched.len(),
            "Listed devices by query"
        );
        matched
    }

    /// Parse `text` and list matching devices. Unparsable text matches nothing.
    pub fn list_from_query_str(
        &self,
        text: &str,
        parent_udi: Option<&str>,
    ) -> Vec<Arc<DeviceRecord>> {
        self.list_from_query(&Predicate::from_string(text), parent_udi)
    }

    fn candidates(
        &self,
        parent_udi: Option<&str>,
        filter: impl Fn(&DeviceRecord) -> bool,
    ) -> Vec<Arc<DeviceRecord>> {
        let devices = self.devices.read();
        devices
            .values()
            .filter(|device| parent_udi.map_or(true, |parent| device.is_child_of(parent)))
            .filter(|device| filter(device))
            .cloned()
            .collect()
    }
}
