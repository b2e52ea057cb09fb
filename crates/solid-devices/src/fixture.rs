//! JSON device fixtures.
//!
//! ```json
//! {
//!   "devices": [
//!     {
//!       "udi": "/org/kde/solid/fakehw/volume_uuid_feedface",
//!       "parent": "/org/kde/solid/fakehw/storage_model_solid_internal_hd",
//!       "vendor": "Acme",
//!       "product": "Root Volume",
//!       "interfaces": {
//!         "StorageVolume": { "fsType": "ext4", "usage": "FileSystem", "ignored": false }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! Strings given for enumerated properties are stored as their integer value;
//! flag sets accept `A|B`. Anything that cannot be represented is rejected.

use std::collections::BTreeMap;

use serde::Deserialize;
use solid_core::{schema, InterfaceType, Value};

use crate::device::{DeviceRecord, InterfaceData};
use crate::error::{DeviceError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    devices: Vec<FixtureDevice>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureDevice {
    udi: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    vendor: String,
    #[serde(default)]
    product: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    interfaces: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

/// Parse a fixture document into device records, in document order.
pub fn parse_devices(json: &str) -> Result<Vec<DeviceRecord>> {
    let file: FixtureFile = serde_json::from_str(json)?;
    file.devices.into_iter().map(into_record).collect()
}

fn into_record(device: FixtureDevice) -> Result<DeviceRecord> {
    // Solid falls back to the product name.
    let description = device
        .description
        .unwrap_or_else(|| device.product.clone());

    let mut record = DeviceRecord::new(device.udi)
        .with_vendor(device.vendor)
        .with_product(device.product)
        .with_description(description)
        .with_icon(device.icon);
    if let Some(parent) = device.parent {
        record = record.with_parent(parent);
    }

    for (name, properties) in device.interfaces {
        let ty: InterfaceType = name.parse()?;
        let mut data = InterfaceData::new(ty);
        for (property, raw) in properties {
            let value = convert_value(ty, &property, raw)?;
            data.set_property(property, value);
        }
        record = record.with_interface(data);
    }

    Ok(record)
}

/// Convert one JSON property value for `ty.property`.
pub fn convert_value(ty: InterfaceType, property: &str, raw: serde_json::Value) -> Result<Value> {
    let invalid = |reason: String| DeviceError::InvalidProperty {
        interface: ty,
        property: property.to_string(),
        reason,
    };

    match raw {
        serde_json::Value::Bool(v) => Ok(Value::Bool(v)),
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(integer_value(v))
            } else if let Some(v) = n.as_u64() {
                Ok(Value::UInt64(v))
            } else if let Some(v) = n.as_f64() {
                Ok(Value::Double(v))
            } else {
                Err(invalid(format!("unsupported number {}", n)))
            }
        }
        serde_json::Value::String(s) => match schema::enumeration(ty, property) {
            Some(meta) => Ok(integer_value(meta.try_resolve(&s)?)),
            None => Ok(Value::String(s)),
        },
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => Ok(s),
                other => Err(invalid(format!("list item {} is not a string", other))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::StringList),
        serde_json::Value::Null => Err(invalid("null is not a value".to_string())),
        serde_json::Value::Object(_) => Err(invalid("objects are not supported".to_string())),
    }
}

fn integer_value(v: i64) -> Value {
    match i32::try_from(v) {
        Ok(small) => Value::Int(small),
        Err(_) => Value::Int64(v),
    }
}
