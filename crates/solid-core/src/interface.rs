//! Device interface type tags.
//!
//! Every capability a device can expose is identified by an [`InterfaceType`].
//! The textual names used here are the public identifiers that appear in
//! predicate text (`IS StorageVolume`) and in device fixtures, so
//! [`InterfaceType::name`] and [`InterfaceType::from_name`] must stay exact
//! inverses of each other.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A device capability category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InterfaceType {
    GenericInterface,
    Processor,
    Block,
    StorageAccess,
    StorageDrive,
    OpticalDrive,
    StorageVolume,
    OpticalDisc,
    Camera,
    PortableMediaPlayer,
    NetworkInterface,
    AcAdapter,
    Battery,
    Button,
    AudioInterface,
    DvbInterface,
    Video,
    SerialInterface,
    SmartCardReader,
    InternetGateway,
    NetworkShare,
}

static BY_NAME: Lazy<HashMap<&'static str, InterfaceType>> = Lazy::new(|| {
    InterfaceType::ALL
        .iter()
        .map(|ty| (ty.name(), *ty))
        .collect()
});

impl InterfaceType {
    /// Every known interface type, in declaration order.
    pub const ALL: [InterfaceType; 21] = [
        Self::GenericInterface,
        Self::Processor,
        Self::Block,
        Self::StorageAccess,
        Self::StorageDrive,
        Self::OpticalDrive,
        Self::StorageVolume,
        Self::OpticalDisc,
        Self::Camera,
        Self::PortableMediaPlayer,
        Self::NetworkInterface,
        Self::AcAdapter,
        Self::Battery,
        Self::Button,
        Self::AudioInterface,
        Self::DvbInterface,
        Self::Video,
        Self::SerialInterface,
        Self::SmartCardReader,
        Self::InternetGateway,
        Self::NetworkShare,
    ];

    /// Public identifier of this interface type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GenericInterface => "GenericInterface",
            Self::Processor => "Processor",
            Self::Block => "Block",
            Self::StorageAccess => "StorageAccess",
            Self::StorageDrive => "StorageDrive",
            Self::OpticalDrive => "OpticalDrive",
            Self::StorageVolume => "StorageVolume",
            Self::OpticalDisc => "OpticalDisc",
            Self::Camera => "Camera",
            Self::PortableMediaPlayer => "PortableMediaPlayer",
            Self::NetworkInterface => "NetworkInterface",
            Self::AcAdapter => "AcAdapter",
            Self::Battery => "Battery",
            Self::Button => "Button",
            Self::AudioInterface => "AudioInterface",
            Self::DvbInterface => "DvbInterface",
            Self::Video => "Video",
            Self::SerialInterface => "SerialInterface",
            Self::SmartCardReader => "SmartCardReader",
            Self::InternetGateway => "InternetGateway",
            Self::NetworkShare => "NetworkShare",
        }
    }

    /// Resolve a public identifier. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::GenericInterface => "Generic Interface",
            Self::Processor => "Processor",
            Self::Block => "Block",
            Self::StorageAccess => "Storage Access",
            Self::StorageDrive => "Storage Drive",
            Self::OpticalDrive => "Optical Drive",
            Self::StorageVolume => "Storage Volume",
            Self::OpticalDisc => "Optical Disc",
            Self::Camera => "Camera",
            Self::PortableMediaPlayer => "Portable Media Player",
            Self::NetworkInterface => "Network Interface",
            Self::AcAdapter => "AC Adapter",
            Self::Battery => "Battery",
            Self::Button => "Button",
            Self::AudioInterface => "Audio Interface",
            Self::DvbInterface => "Digital Video Broadcasting Interface",
            Self::Video => "Video",
            Self::SerialInterface => "Serial Interface",
            Self::SmartCardReader => "Smart Card Reader",
            Self::InternetGateway => "Internet Gateway Device",
            Self::NetworkShare => "Network Share",
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterfaceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CoreError::UnknownInterface(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_mapping_is_inverse() {
        for ty in InterfaceType::ALL {
            assert_eq!(InterfaceType::from_name(ty.name()), Some(ty));
        }
    }

    #[test]
    fn test_names_are_unique() {
        assert_eq!(BY_NAME.len(), InterfaceType::ALL.len());
    }

    #[test]
    fn test_unknown_and_case_mismatch() {
        assert_eq!(InterfaceType::from_name("Toaster"), None);
        assert_eq!(InterfaceType::from_name("storagevolume"), None);
        assert!("Toaster".parse::<InterfaceType>().is_err());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(InterfaceType::StorageVolume.to_string(), "StorageVolume");
        assert_eq!(
            "Battery".parse::<InterfaceType>().unwrap(),
            InterfaceType::Battery
        );
        assert_eq!(InterfaceType::AcAdapter.description(), "AC Adapter");
    }

    #[test]
    fn test_serde_uses_public_names() {
        let json = serde_json::to_string(&InterfaceType::OpticalDrive).unwrap();
        assert_eq!(json, "\"OpticalDrive\"");
        let back: InterfaceType = serde_json::from_str("\"NetworkShare\"").unwrap();
        assert_eq!(back, InterfaceType::NetworkShare);
    }
}
