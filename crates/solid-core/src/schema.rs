//! Enumeration metadata for the standard device interfaces.
//!
//! Several interface properties are declared as enumerations or flag sets
//! (`Battery.type`, `OpticalDrive.supportedMedia`, ...). Devices report them
//! as integers; predicates and fixtures may name them symbolically. This
//! module holds the declarations and resolves symbolic names to values.

use crate::error::{CoreError, Result};
use crate::interface::InterfaceType;

/// Metadata for one enumerated property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumMeta {
    /// Declared enumeration name, e.g. `BatteryType`.
    pub name: &'static str,
    /// Flag sets accept `A|B` combinations.
    pub is_flag: bool,
    pub keys: &'static [(&'static str, i64)],
}

impl EnumMeta {
    pub fn key_to_value(&self, key: &str) -> Option<i64> {
        self.keys
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    /// OR together every `|`-separated key. Any unknown key fails the lookup.
    pub fn keys_to_value(&self, keys: &str) -> Option<i64> {
        if !self.is_flag {
            return self.key_to_value(keys.trim());
        }
        keys.split('|')
            .map(|key| self.key_to_value(key.trim()))
            .try_fold(0, |acc, value| value.map(|v| acc | v))
    }

    /// Resolve a symbolic literal according to the enumeration kind.
    pub fn resolve(&self, symbol: &str) -> Option<i64> {
        if self.is_flag {
            self.keys_to_value(symbol)
        } else {
            self.key_to_value(symbol)
        }
    }

    /// Like [`EnumMeta::resolve`], reporting which symbol was not found.
    pub fn try_resolve(&self, symbol: &str) -> Result<i64> {
        self.resolve(symbol)
            .ok_or_else(|| CoreError::UnknownEnumSymbol {
                enumeration: self.name.to_string(),
                symbol: symbol.to_string(),
            })
    }

    pub fn value_to_key(&self, value: i64) -> Option<&'static str> {
        self.keys
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| *name)
    }

    /// Symbolic rendering of a value: the single key for enumerations, the
    /// `|`-joined set bits for flags.
    pub fn value_to_keys(&self, value: i64) -> Option<String> {
        if !self.is_flag || value == 0 {
            return self.value_to_key(value).map(str::to_string);
        }
        let mut names = Vec::new();
        let mut covered = 0;
        for (name, bit) in self.keys {
            if *bit != 0 && value & bit == *bit {
                names.push(*name);
                covered |= bit;
            }
        }
        if covered != value {
            return None;
        }
        Some(names.join("|"))
    }
}

pub const BATTERY_TYPE: EnumMeta = EnumMeta {
    name: "BatteryType",
    is_flag: false,
    keys: &[
        ("UnknownBattery", 0),
        ("PdaBattery", 1),
        ("UpsBattery", 2),
        ("PrimaryBattery", 3),
        ("MouseBattery", 4),
        ("KeyboardBattery", 5),
        ("KeyboardMouseBattery", 6),
        ("CameraBattery", 7),
        ("PhoneBattery", 8),
        ("MonitorBattery", 9),
    ],
};

pub const CHARGE_STATE: EnumMeta = EnumMeta {
    name: "ChargeState",
    is_flag: false,
    keys: &[
        ("NoCharge", 0),
        ("Charging", 1),
        ("Discharging", 2),
        ("FullyCharged", 3),
    ],
};

pub const BUTTON_TYPE: EnumMeta = EnumMeta {
    name: "ButtonType",
    is_flag: false,
    keys: &[
        ("LidButton", 0),
        ("PowerButton", 1),
        ("SleepButton", 2),
        ("UnknownButtonType", 3),
        ("TabletButton", 4),
    ],
};

pub const DRIVE_BUS: EnumMeta = EnumMeta {
    name: "Bus",
    is_flag: false,
    keys: &[
        ("Ide", 0),
        ("Usb", 1),
        ("Ieee1394", 2),
        ("Scsi", 3),
        ("Sata", 4),
        ("Platform", 5),
    ],
};

pub const DRIVE_TYPE: EnumMeta = EnumMeta {
    name: "DriveType",
    is_flag: false,
    keys: &[
        ("HardDisk", 0),
        ("CdromDrive", 1),
        ("Floppy", 2),
        ("Tape", 3),
        ("CompactFlash", 4),
        ("MemoryStick", 5),
        ("SmartMedia", 6),
        ("SdMmc", 7),
        ("Xd", 8),
    ],
};

pub const VOLUME_USAGE: EnumMeta = EnumMeta {
    name: "UsageType",
    is_flag: false,
    keys: &[
        ("Other", 0),
        ("Unused", 1),
        ("FileSystem", 2),
        ("PartitionTable", 3),
        ("Raid", 4),
        ("Encrypted", 5),
    ],
};

pub const MEDIUM_TYPES: EnumMeta = EnumMeta {
    name: "MediumTypes",
    is_flag: true,
    keys: &[
        ("UnknownMediumType", 0x0),
        ("Cdr", 0x1),
        ("Cdrw", 0x2),
        ("Dvd", 0x4),
        ("Dvdr", 0x8),
        ("Dvdrw", 0x10),
        ("Dvdram", 0x20),
        ("Dvdplusr", 0x40),
        ("Dvdplusrw", 0x80),
        ("Dvdplusdl", 0x100),
        ("Dvdplusdlrw", 0x200),
        ("Bd", 0x400),
        ("Bdr", 0x800),
        ("Bdre", 0x1000),
        ("HdDvd", 0x2000),
        ("HdDvdr", 0x4000),
        ("HdDvdrw", 0x8000),
    ],
};

pub const DISC_TYPE: EnumMeta = EnumMeta {
    name: "DiscType",
    is_flag: false,
    keys: &[
        ("UnknownDiscType", -1),
        ("CdRom", 0),
        ("CdRecordable", 1),
        ("CdRewritable", 2),
        ("DvdRom", 3),
        ("DvdRam", 4),
        ("DvdRecordable", 5),
        ("DvdRewritable", 6),
        ("DvdPlusRecordable", 7),
        ("DvdPlusRewritable", 8),
        ("DvdPlusRecordableDuallayer", 9),
        ("DvdPlusRewritableDuallayer", 10),
        ("BluRayRom", 11),
        ("BluRayRecordable", 12),
        ("BluRayRewritable", 13),
        ("HdDvdRom", 14),
        ("HdDvdRecordable", 15),
        ("HdDvdRewritable", 16),
    ],
};

pub const CONTENT_TYPES: EnumMeta = EnumMeta {
    name: "ContentTypes",
    is_flag: true,
    keys: &[
        ("NoContent", 0x0),
        ("Audio", 0x1),
        ("Data", 0x2),
        ("VideoCd", 0x4),
        ("SuperVideoCd", 0x8),
        ("VideoDvd", 0x10),
        ("VideoBluRay", 0x20),
    ],
};

pub const INSTRUCTION_SETS: EnumMeta = EnumMeta {
    name: "InstructionSets",
    is_flag: true,
    keys: &[
        ("NoExtensions", 0x0),
        ("IntelMmx", 0x1),
        ("IntelSse", 0x2),
        ("IntelSse2", 0x4),
        ("IntelSse3", 0x8),
        ("IntelSse41", 0x10),
        ("IntelSse42", 0x20),
        ("Amd3DNow", 0x40),
        ("IntelSsse3", 0x80),
        ("AltiVec", 0x100),
    ],
};

pub const SHARE_TYPE: EnumMeta = EnumMeta {
    name: "ShareType",
    is_flag: false,
    keys: &[("Unknown", 0), ("Nfs", 1), ("Cifs", 2)],
};

/// Enumerated properties per interface type.
static PROPERTIES: &[(InterfaceType, &str, &EnumMeta)] = &[
    (InterfaceType::Battery, "type", &BATTERY_TYPE),
    (InterfaceType::Battery, "chargeState", &CHARGE_STATE),
    (InterfaceType::Button, "type", &BUTTON_TYPE),
    (InterfaceType::StorageDrive, "bus", &DRIVE_BUS),
    (InterfaceType::StorageDrive, "driveType", &DRIVE_TYPE),
    (InterfaceType::OpticalDrive, "bus", &DRIVE_BUS),
    (InterfaceType::OpticalDrive, "driveType", &DRIVE_TYPE),
    (InterfaceType::OpticalDrive, "supportedMedia", &MEDIUM_TYPES),
    (InterfaceType::StorageVolume, "usage", &VOLUME_USAGE),
    (InterfaceType::OpticalDisc, "usage", &VOLUME_USAGE),
    (InterfaceType::OpticalDisc, "discType", &DISC_TYPE),
    (InterfaceType::OpticalDisc, "availableContent", &CONTENT_TYPES),
    (InterfaceType::Processor, "instructionSets", &INSTRUCTION_SETS),
    (InterfaceType::NetworkShare, "type", &SHARE_TYPE),
];

/// Enum metadata for `ty.property`, if that property is enumerated.
pub fn enumeration(ty: InterfaceType, property: &str) -> Option<&'static EnumMeta> {
    PROPERTIES
        .iter()
        .find(|(t, name, _)| *t == ty && *name == property)
        .map(|(_, _, meta)| *meta)
}

/// All enumerated properties declared by `ty`.
pub fn enumerations(ty: InterfaceType) -> impl Iterator<Item = (&'static str, &'static EnumMeta)> {
    PROPERTIES
        .iter()
        .filter(move |(t, _, _)| *t == ty)
        .map(|(_, name, meta)| (*name, *meta))
}
