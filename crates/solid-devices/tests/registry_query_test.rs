//! Tests for DeviceRegistry queries against the fake computer fixture.

use std::io::Write;
use std::sync::Arc;

use solid_core::{Device, InterfaceType, Value};
use solid_devices::{DeviceError, DeviceRecord, DeviceRegistry};
use solid_predicate::Predicate;

const PREFIX: &str = "/org/kde/solid/fakehw/";

fn fixture_path() -> String {
    format!("{}/fixtures/fakecomputer.json", env!("CARGO_MANIFEST_DIR"))
}

fn fake_computer() -> DeviceRegistry {
    DeviceRegistry::load_file(fixture_path()).expect("Failed to load fixture")
}

fn names(devices: &[Arc<DeviceRecord>]) -> Vec<&str> {
    devices
        .iter()
        .map(|d| d.udi.strip_prefix(PREFIX).unwrap_or(d.udi.as_str()))
        .collect()
}

fn query(registry: &DeviceRegistry, text: &str) -> Vec<String> {
    let predicate = Predicate::parse(text).expect("Failed to parse predicate");
    names(&registry.list_from_query(&predicate, None))
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_fixture_loads() {
    let registry = fake_computer();
    assert_eq!(registry.len(), 19);

    let battery = registry
        .get("/org/kde/solid/fakehw/acpi_BAT0")
        .expect("battery present");
    assert_eq!(battery.vendor, "Acme Corporation");
    assert_eq!(battery.description, "Battery Bay");
    assert_eq!(battery.parent_udi.as_deref(), Some("/org/kde/solid/fakehw/computer"));
    assert_eq!(
        battery.property(InterfaceType::Battery, "type"),
        Some(Value::Int(3))
    );
    assert_eq!(
        battery.property(InterfaceType::Battery, "voltage"),
        Some(Value::Double(11.4))
    );
}

#[test]
fn test_list_from_type() {
    let registry = fake_computer();
    assert_eq!(
        names(&registry.list_from_type(InterfaceType::StorageVolume, None)),
        vec![
            "volume_label_SOLIDMAN",
            "volume_label_SOLIDMAN_BEGINS",
            "volume_uuid_5011",
            "volume_uuid_c0ffee",
            "volume_uuid_feedface",
        ]
    );
    assert_eq!(
        names(&registry.list_from_type(
            InterfaceType::StorageVolume,
            Some("/org/kde/solid/fakehw/storage_model_solid_internal_hd"),
        )),
        vec!["volume_uuid_5011", "volume_uuid_c0ffee", "volume_uuid_feedface"]
    );
    assert_eq!(
        names(&registry.list_from_type(InterfaceType::StorageAccess, None)),
        vec![
            "nfs_share_home",
            "volume_label_SOLIDMAN",
            "volume_uuid_c0ffee",
            "volume_uuid_feedface",
        ]
    );
    assert!(registry
        .list_from_type(InterfaceType::SmartCardReader, None)
        .is_empty());
}

#[test]
fn test_queries() {
    let registry = fake_computer();

    assert_eq!(
        query(&registry, "StorageVolume.fsType == 'ext4'"),
        vec!["volume_uuid_feedface"]
    );
    assert_eq!(
        query(&registry, "[IS StorageVolume AND StorageVolume.ignored == false]"),
        vec![
            "volume_label_SOLIDMAN",
            "volume_label_SOLIDMAN_BEGINS",
            "volume_uuid_c0ffee",
            "volume_uuid_feedface",
        ]
    );
    assert_eq!(
        query(&registry, "IS Camera OR IS PortableMediaPlayer"),
        vec!["usb_device_camera", "usb_device_pmp"]
    );
    assert_eq!(
        query(&registry, "NetworkInterface.wireless == true"),
        vec!["net_wlan0"]
    );
    assert_eq!(
        query(&registry, "NetworkShare.type == 'Nfs'"),
        vec!["nfs_share_home"]
    );
    assert_eq!(
        query(&registry, "Block.major == 8"),
        vec![
            "storage_model_solid_internal_hd",
            "storage_model_solid_usb_stick",
            "volume_label_SOLIDMAN",
            "volume_uuid_5011",
            "volume_uuid_c0ffee",
            "volume_uuid_feedface",
        ]
    );
}

#[test]
fn test_enum_queries() {
    let registry = fake_computer();

    assert_eq!(
        query(
            &registry,
            "Battery.type == 'PrimaryBattery' AND Battery.chargeState == 'Discharging'"
        ),
        vec!["acpi_BAT0"]
    );
    assert_eq!(
        query(&registry, "StorageDrive.bus == 'Usb'"),
        vec!["storage_model_solid_usb_stick"]
    );
    assert_eq!(
        query(
            &registry,
            "OpticalDisc.discType == 'CdRom' AND OpticalDisc.availableContent & 'Data'"
        ),
        vec!["volume_label_SOLIDMAN_BEGINS"]
    );
    assert!(query(&registry, "Battery.type == 'NoSuchBattery'").is_empty());
}

#[test]
fn test_mask_queries() {
    let registry = fake_computer();

    assert_eq!(
        query(&registry, "OpticalDrive.supportedMedia & 'Dvdr'"),
        vec!["storage_model_solid_writer"]
    );
    assert_eq!(
        query(&registry, "OpticalDrive.supportedMedia & 8"),
        vec!["storage_model_solid_writer"]
    );
    assert!(query(&registry, "OpticalDrive.supportedMedia & 'Bd|HdDvd'").is_empty());
    assert_eq!(
        query(&registry, "Processor.instructionSets & 'IntelSse2'"),
        vec!["acpi_CPU0", "acpi_CPU1"]
    );
}

#[test]
fn test_query_with_parent() {
    let registry = fake_computer();
    let access = Predicate::is(InterfaceType::StorageAccess);

    let found = registry.list_from_query(
        &access,
        Some("/org/kde/solid/fakehw/storage_model_solid_usb_stick"),
    );
    assert_eq!(names(&found), vec!["volume_label_SOLIDMAN"]);

    let found = registry.list_from_query(&access, Some("/org/kde/solid/fakehw/nowhere"));
    assert!(found.is_empty());
}

#[test]
fn test_invalid_queries_list_nothing() {
    let registry = fake_computer();
    assert!(registry.list_from_query(&Predicate::new(), None).is_empty());
    assert!(registry
        .list_from_query_str("StorageVolume.fsType ===", None)
        .is_empty());
    assert!(registry
        .list_from_query_str("IS Toaster OR IS Battery", None)
        .is_empty());
}

#[test]
fn test_load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"devices": [{{"udi": "/tmp/dev", "interfaces": {{"Video": {{"driver": "uvcvideo"}}}}}}]}}"#
    )
    .unwrap();

    let registry = DeviceRegistry::load_file(file.path()).unwrap();
    assert_eq!(
        names(&registry.list_from_query_str("Video.driver == 'uvcvideo'", None)),
        vec!["/tmp/dev"]
    );
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        DeviceRegistry::load_file(dir.path().join("missing.json")),
        Err(DeviceError::Io(_))
    ));

    let duplicate = r#"{"devices": [{"udi": "/a"}, {"udi": "/a"}]}"#;
    assert!(matches!(
        DeviceRegistry::from_json_str(duplicate),
        Err(DeviceError::AlreadyExists(_))
    ));

    let bad_symbol = r#"{"devices": [{"udi": "/a", "interfaces": {"Battery": {"type": "Nuclear"}}}]}"#;
    assert!(matches!(
        DeviceRegistry::from_json_str(bad_symbol),
        Err(DeviceError::Core(_))
    ));
}
