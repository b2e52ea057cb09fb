//! In-memory device records.

use std::collections::BTreeMap;

use solid_core::{Device, DeviceInterface, InterfaceType, Value};

/// Property values of one interface on one device.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceData {
    ty: InterfaceType,
    properties: BTreeMap<String, Value>,
}

impl InterfaceData {
    pub fn new(ty: InterfaceType) -> Self {
        Self {
            ty,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Properties in name order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl DeviceInterface for InterfaceData {
    fn interface_type(&self) -> InterfaceType {
        self.ty
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }
}

/// A device known to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    /// Unique device identifier
    pub udi: String,
    /// UDI of the parent device, if any
    pub parent_udi: Option<String>,
    pub vendor: String,
    pub product: String,
    pub description: String,
    pub icon: String,
    interfaces: BTreeMap<InterfaceType, InterfaceData>,
}

impl DeviceRecord {
    pub fn new(udi: impl Into<String>) -> Self {
        Self {
            udi: udi.into(),
            parent_udi: None,
            vendor: String::new(),
            product: String::new(),
            description: String::new(),
            icon: String::new(),
            interfaces: BTreeMap::new(),
        }
    }

    pub fn with_parent(mut self, parent_udi: impl Into<String>) -> Self {
        self.parent_udi = Some(parent_udi.into());
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Add or replace the interface of the same type.
    pub fn with_interface(mut self, data: InterfaceData) -> Self {
        self.interfaces.insert(data.ty, data);
        self
    }

    pub fn interface_data(&self, ty: InterfaceType) -> Option<&InterfaceData> {
        self.interfaces.get(&ty)
    }

    /// Exposed interfaces in type declaration order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceData> + '_ {
        self.interfaces.values()
    }

    /// Exposed interface types in declaration order.
    pub fn interface_types(&self) -> impl Iterator<Item = InterfaceType> + '_ {
        self.interfaces.keys().copied()
    }

    pub fn is_child_of(&self, parent_udi: &str) -> bool {
        self.parent_udi.as_deref() == Some(parent_udi)
    }
}

impl Device for DeviceRecord {
    fn interface(&self, ty: InterfaceType) -> Option<&dyn DeviceInterface> {
        self.interfaces
            .get(&ty)
            .map(|data| data as &dyn DeviceInterface)
    }
}
