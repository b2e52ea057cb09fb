//! Device capability surface.
//!
//! The predicate engine never talks to a backend directly. Anything that can
//! answer "do you expose interface X" and "what is property Y on it" can be
//! matched against a predicate.

use crate::interface::InterfaceType;
use crate::schema::EnumMeta;
use crate::value::Value;

/// One capability exposed by a device.
pub trait DeviceInterface {
    fn interface_type(&self) -> InterfaceType;

    /// Current value of the named property, or `None` if it has no usable value.
    fn property(&self, name: &str) -> Option<Value>;

    /// Enum metadata when `property` is declared as an enumerated type.
    fn enumeration(&self, property: &str) -> Option<&'static EnumMeta> {
        crate::schema::enumeration(self.interface_type(), property)
    }
}

/// A device that can be matched against predicates.
pub trait Device {
    /// The interface instance for `ty`, if the device exposes it.
    fn interface(&self, ty: InterfaceType) -> Option<&dyn DeviceInterface>;

    fn has_interface(&self, ty: InterfaceType) -> bool {
        self.interface(ty).is_some()
    }

    /// Read `ty.name` in one step.
    fn property(&self, ty: InterfaceType, name: &str) -> Option<Value> {
        self.interface(ty)?.property(name)
    }

    /// Resolve a symbolic enum literal for `ty.property`.
    ///
    /// `None` when the interface is absent, the property is not enumerated,
    /// or the symbol is unknown.
    fn resolve_enum_literal(&self, ty: InterfaceType, property: &str, symbol: &str) -> Option<i64> {
        self.interface(ty)?.enumeration(property)?.resolve(symbol)
    }
}

impl<D: Device + ?Sized> Device for &D {
    fn interface(&self, ty: InterfaceType) -> Option<&dyn DeviceInterface> {
        (**self).interface(ty)
    }
}

impl<D: Device + ?Sized> Device for std::sync::Arc<D> {
    fn interface(&self, ty: InterfaceType) -> Option<&dyn DeviceInterface> {
        (**self).interface(ty)
    }
}
