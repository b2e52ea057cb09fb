//! Predicate evaluation against devices.

use solid_core::{Device, Value};

use crate::predicate::{Atom, Comparison, Predicate};

impl Predicate {
    /// Whether `device` satisfies this predicate.
    ///
    /// Invalid predicates match nothing. Both operands of `AND`/`OR` are
    /// always evaluated. Missing interfaces, missing properties and failed
    /// conversions make an atom non-matching; nothing here fails.
    pub fn matches<D: Device + ?Sized>(&self, device: &D) -> bool {
        match self {
            Self::Invalid => false,
            Self::Or(lhs, rhs) => {
                let left = lhs.matches(device);
                let right = rhs.matches(device);
                left || right
            }
            Self::And(lhs, rhs) => {
                let left = lhs.matches(device);
                let right = rhs.matches(device);
                left && right
            }
            Self::Atom(atom) => atom.matches(device),
            Self::Is(ty) => device.has_interface(*ty),
        }
    }
}

impl Atom {
    pub fn matches<D: Device + ?Sized>(&self, device: &D) -> bool {
        let Some(iface) = device.interface(self.interface) else {
            return false;
        };
        let Some(actual) = iface.property(&self.property) else {
            tracing::trace!(
                interface = %self.interface,
                property = %self.property,
                "Property has no value"
            );
            return false;
        };

        // Symbolic names on enumerated properties compare by value.
        let resolved;
        let expected = match (&self.value, iface.enumeration(&self.property)) {
            (Value::String(symbol), Some(meta)) => match meta.resolve(symbol) {
                Some(v) => {
                    resolved = Value::Int64(v);
                    &resolved
                }
                None => {
                    tracing::debug!(
                        enumeration = meta.name,
                        symbol = %symbol,
                        "Unknown enum symbol in predicate"
                    );
                    return false;
                }
            },
            _ => &self.value,
        };

        match self.comparison {
            Comparison::Mask => match (actual.to_i64(), expected.to_i64()) {
                (Some(v), Some(e)) => v & e != 0,
                _ => false,
            },
            Comparison::Equals => expected.loosely_equals(&actual),
        }
    }
}
