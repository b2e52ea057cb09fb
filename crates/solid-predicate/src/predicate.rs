//! Predicate tree, constructors and serialization.
//!
//! A predicate is a boolean expression over device interfaces:
//!
//! ```text
//! [IS StorageVolume AND StorageVolume.fsType == 'ext4']
//! ```
//!
//! Trees are plain owned values. Combining two predicates with `&` or `|`
//! builds a new root over copies of the operands when they are borrowed, or
//! moves them in when they are owned.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solid_core::{InterfaceType, Value};

use crate::error::ParseError;
use crate::parser::{self, ParserOptions};

/// How an atom compares the property value against its expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Comparison {
    /// Generic value equality.
    #[default]
    Equals,
    /// Bitwise AND of both sides is non-zero.
    Mask,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::Mask => "&",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node kind of a valid predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateType {
    PropertyCheck,
    Conjunction,
    Disjunction,
    InterfaceCheck,
}

/// Leaf comparing one property of one interface against an expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub interface: InterfaceType,
    pub property: String,
    pub value: Value,
    pub comparison: Comparison,
}

/// A device-matching expression.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Predicate {
    /// Matches nothing. Produced by default construction, unknown interface
    /// names and unparsable text.
    #[default]
    Invalid,
    Atom(Atom),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    /// Matches any device exposing the interface.
    Is(InterfaceType),
}

impl Predicate {
    /// An invalid predicate.
    pub fn new() -> Self {
        Self::Invalid
    }

    /// Equality check on `interface.property`.
    pub fn property(
        interface: InterfaceType,
        property: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::atom(interface, property, value, Comparison::Equals)
    }

    /// Property check with an explicit comparison. A property name that is not
    /// an identifier (`[A-Za-z_][A-Za-z0-9_]*`) yields an invalid predicate.
    pub fn atom(
        interface: InterfaceType,
        property: impl Into<String>,
        value: impl Into<Value>,
        comparison: Comparison,
    ) -> Self {
        let property = property.into();
        if !is_identifier(&property) {
            tracing::debug!(
                %interface,
                property = %property,
                "Property name is not an identifier"
            );
            return Self::Invalid;
        }
        Self::Atom(Atom {
            interface,
            property,
            value: value.into(),
            comparison,
        })
    }

    /// Like [`Predicate::atom`], resolving the interface by name. An unknown
    /// name yields an invalid predicate.
    pub fn atom_named(
        interface: &str,
        property: impl Into<String>,
        value: impl Into<Value>,
        comparison: Comparison,
    ) -> Self {
        match InterfaceType::from_name(interface) {
            Some(ty) => Self::atom(ty, property, value, comparison),
            None => {
                tracing::debug!(interface, "Unknown interface in predicate atom");
                Self::Invalid
            }
        }
    }

    pub fn is(interface: InterfaceType) -> Self {
        Self::Is(interface)
    }

    /// Like [`Predicate::is`], resolving the interface by name. An unknown
    /// name yields an invalid predicate.
    pub fn is_named(interface: &str) -> Self {
        match InterfaceType::from_name(interface) {
            Some(ty) => Self::Is(ty),
            None => {
                tracing::debug!(interface, "Unknown interface in IS predicate");
                Self::Invalid
            }
        }
    }

    /// Parse predicate text, reporting why it was rejected.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parser::parse(text, &ParserOptions::default())
    }

    pub fn parse_with(text: &str, options: &ParserOptions) -> Result<Self, ParseError> {
        parser::parse(text, options)
    }

    /// Parse predicate text. Anything unparsable becomes an invalid predicate.
    pub fn from_string(text: &str) -> Self {
        match Self::parse(text) {
            Ok(predicate) => predicate,
            Err(e) => {
                tracing::debug!(error = %e, input = text, "Discarding unparsable predicate");
                Self::Invalid
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    pub fn predicate_type(&self) -> Option<PredicateType> {
        match self {
            Self::Invalid => None,
            Self::Atom(_) => Some(PredicateType::PropertyCheck),
            Self::And(..) => Some(PredicateType::Conjunction),
            Self::Or(..) => Some(PredicateType::Disjunction),
            Self::Is(_) => Some(PredicateType::InterfaceCheck),
        }
    }

    pub fn interface_type(&self) -> Option<InterfaceType> {
        match self {
            Self::Atom(atom) => Some(atom.interface),
            Self::Is(ty) => Some(*ty),
            _ => None,
        }
    }

    pub fn property_name(&self) -> Option<&str> {
        match self {
            Self::Atom(atom) => Some(&atom.property),
            _ => None,
        }
    }

    pub fn matching_value(&self) -> Option<&Value> {
        match self {
            Self::Atom(atom) => Some(&atom.value),
            _ => None,
        }
    }

    pub fn comparison_operator(&self) -> Option<Comparison> {
        match self {
            Self::Atom(atom) => Some(atom.comparison),
            _ => None,
        }
    }

    pub fn first_operand(&self) -> Option<&Predicate> {
        match self {
            Self::And(lhs, _) | Self::Or(lhs, _) => Some(lhs.as_ref()),
            _ => None,
        }
    }

    pub fn second_operand(&self) -> Option<&Predicate> {
        match self {
            Self::And(_, rhs) | Self::Or(_, rhs) => Some(rhs.as_ref()),
            _ => None,
        }
    }

    /// Every interface type referenced anywhere in the tree.
    pub fn used_types(&self) -> BTreeSet<InterfaceType> {
        let mut types = BTreeSet::new();
        self.collect_types(&mut types);
        types
    }

    fn collect_types(&self, types: &mut BTreeSet<InterfaceType>) {
        match self {
            Self::Invalid => {}
            Self::Atom(atom) => {
                types.insert(atom.interface);
            }
            Self::Is(ty) => {
                types.insert(*ty);
            }
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.collect_types(types);
                rhs.collect_types(types);
            }
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => f.write_str("False"),
            Self::Is(ty) => write!(f, "IS {}", ty),
            Self::Atom(atom) => write!(
                f,
                "{}.{} {} {}",
                atom.interface, atom.property, atom.comparison, atom.value
            ),
            Self::And(lhs, rhs) => write!(f, "[{} AND {}]", lhs, rhs),
            Self::Or(lhs, rhs) => write!(f, "[{} OR {}]", lhs, rhs),
        }
    }
}

impl FromStr for Predicate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

macro_rules! impl_combinator {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $variant:ident) => {
        impl $op for Predicate {
            type Output = Predicate;

            fn $method(self, rhs: Predicate) -> Predicate {
                Predicate::$variant(Box::new(self), Box::new(rhs))
            }
        }

        impl $op<&Predicate> for Predicate {
            type Output = Predicate;

            fn $method(self, rhs: &Predicate) -> Predicate {
                Predicate::$variant(Box::new(self), Box::new(rhs.clone()))
            }
        }

        impl $op<Predicate> for &Predicate {
            type Output = Predicate;

            fn $method(self, rhs: Predicate) -> Predicate {
                Predicate::$variant(Box::new(self.clone()), Box::new(rhs))
            }
        }

        impl $op<&Predicate> for &Predicate {
            type Output = Predicate;

            fn $method(self, rhs: &Predicate) -> Predicate {
                Predicate::$variant(Box::new(self.clone()), Box::new(rhs.clone()))
            }
        }

        impl $assign for Predicate {
            fn $assign_method(&mut self, rhs: Predicate) {
                let lhs = std::mem::take(self);
                *self = Predicate::$variant(Box::new(lhs), Box::new(rhs));
            }
        }

        impl $assign<&Predicate> for Predicate {
            fn $assign_method(&mut self, rhs: &Predicate) {
                let lhs = std::mem::take(self);
                *self = Predicate::$variant(Box::new(lhs), Box::new(rhs.clone()));
            }
        }
    };
}

impl_combinator!(BitAnd, bitand, BitAndAssign, bitand_assign, And);
impl_combinator!(BitOr, bitor, BitOrAssign, bitor_assign, Or);

#[cfg(test)]
mod tests {
    use super::*;

    fn ext4() -> Predicate {
        Predicate::property(InterfaceType::StorageVolume, "fsType", "ext4")
    }

    #[test]
    fn test_default_is_invalid() {
        let p = Predicate::default();
        assert!(!p.is_valid());
        assert_eq!(p.predicate_type(), None);
        assert_eq!(p.to_string(), "False");
        assert!(p.used_types().is_empty());
    }

    #[test]
    fn test_named_constructors() {
        assert_eq!(
            Predicate::is_named("Battery"),
            Predicate::is(InterfaceType::Battery)
        );
        assert!(!Predicate::is_named("Toaster").is_valid());
        assert!(!Predicate::atom_named("Toaster", "slots", 2, Comparison::Equals).is_valid());
        assert_eq!(
            Predicate::atom_named("StorageVolume", "fsType", "ext4", Comparison::Equals),
            ext4()
        );
    }

    #[test]
    fn test_property_names_must_be_identifiers() {
        for name in ["", "free space", "a.b", "9lives", "fs-type", "größe"] {
            assert!(
                !Predicate::property(InterfaceType::StorageVolume, name, 1).is_valid(),
                "{:?}",
                name
            );
        }
        for name in ["_x", "fsType", "true", "AND", "size2"] {
            assert!(
                Predicate::property(InterfaceType::StorageVolume, name, 1).is_valid(),
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn test_accessors() {
        let p = Predicate::atom(
            InterfaceType::OpticalDrive,
            "supportedMedia",
            8,
            Comparison::Mask,
        );
        assert_eq!(p.predicate_type(), Some(PredicateType::PropertyCheck));
        assert_eq!(p.interface_type(), Some(InterfaceType::OpticalDrive));
        assert_eq!(p.property_name(), Some("supportedMedia"));
        assert_eq!(p.matching_value(), Some(&Value::Int(8)));
        assert_eq!(p.comparison_operator(), Some(Comparison::Mask));
        assert!(p.first_operand().is_none());

        let is = Predicate::is(InterfaceType::Camera);
        assert_eq!(is.interface_type(), Some(InterfaceType::Camera));
        assert_eq!(is.property_name(), None);
    }

    #[test]
    fn test_combinators_leave_operands_untouched() {
        let a = ext4();
        let b = Predicate::is(InterfaceType::StorageAccess);
        let both = &a & &b;
        let either = &a | &b;

        assert_eq!(both.predicate_type(), Some(PredicateType::Conjunction));
        assert_eq!(either.predicate_type(), Some(PredicateType::Disjunction));
        assert_eq!(both.first_operand(), Some(&a));
        assert_eq!(both.second_operand(), Some(&b));
        assert_eq!(a, ext4());
        assert_eq!(b, Predicate::is(InterfaceType::StorageAccess));
    }

    #[test]
    fn test_assign_combinators() {
        let mut p = Predicate::is(InterfaceType::StorageVolume);
        p &= ext4();
        assert_eq!(p.to_string(), "[IS StorageVolume AND StorageVolume.fsType == 'ext4']");

        p |= &Predicate::is(InterfaceType::Camera);
        assert_eq!(
            p.to_string(),
            "[[IS StorageVolume AND StorageVolume.fsType == 'ext4'] OR IS Camera]"
        );
    }

    #[test]
    fn test_combining_invalid_yields_valid_compound() {
        let p = Predicate::new() & ext4();
        assert!(p.is_valid());
        assert_eq!(p.to_string(), "[False AND StorageVolume.fsType == 'ext4']");
    }

    #[test]
    fn test_used_types_is_union() {
        let p = (ext4() | Predicate::is(InterfaceType::Camera))
            & Predicate::property(InterfaceType::StorageVolume, "ignored", false);
        let types: Vec<_> = p.used_types().into_iter().collect();
        assert_eq!(
            types,
            vec![InterfaceType::StorageVolume, InterfaceType::Camera]
        );
    }

    #[test]
    fn test_display_values() {
        let mask = Predicate::atom(
            InterfaceType::OpticalDrive,
            "supportedMedia",
            "Dvdr|Dvdrw",
            Comparison::Mask,
        );
        assert_eq!(mask.to_string(), "OpticalDrive.supportedMedia & 'Dvdr|Dvdrw'");

        let list = Predicate::property(
            InterfaceType::PortableMediaPlayer,
            "supportedProtocols",
            vec!["mtp", "ums"],
        );
        assert_eq!(
            list.to_string(),
            "PortableMediaPlayer.supportedProtocols == {'mtp', 'ums'}"
        );

        let flag = Predicate::property(InterfaceType::StorageVolume, "ignored", false);
        assert_eq!(flag.to_string(), "StorageVolume.ignored == false");
    }

    #[test]
    fn test_clone_is_deep() {
        let original = ext4() & Predicate::is(InterfaceType::Block);
        let mut copy = original.clone();
        copy |= Predicate::is(InterfaceType::Camera);
        assert_ne!(original, copy);
        assert_eq!(original.to_string(), "[StorageVolume.fsType == 'ext4' AND IS Block]");
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = ext4() & Predicate::is(InterfaceType::StorageAccess);
        let json = serde_json::to_string(&p).unwrap();
        let back: Predicate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
