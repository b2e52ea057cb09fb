//! Solid Predicate Engine
//!
//! Boolean expressions over device interfaces, used to select devices by
//! capability and property values.
//!
//! ## Features
//!
//! - **Predicate tree**: atoms, interface checks and `AND`/`OR` combinations
//! - **Text form**: a canonical serialization and a parser that reads it back
//! - **Matching**: evaluation against anything implementing [`solid_core::Device`]
//!
//! ## Example
//!
//! ```rust
//! use solid_core::InterfaceType;
//! use solid_predicate::Predicate;
//!
//! let p = Predicate::is(InterfaceType::StorageVolume)
//!     & Predicate::property(InterfaceType::StorageVolume, "fsType", "ext4");
//! assert_eq!(
//!     p.to_string(),
//!     "[IS StorageVolume AND StorageVolume.fsType == 'ext4']"
//! );
//! assert_eq!(Predicate::from_string(&p.to_string()), p);
//!
//! assert!(!Predicate::from_string("StorageVolume.fsType ===").is_valid());
//! ```

pub mod error;
mod lexer;
mod matching;
pub mod parser;
pub mod predicate;

pub use error::ParseError;
pub use parser::ParserOptions;
pub use predicate::{Atom, Comparison, Predicate, PredicateType};
