//! `recast-types` - Type keys and the type hierarchy used by the conversion engine.
//!
//! This crate defines the universe of types that values can be converted
//! between:
//!
//! - **Type keys**: [`TypeId`] constants for every built-in value kind
//! - **Hierarchy**: superclasses and capability interfaces for every type
//! - **Registry**: user classes, interfaces and enums layered over the built-ins
//!
//! # Example
//!
//! ```
//! use recast_types::{TypeId, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let order = registry.ancestors(TypeId::INT);
//! assert_eq!(order.first(), Some(&TypeId::NUMBER));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod types;

pub use types::{Type, TypeError, TypeId, TypeRegistry};
