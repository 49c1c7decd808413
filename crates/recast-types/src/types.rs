//! Type system for value conversion.
//!
//! Built-in types are addressed by fixed [`TypeId`] constants; user-defined
//! classes, interfaces and enums receive IDs from the [`TypeRegistry`].

mod builtins;
mod defs;
mod hierarchy;
mod registry;

pub use defs::{Type, TypeId};
pub use registry::{TypeError, TypeRegistry};
