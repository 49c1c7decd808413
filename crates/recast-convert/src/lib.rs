//! `recast-convert` - Hierarchy-aware value conversion engine.
//!
//! A [`Converter`] turns a [`Value`] of one type into an equivalent value of a
//! requested target type. Conversions are registered per `(source, target)`
//! pair; when no exact pair exists the source type's superclasses and
//! interfaces are searched in a fixed order and the decision is cached.
//!
//! # Example
//!
//! ```
//! use recast_convert::{Converter, Value};
//! use recast_types::TypeId;
//!
//! let converter = Converter::new();
//! let value = converter.convert(&Value::from(" 42 "), TypeId::SHORT).unwrap();
//! assert_eq!(value, Value::Short(42));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Converter configuration loaded from TOML.
pub mod config;
/// Per-call conversion context and zone parsing.
pub mod context;
mod conversions;
/// Resolver and dispatcher.
pub mod converter;
/// Conversion errors.
pub mod error;
mod numeric;
/// Conversion edge registry.
pub mod registry;
/// Runtime values.
pub mod value;

pub use config::{ConverterConfig, TypeLookupMode};
pub use context::{ContextBuilder, ConversionContext, TypeLookup};
pub use converter::Converter;
pub use error::ConversionError;
pub use registry::{ConversionRegistry, ConvertFn, EdgeTable, Registration};
pub use value::{EnumValue, EpochPair, MonthDay, ObjectValue, Value};
