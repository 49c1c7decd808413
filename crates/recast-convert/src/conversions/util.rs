use recast_types::TypeId;
use smol_str::SmolStr;

use crate::context::type_label;
use crate::error::ConversionError;
use crate::value::Value;

pub(super) const NUMERIC_TYPES: [TypeId; 8] = [
    TypeId::BYTE,
    TypeId::SHORT,
    TypeId::INT,
    TypeId::LONG,
    TypeId::FLOAT,
    TypeId::DOUBLE,
    TypeId::BIG_INTEGER,
    TypeId::BIG_DECIMAL,
];

/// Leaf reached with a value it does not handle (user subclasses of a
/// built-in abstract type, for example).
pub(super) fn unsupported(value: &Value, target: TypeId) -> ConversionError {
    ConversionError::NoConversionAvailable {
        from: type_label(value.type_id()),
        to: type_label(target),
    }
}

pub(super) fn text_of(value: &Value, target: TypeId) -> Result<&str, ConversionError> {
    value.as_str().ok_or_else(|| unsupported(value, target))
}

pub(super) fn label(target: TypeId) -> SmolStr {
    type_label(target)
}
