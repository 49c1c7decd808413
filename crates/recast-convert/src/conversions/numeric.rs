use recast_types::TypeId;

use crate::error::ConversionError;
use crate::numeric::{numeric_to, Numeric};
use crate::registry::EdgeTable;
use crate::value::Value;

use super::util::{unsupported, NUMERIC_TYPES};

pub(super) fn register(table: &mut EdgeTable) {
    // Number edges hang off the abstract root so every numeric subtype
    // resolves through the hierarchy.
    for target in NUMERIC_TYPES.into_iter().chain([TypeId::BOOL, TypeId::CHAR]) {
        table.add(TypeId::NUMBER, target, move |value, _| convert(value, target));
    }
    for target in NUMERIC_TYPES.into_iter().chain([TypeId::CHAR]) {
        table.add(TypeId::BOOL, target, move |value, _| convert(value, target));
    }
    for target in NUMERIC_TYPES.into_iter().chain([TypeId::BOOL]) {
        table.add(TypeId::CHAR, target, move |value, _| convert(value, target));
    }
}

fn convert(value: &Value, target: TypeId) -> Result<Value, ConversionError> {
    let number = Numeric::of(value).ok_or_else(|| unsupported(value, target))?;
    numeric_to(&number, target)
}
