use recast_types::TypeId;

use super::Value;

/// Value produced when `Null` is converted to `target`.
///
/// Numeric, boolean and character targets have a zero value; every other
/// target keeps the null.
#[must_use]
pub fn null_value_for(target: TypeId) -> Value {
    match target {
        TypeId::BOOL => Value::Bool(false),
        TypeId::BYTE => Value::Byte(0),
        TypeId::SHORT => Value::Short(0),
        TypeId::INT => Value::Int(0),
        TypeId::LONG => Value::Long(0),
        TypeId::FLOAT => Value::Float(0.0),
        TypeId::DOUBLE => Value::Double(0.0),
        TypeId::CHAR => Value::Char(0),
        _ => Value::Null,
    }
}

/// Zero value of a numeric or character target, used for empty text.
#[must_use]
pub fn zero_value_for(target: TypeId) -> Option<Value> {
    match target {
        TypeId::BIG_INTEGER => Some(Value::BigInteger(0.into())),
        TypeId::BIG_DECIMAL => Some(Value::BigDecimal(0.into())),
        TypeId::BOOL => None,
        _ => match null_value_for(target) {
            Value::Null => None,
            zero => Some(zero),
        },
    }
}
