//! Shared numeric helpers: classification, checked narrowing and text parsing.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use recast_types::TypeId;
use smol_str::SmolStr;

use crate::context::type_label;
use crate::error::ConversionError;
use crate::value::{zero_value_for, Value};

/// Largest power of ten a decimal may be expanded by when truncated.
const MAX_EXPONENT: i64 = 4_096;
/// 2^127, the first float outside the i128 range.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Numeric payload of a value, widened for conversion.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Numeric {
    Integral(i128),
    Single(f32),
    Floating(f64),
    Big(BigInt),
    Decimal(BigDecimal),
}

impl Numeric {
    /// Reads numbers, characters (as code units) and booleans (as 1/0).
    pub(crate) fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(Self::Integral(i128::from(*v))),
            Value::Byte(v) => Some(Self::Integral(i128::from(*v))),
            Value::Short(v) => Some(Self::Integral(i128::from(*v))),
            Value::Int(v) => Some(Self::Integral(i128::from(*v))),
            Value::Long(v) => Some(Self::Integral(i128::from(*v))),
            Value::Char(v) => Some(Self::Integral(i128::from(*v))),
            Value::Float(v) => Some(Self::Single(*v)),
            Value::Double(v) => Some(Self::Floating(*v)),
            Value::BigInteger(v) => Some(Self::Big(v.clone())),
            Value::BigDecimal(v) => Some(Self::Decimal(v.clone())),
            _ => None,
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Self::Integral(v) => *v == 0,
            Self::Single(v) => *v == 0.0,
            Self::Floating(v) => *v == 0.0,
            Self::Big(v) => v.is_zero(),
            Self::Decimal(v) => v.is_zero(),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Integral(v) => v.to_string(),
            Self::Single(v) => v.to_string(),
            Self::Floating(v) => v.to_string(),
            Self::Big(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
        }
    }

    /// Truncates toward zero into an `i128`.
    fn to_i128(&self, target: TypeId) -> Result<i128, ConversionError> {
        let out_of_range = || {
            ConversionError::range(self.render(), &type_label(target), bounds_text(target))
        };
        match self {
            Self::Integral(v) => Ok(*v),
            Self::Single(v) => float_to_i128(f64::from(*v), target),
            Self::Floating(v) => float_to_i128(*v, target),
            Self::Big(v) => v.to_i128().ok_or_else(out_of_range),
            Self::Decimal(v) => truncate_decimal(v)
                .and_then(|truncated| truncated.to_i128())
                .ok_or_else(out_of_range),
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            Self::Integral(v) => *v as f64,
            Self::Single(v) => f64::from(*v),
            Self::Floating(v) => *v,
            Self::Big(v) => v.to_f64().unwrap_or(f64::NAN),
            Self::Decimal(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }
}

fn float_to_i128(value: f64, target: TypeId) -> Result<i128, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::range(
            value,
            &type_label(target),
            "not a finite number",
        ));
    }
    let truncated = value.trunc();
    if truncated < -I128_LIMIT || truncated >= I128_LIMIT {
        return Err(ConversionError::range(
            value,
            &type_label(target),
            bounds_text(target),
        ));
    }
    Ok(truncated as i128)
}

/// Truncates toward zero; `None` when the magnitude is too large to expand.
fn truncate_decimal(value: &BigDecimal) -> Option<BigInt> {
    let (digits, scale) = value.as_bigint_and_exponent();
    if digits.is_zero() {
        return Some(BigInt::zero());
    }
    if scale < -MAX_EXPONENT {
        return None;
    }
    // |digits| < 2^bits <= 10^scale
    if scale > 0 && scale.unsigned_abs() >= digits.bits() {
        return Some(BigInt::zero());
    }
    let (truncated, _) = value.with_scale(0).into_bigint_and_exponent();
    Some(truncated)
}

/// Inclusive bounds of the fixed-width integral types and characters.
pub(crate) fn integral_bounds(target: TypeId) -> Option<(i128, i128)> {
    match target {
        TypeId::BYTE => Some((i128::from(i8::MIN), i128::from(i8::MAX))),
        TypeId::SHORT => Some((i128::from(i16::MIN), i128::from(i16::MAX))),
        TypeId::INT => Some((i128::from(i32::MIN), i128::from(i32::MAX))),
        TypeId::LONG => Some((i128::from(i64::MIN), i128::from(i64::MAX))),
        TypeId::CHAR => Some((0, i128::from(u16::MAX))),
        _ => None,
    }
}

/// Human-readable accepted range of a numeric target.
pub(crate) fn bounds_text(target: TypeId) -> SmolStr {
    match (target, integral_bounds(target)) {
        (_, Some((min, max))) => SmolStr::new(format!("{min} to {max}")),
        (TypeId::FLOAT | TypeId::DOUBLE, None) => SmolStr::new("a floating-point number"),
        (TypeId::BIG_INTEGER, None) => SmolStr::new("an integer"),
        _ => SmolStr::new("a decimal number"),
    }
}

fn narrow(value: i128, target: TypeId, shown: &Numeric) -> Result<Value, ConversionError> {
    let (min, max) = integral_bounds(target).ok_or_else(|| not_numeric(target))?;
    if value < min || value > max {
        return Err(ConversionError::range(
            shown.render(),
            &type_label(target),
            bounds_text(target),
        ));
    }
    Ok(match target {
        TypeId::BYTE => Value::Byte(value as i8),
        TypeId::SHORT => Value::Short(value as i16),
        TypeId::INT => Value::Int(value as i32),
        TypeId::LONG => Value::Long(value as i64),
        _ => Value::Char(value as u16),
    })
}

fn not_numeric(target: TypeId) -> ConversionError {
    ConversionError::NoConversionAvailable {
        from: SmolStr::new("Number"),
        to: type_label(target),
    }
}

/// Converts a numeric payload to `target`, checking ranges.
pub(crate) fn numeric_to(number: &Numeric, target: TypeId) -> Result<Value, ConversionError> {
    match target {
        TypeId::BYTE | TypeId::SHORT | TypeId::INT | TypeId::LONG | TypeId::CHAR => {
            narrow(number.to_i128(target)?, target, number)
        }
        TypeId::FLOAT => to_single(number),
        TypeId::DOUBLE => Ok(Value::Double(number.to_f64())),
        TypeId::BIG_INTEGER => to_big_integer(number).map(Value::BigInteger),
        TypeId::BIG_DECIMAL => to_big_decimal(number).map(Value::BigDecimal),
        TypeId::BOOL => Ok(Value::Bool(!number.is_zero())),
        _ => Err(not_numeric(target)),
    }
}

fn to_single(number: &Numeric) -> Result<Value, ConversionError> {
    if let Numeric::Single(v) = number {
        return Ok(Value::Float(*v));
    }
    let wide = number.to_f64();
    if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
        return Err(ConversionError::range(
            number.render(),
            "Float",
            "magnitude exceeds the Float maximum",
        ));
    }
    Ok(Value::Float(wide as f32))
}

fn to_big_integer(number: &Numeric) -> Result<BigInt, ConversionError> {
    match number {
        Numeric::Integral(v) => Ok(BigInt::from(*v)),
        Numeric::Single(_) | Numeric::Floating(_) => {
            let value = number.to_f64();
            if !value.is_finite() {
                return Err(ConversionError::range(value, "BigInteger", "not a finite number"));
            }
            BigInt::from_f64(value.trunc()).ok_or_else(|| {
                ConversionError::range(value, "BigInteger", "not a finite number")
            })
        }
        Numeric::Big(v) => Ok(v.clone()),
        Numeric::Decimal(v) => decimal_to_big_integer(v).ok_or_else(|| {
            ConversionError::range(v, "BigInteger", "exponent too large")
        }),
    }
}

pub(crate) fn decimal_to_big_integer(value: &BigDecimal) -> Option<BigInt> {
    truncate_decimal(value)
}

fn to_big_decimal(number: &Numeric) -> Result<BigDecimal, ConversionError> {
    let from_text = |text: String| {
        BigDecimal::from_str(&text)
            .map_err(|_| ConversionError::range(&text, "BigDecimal", "not a finite number"))
    };
    match number {
        Numeric::Integral(v) => Ok(BigDecimal::new(BigInt::from(*v), 0)),
        // Shortest round-trip rendering keeps 0.1f32 as 0.1.
        Numeric::Single(v) if v.is_finite() => from_text(v.to_string()),
        Numeric::Floating(v) if v.is_finite() => from_text(v.to_string()),
        Numeric::Single(_) | Numeric::Floating(_) => Err(ConversionError::range(
            number.render(),
            "BigDecimal",
            "not a finite number",
        )),
        Numeric::Big(v) => Ok(BigDecimal::new(v.clone(), 0)),
        Numeric::Decimal(v) => Ok(v.clone()),
    }
}

/// Reads text as a number of `target`.
///
/// Leading and trailing whitespace is ignored and empty text is zero. Integral
/// targets try a native parse first, then fall back to an exact decimal parse
/// truncated toward zero and checked against the target bounds.
pub(crate) fn parse_number(text: &str, target: TypeId) -> Result<Value, ConversionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return zero_value_for(target).ok_or_else(|| not_numeric(target));
    }
    let format_error = || ConversionError::NumberFormat {
        text: SmolStr::new(text),
        target: type_label(target),
        range: bounds_text(target),
    };

    match target {
        TypeId::FLOAT => trimmed
            .parse::<f32>()
            .map(Value::Float)
            .map_err(|_| format_error()),
        TypeId::DOUBLE => trimmed
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| format_error()),
        TypeId::BIG_DECIMAL => BigDecimal::from_str(trimmed)
            .map(Value::BigDecimal)
            .map_err(|_| format_error()),
        TypeId::BIG_INTEGER => match BigInt::from_str(trimmed) {
            Ok(value) => Ok(Value::BigInteger(value)),
            Err(_) => BigDecimal::from_str(trimmed)
                .ok()
                .and_then(|decimal| decimal_to_big_integer(&decimal))
                .map(Value::BigInteger)
                .ok_or_else(format_error),
        },
        _ => {
            let (min, max) = integral_bounds(target).ok_or_else(|| not_numeric(target))?;
            let value = trimmed
                .parse::<i64>()
                .ok()
                .map(i128::from)
                .or_else(|| parse_integral_precise(trimmed))
                .ok_or_else(format_error)?;
            if value < min || value > max {
                return Err(format_error());
            }
            narrow(value, target, &Numeric::Integral(value))
        }
    }
}

fn parse_integral_precise(text: &str) -> Option<i128> {
    let decimal = BigDecimal::from_str(text).ok()?;
    truncate_decimal(&decimal)?.to_i128()
}
