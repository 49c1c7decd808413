use num_bigint::{BigInt, Sign};
use recast_types::TypeId;
use uuid::Uuid;

use crate::error::ConversionError;
use crate::registry::EdgeTable;
use crate::value::Value;

use super::util::{text_of, unsupported};

pub(super) fn register(table: &mut EdgeTable) {
    table.add(TypeId::STRING, TypeId::UUID, |value, _| {
        let text = text_of(value, TypeId::UUID)?.trim();
        Uuid::try_parse(text)
            .map(Value::Uuid)
            .map_err(|err| ConversionError::malformed(text, "UUID", err))
    });
    table.add(TypeId::UUID, TypeId::STRING, |value, _| match value {
        Value::Uuid(id) => Ok(Value::from(id.hyphenated().to_string())),
        _ => Err(unsupported(value, TypeId::STRING)),
    });
    table.add(TypeId::BIG_INTEGER, TypeId::UUID, |value, _| match value {
        Value::BigInteger(magnitude) => uuid_from_big_integer(magnitude).map(Value::Uuid),
        _ => Err(unsupported(value, TypeId::UUID)),
    });
    table.add(TypeId::UUID, TypeId::BIG_INTEGER, |value, _| match value {
        Value::Uuid(id) => Ok(Value::BigInteger(BigInt::from(id.as_u128()))),
        _ => Err(unsupported(value, TypeId::BIG_INTEGER)),
    });
}

/// Renders the magnitude as 32 zero-padded hex digits grouped 8-4-4-4-12.
fn uuid_from_big_integer(magnitude: &BigInt) -> Result<Uuid, ConversionError> {
    if magnitude.sign() == Sign::Minus {
        return Err(ConversionError::range(
            magnitude,
            "UUID",
            "negative values have no UUID form",
        ));
    }
    let hex = format!("{:0>32}", magnitude.to_str_radix(16));
    if hex.len() > 32 {
        return Err(ConversionError::range(
            magnitude,
            "UUID",
            "magnitude exceeds 128 bits",
        ));
    }
    let grouped = format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    );
    Uuid::try_parse(&grouped).map_err(|err| ConversionError::malformed(&grouped, "UUID", err))
}
