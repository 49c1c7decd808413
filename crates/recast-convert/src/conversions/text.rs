use recast_types::TypeId;
use smol_str::SmolStr;

use crate::error::ConversionError;
use crate::numeric::{bounds_text, parse_number};
use crate::registry::EdgeTable;
use crate::value::Value;

use super::util::{label, text_of, unsupported, NUMERIC_TYPES};

pub(super) fn register(table: &mut EdgeTable) {
    for target in NUMERIC_TYPES {
        table.add(TypeId::STRING, target, move |value, _| {
            parse_number(text_of(value, target)?, target)
        });
    }
    table.add(TypeId::STRING, TypeId::BOOL, |value, _| {
        Ok(Value::Bool(parse_bool(text_of(value, TypeId::BOOL)?)))
    });
    table.add(TypeId::STRING, TypeId::CHAR, |value, _| {
        parse_char(text_of(value, TypeId::CHAR)?)
    });
    table.add(TypeId::STRING, TypeId::TYPE, |value, ctx| {
        let name = text_of(value, TypeId::TYPE)?.trim();
        ctx.lookup_type(name)
            .map(Value::Type)
            .ok_or_else(|| ConversionError::UnknownType(SmolStr::new(name)))
    });

    table.add(TypeId::NUMBER, TypeId::STRING, |value, _| {
        number_text(value).map(Value::String)
    });
    table.add(TypeId::BOOL, TypeId::STRING, |value, _| match value {
        Value::Bool(v) => Ok(Value::from(if *v { "true" } else { "false" })),
        _ => Err(unsupported(value, TypeId::STRING)),
    });
    table.add(TypeId::CHAR, TypeId::STRING, |value, _| match value {
        Value::Char(unit) => Ok(Value::from(String::from_utf16_lossy(&[*unit]))),
        _ => Err(unsupported(value, TypeId::STRING)),
    });
    table.add(TypeId::TYPE, TypeId::STRING, |value, ctx| match value {
        Value::Type(id) => Ok(Value::String(ctx.type_name(*id))),
        _ => Err(unsupported(value, TypeId::STRING)),
    });
    table.add(TypeId::ENUM, TypeId::STRING, |value, _| match value {
        Value::Enum(variant) => Ok(Value::String(variant.variant.clone())),
        _ => Err(unsupported(value, TypeId::STRING)),
    });
}

/// `true`, `t`, `y` (any case) and `1` are true; everything else is false.
fn parse_bool(text: &str) -> bool {
    let text = text.trim();
    text == "1"
        || text.eq_ignore_ascii_case("true")
        || text.eq_ignore_ascii_case("t")
        || text.eq_ignore_ascii_case("y")
}

/// Surrounding whitespace is ignored; longer text is read as a code unit number.
fn parse_char(text: &str) -> Result<Value, ConversionError> {
    let trimmed = text.trim();
    let mut units = trimmed.encode_utf16();
    match (units.next(), units.next()) {
        (None, _) => Ok(Value::Char(0)),
        (Some(unit), None) => Ok(Value::Char(unit)),
        _ => parse_number(trimmed, TypeId::CHAR).map_err(|_| ConversionError::NumberFormat {
            text: SmolStr::new(text),
            target: label(TypeId::CHAR),
            range: bounds_text(TypeId::CHAR),
        }),
    }
}

fn number_text(value: &Value) -> Result<SmolStr, ConversionError> {
    let text = match value {
        Value::Byte(v) => v.to_string(),
        Value::Short(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Long(v) => v.to_string(),
        Value::Float(v) => format!("{v:?}"),
        Value::Double(v) => format!("{v:?}"),
        Value::BigInteger(v) => v.to_string(),
        Value::BigDecimal(v) => v.to_plain_string(),
        _ => return Err(unsupported(value, TypeId::STRING)),
    };
    Ok(SmolStr::new(text))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use bigdecimal::BigDecimal;
    use recast_types::TypeRegistry;

    use super::*;
    use crate::context::{ConversionContext, TypeLookup};
    use crate::value::EnumValue;

    fn run(from: TypeId, to: TypeId, value: Value) -> Result<Value, ConversionError> {
        run_with(from, to, value, &ConversionContext::default())
    }

    fn run_with(
        from: TypeId,
        to: TypeId,
        value: Value,
        ctx: &ConversionContext,
    ) -> Result<Value, ConversionError> {
        let mut table = EdgeTable::default();
        register(&mut table);
        let func = table.get(from, to).unwrap();
        func(&value, ctx)
    }

    #[test]
    fn lenient_booleans() {
        for text in ["true", "T", "y", "1", " TRUE "] {
            assert_eq!(
                run(TypeId::STRING, TypeId::BOOL, Value::from(text)).unwrap(),
                Value::Bool(true),
                "{text}"
            );
        }
        for text in ["", "no", "0", "yes"] {
            assert_eq!(
                run(TypeId::STRING, TypeId::BOOL, Value::from(text)).unwrap(),
                Value::Bool(false),
                "{text}"
            );
        }
    }

    #[test]
    fn characters_from_text() {
        assert_eq!(
            run(TypeId::STRING, TypeId::CHAR, Value::from("")).unwrap(),
            Value::Char(0)
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::CHAR, Value::from("5")).unwrap(),
            Value::Char(u16::from(b'5'))
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::CHAR, Value::from("65")).unwrap(),
            Value::Char(65)
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::CHAR, Value::from(" ")).unwrap(),
            Value::Char(0)
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::CHAR, Value::from("  ")).unwrap(),
            Value::Char(0)
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::CHAR, Value::from(" A ")).unwrap(),
            Value::Char(u16::from(b'A'))
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::CHAR, Value::from(" 66 ")).unwrap(),
            Value::Char(66)
        );
        let err = run(TypeId::STRING, TypeId::CHAR, Value::from("70000")).unwrap_err();
        assert!(matches!(err, ConversionError::NumberFormat { .. }));
    }

    #[test]
    fn numbers_render_canonically() {
        assert_eq!(
            run(TypeId::NUMBER, TypeId::STRING, Value::Double(1.0)).unwrap(),
            Value::from("1.0")
        );
        assert_eq!(
            run(TypeId::NUMBER, TypeId::STRING, Value::Byte(-5)).unwrap(),
            Value::from("-5")
        );
        let decimal = BigDecimal::from_str("1E+3").unwrap();
        assert_eq!(
            run(TypeId::NUMBER, TypeId::STRING, Value::BigDecimal(decimal)).unwrap(),
            Value::from("1000")
        );
    }

    #[test]
    fn type_names_use_context_lookup() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("Shape", &[]).unwrap();
        let ctx = ConversionContext::builder()
            .type_lookup(TypeLookup::Registered(Arc::new(registry)))
            .build();

        assert_eq!(
            run_with(TypeId::STRING, TypeId::TYPE, Value::from("Shape"), &ctx).unwrap(),
            Value::Type(shape)
        );
        assert_eq!(
            run_with(TypeId::TYPE, TypeId::STRING, Value::Type(shape), &ctx).unwrap(),
            Value::from("Shape")
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::TYPE, Value::from("Shape")).unwrap_err(),
            ConversionError::UnknownType("Shape".into())
        );
    }

    #[test]
    fn enums_render_variant_name() {
        let value = Value::Enum(EnumValue {
            type_id: TypeId(100),
            variant: "RED".into(),
        });
        assert_eq!(
            run(TypeId::ENUM, TypeId::STRING, value).unwrap(),
            Value::from("RED")
        );
    }
}
