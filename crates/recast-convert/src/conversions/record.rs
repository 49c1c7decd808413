//! Record (`Map`) form of temporal values: `seconds` then `nanos`.
//!
//! Local values are pinned to the context zone (local dates to the local-date
//! zone) like every other pair conversion.

use indexmap::IndexMap;
use recast_types::TypeId;
use smol_str::SmolStr;

use crate::context::ConversionContext;
use crate::error::ConversionError;
use crate::numeric::{numeric_to, Numeric};
use crate::registry::EdgeTable;
use crate::value::{EpochPair, Value};

use super::time::{from_pair, to_pair};
use super::util::{label, unsupported};

const SECONDS_KEY: &str = "seconds";
const NANOS_KEY: &str = "nanos";

const RECORD_TYPES: [TypeId; 7] = [
    TypeId::DURATION,
    TypeId::INSTANT,
    TypeId::TIMESTAMP,
    TypeId::DATE,
    TypeId::LOCAL_DATE,
    TypeId::LOCAL_DATE_TIME,
    TypeId::OFFSET_DATE_TIME,
];

pub(super) fn register(table: &mut EdgeTable) {
    for ty in RECORD_TYPES {
        table.add(ty, TypeId::MAP, |value, ctx| {
            let pair = to_pair(value, ctx)?;
            let mut record = IndexMap::with_capacity(2);
            record.insert(SmolStr::new(SECONDS_KEY), Value::Long(pair.seconds()));
            record.insert(SmolStr::new(NANOS_KEY), Value::Int(pair.nanos() as i32));
            Ok(Value::Map(record))
        });
        table.add(TypeId::MAP, ty, move |value, ctx| from_record(value, ty, ctx));
    }
}

fn from_record(
    value: &Value,
    target: TypeId,
    ctx: &ConversionContext,
) -> Result<Value, ConversionError> {
    let record = value.as_map().ok_or_else(|| unsupported(value, target))?;
    let seconds = record
        .get(SECONDS_KEY)
        .ok_or_else(|| missing_entry(record, target))
        .and_then(|entry| entry_as_long(entry, SECONDS_KEY, target))?;
    let nanos = match record.get(NANOS_KEY) {
        Some(entry) => entry_as_long(entry, NANOS_KEY, target)?,
        None => 0,
    };
    from_pair(EpochPair::new(seconds, nanos)?, target, ctx)
}

fn entry_as_long(entry: &Value, key: &str, target: TypeId) -> Result<i64, ConversionError> {
    let number = Numeric::of(entry).ok_or_else(|| {
        ConversionError::malformed(
            &format!("{entry:?}"),
            &label(target),
            format!("'{key}' must be a number"),
        )
    })?;
    match numeric_to(&number, TypeId::LONG)? {
        Value::Long(v) => Ok(v),
        other => Err(unsupported(&other, target)),
    }
}

fn missing_entry(record: &IndexMap<SmolStr, Value>, target: TypeId) -> ConversionError {
    let keys: Vec<&str> = record.keys().map(SmolStr::as_str).collect();
    ConversionError::malformed(
        &format!("{{{}}}", keys.join(", ")),
        &label(target),
        format!("missing '{SECONDS_KEY}' entry"),
    )
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime, offset};

    use super::*;

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
    fn records_hold_seconds_then_nanos() {
        let instant = Value::Instant(datetime!(1969-12-31 23:59:59.5 UTC));
        let record = run(TypeId::INSTANT, TypeId::MAP, instant).unwrap();
        let keys: Vec<_> = record.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec![SmolStr::new("seconds"), SmolStr::new("nanos")]);
        assert_eq!(
            record,
            Value::record([("seconds", Value::Long(-1)), ("nanos", Value::Int(500_000_000))])
        );
    }

    #[test]
    fn local_values_use_context_zones() {
        let ctx = ConversionContext::builder()
            .zone(offset!(+2))
            .local_date_zone(offset!(-5))
            .build();

        let date = Value::LocalDate(date!(1969-12-31));
        let record = run_with(TypeId::LOCAL_DATE, TypeId::MAP, date.clone(), &ctx).unwrap();
        assert_eq!(
            record,
            Value::record([("seconds", Value::Long(-68_400)), ("nanos", Value::Int(0))])
        );
        assert_eq!(run_with(TypeId::MAP, TypeId::LOCAL_DATE, record, &ctx).unwrap(), date);

        let local = Value::LocalDateTime(datetime!(1970-01-01 01:59:59.5));
        let record = run_with(TypeId::LOCAL_DATE_TIME, TypeId::MAP, local.clone(), &ctx).unwrap();
        assert_eq!(
            record,
            Value::record([("seconds", Value::Long(-1)), ("nanos", Value::Int(500_000_000))])
        );
        assert_eq!(run_with(TypeId::MAP, TypeId::LOCAL_DATE_TIME, record, &ctx).unwrap(), local);
    }

    #[test]
    fn nanos_default_to_zero() {
        let record = Value::record([("seconds", Value::Int(90))]);
        assert_eq!(
            run(TypeId::MAP, TypeId::DURATION, record).unwrap(),
            Value::Duration(time::Duration::seconds(90))
        );
    }

    #[test]
    fn invalid_records() {
        let missing = Value::record([("nanos", Value::Int(1))]);
        assert!(matches!(
            run(TypeId::MAP, TypeId::INSTANT, missing),
            Err(ConversionError::Malformed { .. })
        ));

        let overflow = Value::record([("seconds", Value::Long(0)), ("nanos", Value::Long(1_000_000_000))]);
        assert!(matches!(
            run(TypeId::MAP, TypeId::INSTANT, overflow),
            Err(ConversionError::Range { .. })
        ));

        let text = Value::record([("seconds", Value::from("soon"))]);
        assert!(matches!(
            run(TypeId::MAP, TypeId::DATE, text),
            Err(ConversionError::Malformed { .. })
        ));
    }
}
