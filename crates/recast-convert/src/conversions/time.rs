//! Temporal conversions.
//!
//! Points in time and durations travel through [`EpochPair`]. Zone-less values
//! are pinned to the context zone (local dates to the local-date zone).

use std::fmt::Write as _;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use recast_types::TypeId;
use smol_str::SmolStr;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::context::ConversionContext;
use crate::error::ConversionError;
use crate::numeric::{decimal_to_big_integer, numeric_to, Numeric};
use crate::registry::EdgeTable;
use crate::value::{EpochPair, MonthDay, Value, NANOS_PER_SECOND};

use super::util::{label, text_of, unsupported};

/// Types that map onto a point on the time line.
const POINT_TYPES: [TypeId; 6] = [
    TypeId::INSTANT,
    TypeId::TIMESTAMP,
    TypeId::DATE,
    TypeId::LOCAL_DATE,
    TypeId::LOCAL_DATE_TIME,
    TypeId::OFFSET_DATE_TIME,
];

const UNIX_EPOCH_JULIAN_DAY: i64 = 2_440_588;
const SECONDS_PER_DAY: i128 = 86_400;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]");
const LOCAL_DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);
const LOCAL_DATE_TIME_SPACED_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);

pub(super) fn register(table: &mut EdgeTable) {
    for from in POINT_TYPES {
        for to in POINT_TYPES.into_iter().chain([TypeId::LOCAL_TIME]) {
            if from != to {
                table.add(from, to, move |value, ctx| {
                    from_pair(to_pair(value, ctx)?, to, ctx)
                });
            }
        }
    }
    table.add(TypeId::LOCAL_DATE, TypeId::MONTH_DAY, |value, _| match value {
        Value::LocalDate(date) => MonthDay::new(u8::from(date.month()), date.day()).map(Value::MonthDay),
        _ => Err(unsupported(value, TypeId::MONTH_DAY)),
    });

    register_numeric(table);
    register_text(table);
}

fn register_numeric(table: &mut EdgeTable) {
    for to in POINT_TYPES.into_iter().chain([TypeId::DURATION]) {
        table.add(TypeId::NUMBER, to, move |value, ctx| number_to_temporal(value, to, ctx));
    }
    for from in POINT_TYPES.into_iter().chain([TypeId::DURATION]) {
        table.add(from, TypeId::LONG, |value, ctx| epoch_long(value, ctx).map(Value::Long));
        table.add(from, TypeId::DOUBLE, |value, ctx| {
            epoch_double(value, ctx).map(Value::Double)
        });
        table.add(from, TypeId::FLOAT, |value, ctx| {
            epoch_double(value, ctx).map(|v| Value::Float(v as f32))
        });
    }

    // Exact nanosecond counts and fractional seconds.
    for ty in [TypeId::INSTANT, TypeId::TIMESTAMP, TypeId::DURATION] {
        table.add(ty, TypeId::BIG_INTEGER, |value, ctx| {
            Ok(Value::BigInteger(BigInt::from(to_pair(value, ctx)?.total_nanos())))
        });
        table.add(ty, TypeId::BIG_DECIMAL, |value, ctx| {
            let nanos = BigInt::from(to_pair(value, ctx)?.total_nanos());
            Ok(Value::BigDecimal(BigDecimal::new(nanos, 9).normalized()))
        });
        table.add(TypeId::BIG_INTEGER, ty, move |value, ctx| match value {
            Value::BigInteger(nanos) => from_pair(EpochPair::from_big_nanos(nanos)?, ty, ctx),
            _ => Err(unsupported(value, ty)),
        });
        table.add(TypeId::BIG_DECIMAL, ty, move |value, ctx| match value {
            Value::BigDecimal(seconds) => {
                let scaled = seconds * BigDecimal::from(NANOS_PER_SECOND);
                let nanos = decimal_to_big_integer(&scaled).ok_or_else(|| {
                    ConversionError::range(seconds, &label(ty), "exponent too large")
                })?;
                from_pair(EpochPair::from_big_nanos(&nanos)?, ty, ctx)
            }
            _ => Err(unsupported(value, ty)),
        });
    }
    for from in [TypeId::FLOAT, TypeId::DOUBLE] {
        table.add(from, TypeId::TIMESTAMP, |value, ctx| {
            let seconds = match value {
                Value::Float(v) => f64::from(*v),
                Value::Double(v) => *v,
                _ => return Err(unsupported(value, TypeId::TIMESTAMP)),
            };
            from_pair(seconds_to_pair(seconds)?, TypeId::TIMESTAMP, ctx)
        });
    }
}

fn register_text(table: &mut EdgeTable) {
    for ty in [
        TypeId::INSTANT,
        TypeId::TIMESTAMP,
        TypeId::DATE,
        TypeId::OFFSET_DATE_TIME,
    ] {
        table.add(TypeId::STRING, ty, move |value, ctx| {
            let text = text_of(value, ty)?;
            match parse_point(text, ty, ctx)? {
                None => Ok(Value::Null),
                Some(parsed) if ty == TypeId::OFFSET_DATE_TIME => Ok(Value::OffsetDateTime(parsed)),
                Some(parsed) => from_pair(EpochPair::from_datetime(parsed), ty, ctx),
            }
        });
        table.add(ty, TypeId::STRING, move |value, _| match value {
            Value::Instant(v) | Value::Timestamp(v) | Value::Date(v) | Value::OffsetDateTime(v) => v
                .format(&Rfc3339)
                .map(Value::from)
                .map_err(|err| ConversionError::range(v, &label(ty), err.to_string())),
            _ => Err(unsupported(value, TypeId::STRING)),
        });
    }

    add_text_pair(table, TypeId::LOCAL_DATE, parse_local_date, |value| match value {
        Value::LocalDate(date) => format_date(*date),
        _ => None,
    });
    add_text_pair(
        table,
        TypeId::LOCAL_TIME,
        |text, _| {
            Time::parse(text, TIME_FORMAT)
                .map(Value::LocalTime)
                .map_err(|err| ConversionError::malformed(text, "LocalTime", err))
        },
        |value| match value {
            Value::LocalTime(time) => Some(format_time(*time)),
            _ => None,
        },
    );
    add_text_pair(
        table,
        TypeId::LOCAL_DATE_TIME,
        |text, ctx| match parse_local_date_time(text) {
            Some(local) => Ok(Value::LocalDateTime(local)),
            None => parse_point_as(text, TypeId::LOCAL_DATE_TIME, ctx),
        },
        |value| match value {
            Value::LocalDateTime(v) => {
                format_date(v.date()).map(|date| format!("{date}T{}", format_time(v.time())))
            }
            _ => None,
        },
    );
    add_text_pair(
        table,
        TypeId::DURATION,
        |text, _| parse_duration(text).map(Value::Duration),
        |value| match value {
            Value::Duration(v) => Some(format_duration(*v)),
            _ => None,
        },
    );
    add_text_pair(
        table,
        TypeId::MONTH_DAY,
        |text, _| parse_month_day(text),
        |value| match value {
            Value::MonthDay(v) => Some(v.to_string()),
            _ => None,
        },
    );
}

/// Registers `STRING <-> ty`; empty text reads as null.
fn add_text_pair(
    table: &mut EdgeTable,
    ty: TypeId,
    parse: fn(&str, &ConversionContext) -> Result<Value, ConversionError>,
    format: fn(&Value) -> Option<String>,
) {
    table.add(TypeId::STRING, ty, move |value, ctx| {
        let text = text_of(value, ty)?.trim();
        if text.is_empty() {
            return Ok(Value::Null);
        }
        parse(text, ctx)
    });
    table.add(ty, TypeId::STRING, move |value, _| {
        format(value)
            .map(Value::from)
            .ok_or_else(|| unsupported(value, TypeId::STRING))
    });
}

pub(super) fn to_pair(value: &Value, ctx: &ConversionContext) -> Result<EpochPair, ConversionError> {
    match value {
        Value::Instant(v) | Value::Timestamp(v) | Value::Date(v) | Value::OffsetDateTime(v) => {
            Ok(EpochPair::from_datetime(*v))
        }
        Value::LocalDateTime(v) => Ok(EpochPair::from_datetime(v.assume_offset(ctx.zone()))),
        Value::LocalDate(v) => Ok(EpochPair::from_datetime(
            v.midnight().assume_offset(ctx.local_date_zone()),
        )),
        Value::Duration(v) => EpochPair::from_duration(*v),
        _ => Err(unsupported(value, TypeId::TEMPORAL)),
    }
}

pub(super) fn from_pair(
    pair: EpochPair,
    target: TypeId,
    ctx: &ConversionContext,
) -> Result<Value, ConversionError> {
    match target {
        TypeId::INSTANT => pair.to_datetime().map(Value::Instant),
        TypeId::TIMESTAMP => pair.to_datetime().map(Value::Timestamp),
        TypeId::DATE => pair.truncate_millis().to_datetime().map(Value::Date),
        TypeId::OFFSET_DATE_TIME => in_zone(pair, ctx.zone()).map(Value::OffsetDateTime),
        TypeId::LOCAL_DATE_TIME => in_zone(pair, ctx.zone())
            .map(|v| Value::LocalDateTime(PrimitiveDateTime::new(v.date(), v.time()))),
        TypeId::LOCAL_DATE => in_zone(pair, ctx.local_date_zone()).map(|v| Value::LocalDate(v.date())),
        TypeId::LOCAL_TIME => in_zone(pair, ctx.zone()).map(|v| Value::LocalTime(v.time())),
        TypeId::DURATION => Ok(Value::Duration(pair.to_duration())),
        _ => Err(ConversionError::NoConversionAvailable {
            from: SmolStr::new("EpochPair"),
            to: label(target),
        }),
    }
}

/// Wall-clock view of `pair` at a fixed offset.
fn in_zone(pair: EpochPair, zone: UtcOffset) -> Result<OffsetDateTime, ConversionError> {
    let shift = i128::from(zone.whole_seconds()) * i128::from(NANOS_PER_SECOND);
    let local = EpochPair::from_nanos(pair.total_nanos() + shift)?.to_datetime()?;
    Ok(PrimitiveDateTime::new(local.date(), local.time()).assume_offset(zone))
}

fn epoch_day(date: Date) -> i64 {
    i64::from(date.to_julian_day()) - UNIX_EPOCH_JULIAN_DAY
}

fn date_from_epoch_day(day: i64) -> Result<Date, ConversionError> {
    i32::try_from(day + UNIX_EPOCH_JULIAN_DAY)
        .ok()
        .and_then(|julian| Date::from_julian_day(julian).ok())
        .ok_or_else(|| ConversionError::range(day, "LocalDate", "epoch day outside the supported calendar"))
}

/// Epoch milliseconds, or the epoch day for local dates.
fn epoch_long(value: &Value, ctx: &ConversionContext) -> Result<i64, ConversionError> {
    match value {
        Value::LocalDate(date) => Ok(epoch_day(*date)),
        _ => to_pair(value, ctx)?.to_millis(),
    }
}

/// Like [`epoch_long`], except timestamps give fractional epoch seconds.
fn epoch_double(value: &Value, ctx: &ConversionContext) -> Result<f64, ConversionError> {
    match value {
        Value::Timestamp(v) => Ok(EpochPair::from_datetime(*v).as_f64_seconds()),
        _ => epoch_long(value, ctx).map(|v| v as f64),
    }
}

fn seconds_to_pair(seconds: f64) -> Result<EpochPair, ConversionError> {
    let nanos = (seconds * f64::from(NANOS_PER_SECOND)).round();
    if !nanos.is_finite() || nanos.abs() >= 9.2e27 {
        return Err(ConversionError::range(seconds, "Timestamp", "seconds out of range"));
    }
    EpochPair::from_nanos(nanos as i128)
}

/// Numbers are epoch milliseconds, epoch days for local dates and
/// milliseconds for durations.
fn number_to_temporal(
    value: &Value,
    target: TypeId,
    ctx: &ConversionContext,
) -> Result<Value, ConversionError> {
    let number = Numeric::of(value).ok_or_else(|| unsupported(value, target))?;
    let Value::Long(count) = numeric_to(&number, TypeId::LONG)? else {
        return Err(unsupported(value, target));
    };
    match target {
        TypeId::LOCAL_DATE => date_from_epoch_day(count).map(Value::LocalDate),
        TypeId::DURATION => Ok(Value::Duration(time::Duration::milliseconds(count))),
        _ => from_pair(EpochPair::from_millis(count), target, ctx),
    }
}

/// Reads RFC 3339 text, then local date-time and date forms in the context
/// zone. Empty text is `None`.
fn parse_point(
    text: &str,
    target: TypeId,
    ctx: &ConversionContext,
) -> Result<Option<OffsetDateTime>, ConversionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(Some(parsed));
    }
    if let Some(local) = parse_local_date_time(trimmed) {
        return Ok(Some(local.assume_offset(ctx.zone())));
    }
    if let Ok(date) = Date::parse(trimmed, DATE_FORMAT) {
        return Ok(Some(date.midnight().assume_offset(ctx.zone())));
    }
    Err(ConversionError::malformed(
        text,
        &label(target),
        "expected RFC 3339, yyyy-MM-ddTHH:mm[:ss[.f]] or yyyy-MM-dd",
    ))
}

fn parse_local_date_time(text: &str) -> Option<PrimitiveDateTime> {
    PrimitiveDateTime::parse(text, LOCAL_DATE_TIME_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(text, LOCAL_DATE_TIME_SPACED_FORMAT))
        .ok()
}

/// A plain date, or any point-in-time text projected into the local-date zone.
fn parse_local_date(text: &str, ctx: &ConversionContext) -> Result<Value, ConversionError> {
    match Date::parse(text, DATE_FORMAT) {
        Ok(date) => Ok(Value::LocalDate(date)),
        Err(_) => parse_point_as(text, TypeId::LOCAL_DATE, ctx),
    }
}

fn parse_point_as(
    text: &str,
    target: TypeId,
    ctx: &ConversionContext,
) -> Result<Value, ConversionError> {
    match parse_point(text, target, ctx)? {
        Some(point) => from_pair(EpochPair::from_datetime(point), target, ctx),
        None => Ok(Value::Null),
    }
}

fn parse_month_day(text: &str) -> Result<Value, ConversionError> {
    let malformed = |reason: &str| ConversionError::malformed(text, "MonthDay", reason);
    let (month, day) = text
        .strip_prefix("--")
        .and_then(|rest| rest.split_once('-'))
        .ok_or_else(|| malformed("expected --MM-dd"))?;
    let month: u8 = month.parse().map_err(|_| malformed("invalid month"))?;
    let day: u8 = day.parse().map_err(|_| malformed("invalid day"))?;
    MonthDay::new(month, day)
        .map(Value::MonthDay)
        .map_err(|err| ConversionError::malformed(text, "MonthDay", err.root_cause()))
}

fn format_date(date: Date) -> Option<String> {
    date.format(DATE_FORMAT).ok()
}

fn format_time(time: Time) -> String {
    let mut out = format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    push_fraction(&mut out, time.nanosecond());
    out
}

fn push_fraction(out: &mut String, nanos: u32) {
    if nanos > 0 {
        let digits = format!("{nanos:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
}

/// ISO-8601 `[-]PTnHnMn.nS`; zero is `PT0S`.
fn format_duration(value: time::Duration) -> String {
    let total = value.whole_nanoseconds();
    if total == 0 {
        return "PT0S".to_string();
    }
    let magnitude = total.unsigned_abs();
    let seconds = magnitude / u128::from(NANOS_PER_SECOND);
    let nanos = (magnitude % u128::from(NANOS_PER_SECOND)) as u32;
    let (hours, minutes, seconds) = (seconds / 3_600, (seconds % 3_600) / 60, seconds % 60);

    let mut out = String::from(if total < 0 { "-PT" } else { "PT" });
    if hours > 0 {
        let _ = write!(out, "{hours}H");
    }
    if minutes > 0 {
        let _ = write!(out, "{minutes}M");
    }
    if seconds > 0 || nanos > 0 {
        let _ = write!(out, "{seconds}");
        push_fraction(&mut out, nanos);
        out.push('S');
    }
    out
}

const DATE_UNITS: &[(char, i128)] = &[('D', SECONDS_PER_DAY)];
const TIME_UNITS: &[(char, i128)] = &[('H', 3_600), ('M', 60), ('S', 1)];

/// Reads ISO-8601 `[-]PnDTnHnMn.nS`; each component may carry its own sign.
fn parse_duration(text: &str) -> Result<time::Duration, ConversionError> {
    let malformed = |reason: &str| ConversionError::malformed(text, "Duration", reason);
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let rest = rest
        .strip_prefix(['P', 'p'])
        .ok_or_else(|| malformed("missing 'P' designator"))?;
    let (date_part, time_part) = match rest.split_once(['T', 't']) {
        Some((_, time)) if time.is_empty() => return Err(malformed("empty time section")),
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };
    if date_part.is_empty() && time_part.is_empty() {
        return Err(malformed("no components"));
    }

    let total = duration_section(date_part, DATE_UNITS, text)?
        .checked_add(duration_section(time_part, TIME_UNITS, text)?)
        .ok_or_else(|| malformed("overflow"))?;
    let total = if negative { -total } else { total };
    Ok(EpochPair::from_nanos(total)?.to_duration())
}

/// Sums the components of one section as nanoseconds; units must appear in
/// the listed order.
fn duration_section(
    section: &str,
    units: &[(char, i128)],
    text: &str,
) -> Result<i128, ConversionError> {
    let malformed = |reason: String| ConversionError::malformed(text, "Duration", reason);
    let mut remaining_units = units;
    let mut rest = section;
    let mut total: i128 = 0;
    while !rest.is_empty() {
        let end = rest
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| malformed(format!("missing unit after '{rest}'")))?;
        let (number, tail) = rest.split_at(end);
        let unit = tail[..1].to_ascii_uppercase();
        let unit = unit.chars().next().unwrap_or('?');
        let position = remaining_units
            .iter()
            .position(|(candidate, _)| *candidate == unit)
            .ok_or_else(|| malformed(format!("unexpected unit '{unit}'")))?;
        let seconds_per_unit = remaining_units[position].1;
        remaining_units = &remaining_units[position + 1..];

        let nanos = scaled_component(number, seconds_per_unit, unit == 'S')
            .ok_or_else(|| malformed(format!("invalid component '{number}{unit}'")))?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| malformed("overflow".to_string()))?;
        rest = &tail[1..];
    }
    Ok(total)
}

fn scaled_component(number: &str, seconds_per_unit: i128, allow_fraction: bool) -> Option<i128> {
    let (whole, fraction) = match number.split_once(['.', ',']) {
        Some((whole, fraction)) if allow_fraction => (whole, fraction),
        Some(_) => return None,
        None => (number, ""),
    };
    if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let negative = whole.starts_with('-');
    let whole: i128 = whole.parse().ok()?;
    let mut fraction_nanos: i128 = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<9}").parse().ok()?
    };
    if negative {
        fraction_nanos = -fraction_nanos;
    }
    whole
        .checked_mul(seconds_per_unit)?
        .checked_mul(i128::from(NANOS_PER_SECOND))?
        .checked_add(fraction_nanos)
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime, offset, time};

    use super::*;

    fn table() -> EdgeTable {
        let mut table = EdgeTable::default();
        register(&mut table);
        table
    }

    fn run(from: TypeId, to: TypeId, value: Value) -> Result<Value, ConversionError> {
        run_with(from, to, value, &ConversionContext::default())
    }

    fn run_with(
        from: TypeId,
        to: TypeId,
        value: Value,
        ctx: &ConversionContext,
    ) -> Result<Value, ConversionError> {
        let table = table();
        let func = table.get(from, to).unwrap();
        func(&value, ctx)
    }

    #[test]
    fn durations_round_trip_through_text() {
        let value = time::Duration::new(3_723, 500_000_000);
        let text = format_duration(value);
        assert_eq!(text, "PT1H2M3.5S");
        assert_eq!(parse_duration(&text).unwrap(), value);

        assert_eq!(format_duration(time::Duration::ZERO), "PT0S");
        assert_eq!(format_duration(time::Duration::milliseconds(-1_500)), "-PT1.5S");
        assert_eq!(
            parse_duration("P2DT-1M").unwrap(),
            time::Duration::seconds(2 * 86_400 - 60)
        );
        assert_eq!(parse_duration("-PT0.25S").unwrap(), time::Duration::milliseconds(-250));
    }

    #[test]
    fn malformed_durations() {
        for text in ["", "P", "PT", "1H", "PT1X", "PT1S2M", "PT1.5M", "P1.5D"] {
            assert!(parse_duration(text).is_err(), "{text}");
        }
    }

    #[test]
    fn local_date_uses_local_date_zone() {
        let ctx = ConversionContext::builder()
            .zone(offset!(+10))
            .local_date_zone(UtcOffset::UTC)
            .build();
        let instant = Value::Instant(datetime!(2024-03-01 22:00 UTC));

        assert_eq!(
            run_with(TypeId::INSTANT, TypeId::LOCAL_DATE, instant.clone(), &ctx).unwrap(),
            Value::LocalDate(date!(2024-03-01))
        );
        assert_eq!(
            run_with(TypeId::INSTANT, TypeId::LOCAL_DATE_TIME, instant, &ctx).unwrap(),
            Value::LocalDateTime(datetime!(2024-03-02 08:00))
        );
    }

    #[test]
    fn dates_drop_sub_millisecond_precision() {
        let stamp = Value::Timestamp(datetime!(2024-01-01 0:00:00.123456789 UTC));
        assert_eq!(
            run(TypeId::TIMESTAMP, TypeId::DATE, stamp).unwrap(),
            Value::Date(datetime!(2024-01-01 0:00:00.123 UTC))
        );
    }

    #[test]
    fn numbers_are_epoch_millis_and_days() {
        assert_eq!(
            run(TypeId::NUMBER, TypeId::INSTANT, Value::Long(1_500)).unwrap(),
            Value::Instant(datetime!(1970-01-01 0:00:01.5 UTC))
        );
        assert_eq!(
            run(TypeId::NUMBER, TypeId::LOCAL_DATE, Value::Int(-1)).unwrap(),
            Value::LocalDate(date!(1969-12-31))
        );
        assert_eq!(
            run(TypeId::LOCAL_DATE, TypeId::LONG, Value::LocalDate(date!(1970-01-11))).unwrap(),
            Value::Long(10)
        );
        assert_eq!(
            run(TypeId::NUMBER, TypeId::DURATION, Value::Long(-20)).unwrap(),
            Value::Duration(time::Duration::milliseconds(-20))
        );
    }

    #[test]
    fn timestamps_are_fractional_seconds_as_doubles() {
        let stamp = Value::Timestamp(datetime!(1970-01-01 0:00:02.5 UTC));
        assert_eq!(
            run(TypeId::TIMESTAMP, TypeId::DOUBLE, stamp.clone()).unwrap(),
            Value::Double(2.5)
        );
        assert_eq!(run(TypeId::DOUBLE, TypeId::TIMESTAMP, Value::Double(2.5)).unwrap(), stamp);
        let instant = Value::Instant(datetime!(1970-01-01 0:00:02.5 UTC));
        assert_eq!(
            run(TypeId::INSTANT, TypeId::DOUBLE, instant).unwrap(),
            Value::Double(2_500.0)
        );
    }

    #[test]
    fn big_integers_are_nanos_with_floor_division() {
        let value = Value::BigInteger(BigInt::from(-1));
        assert_eq!(
            run(TypeId::BIG_INTEGER, TypeId::INSTANT, value).unwrap(),
            Value::Instant(datetime!(1969-12-31 23:59:59.999999999 UTC))
        );
        let duration = Value::Duration(time::Duration::new(1, 5));
        assert_eq!(
            run(TypeId::DURATION, TypeId::BIG_INTEGER, duration).unwrap(),
            Value::BigInteger(BigInt::from(1_000_000_005))
        );
    }

    #[test]
    fn big_decimals_are_fractional_seconds() {
        let instant = Value::Instant(datetime!(1970-01-01 0:00:01.25 UTC));
        let seconds = run(TypeId::INSTANT, TypeId::BIG_DECIMAL, instant.clone()).unwrap();
        assert_eq!(seconds, Value::BigDecimal("1.25".parse().unwrap()));
        assert_eq!(run(TypeId::BIG_DECIMAL, TypeId::INSTANT, seconds).unwrap(), instant);
    }

    #[test]
    fn text_to_points() {
        let ctx = ConversionContext::builder().zone(offset!(+2)).build();
        assert_eq!(
            run_with(TypeId::STRING, TypeId::INSTANT, Value::from("2024-05-01T12:00:00Z"), &ctx)
                .unwrap(),
            Value::Instant(datetime!(2024-05-01 12:00 UTC))
        );
        assert_eq!(
            run_with(TypeId::STRING, TypeId::INSTANT, Value::from("2024-05-01 12:00"), &ctx)
                .unwrap(),
            Value::Instant(datetime!(2024-05-01 10:00 UTC))
        );
        assert_eq!(
            run_with(TypeId::STRING, TypeId::OFFSET_DATE_TIME, Value::from("2024-05-01"), &ctx)
                .unwrap(),
            Value::OffsetDateTime(datetime!(2024-05-01 0:00 +2))
        );
        assert_eq!(
            run_with(TypeId::STRING, TypeId::DATE, Value::from("   "), &ctx).unwrap(),
            Value::Null
        );
        let err = run(TypeId::STRING, TypeId::INSTANT, Value::from("yesterday")).unwrap_err();
        assert!(matches!(err, ConversionError::Malformed { .. }));
    }

    #[test]
    fn points_to_text() {
        assert_eq!(
            run(
                TypeId::INSTANT,
                TypeId::STRING,
                Value::Instant(datetime!(2024-05-01 12:00 UTC))
            )
            .unwrap(),
            Value::from("2024-05-01T12:00:00Z")
        );
        assert_eq!(
            run(
                TypeId::OFFSET_DATE_TIME,
                TypeId::STRING,
                Value::OffsetDateTime(datetime!(2024-05-01 12:00 -5))
            )
            .unwrap(),
            Value::from("2024-05-01T12:00:00-05:00")
        );
    }

    #[test]
    fn local_values_to_and_from_text() {
        assert_eq!(
            run(
                TypeId::LOCAL_DATE_TIME,
                TypeId::STRING,
                Value::LocalDateTime(datetime!(2024-02-29 08:05:03.25))
            )
            .unwrap(),
            Value::from("2024-02-29T08:05:03.25")
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::LOCAL_TIME, Value::from("08:05")).unwrap(),
            Value::LocalTime(time!(8:05))
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::LOCAL_DATE, Value::from(" 2024-02-29 ")).unwrap(),
            Value::LocalDate(date!(2024-02-29))
        );
        assert_eq!(
            run(TypeId::STRING, TypeId::MONTH_DAY, Value::from("--12-25")).unwrap(),
            Value::MonthDay(MonthDay::new(12, 25).unwrap())
        );
        assert!(run(TypeId::STRING, TypeId::MONTH_DAY, Value::from("12-25")).is_err());
        assert_eq!(
            run(TypeId::STRING, TypeId::DURATION, Value::from("")).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn local_values_accept_points_in_time() {
        let ctx = ConversionContext::builder()
            .zone(offset!(+2))
            .local_date_zone(offset!(+3))
            .build();
        let text = Value::from("2024-01-01T23:00:00Z");

        assert_eq!(
            run_with(TypeId::STRING, TypeId::LOCAL_DATE, text.clone(), &ctx).unwrap(),
            Value::LocalDate(date!(2024-01-02))
        );
        assert_eq!(
            run_with(TypeId::STRING, TypeId::LOCAL_DATE_TIME, text, &ctx).unwrap(),
            Value::LocalDateTime(datetime!(2024-01-02 01:00))
        );
        assert_eq!(
            run_with(
                TypeId::STRING,
                TypeId::LOCAL_DATE,
                Value::from("2024-01-01T20:00:00-05:00"),
                &ctx
            )
            .unwrap(),
            Value::LocalDate(date!(2024-01-02))
        );
        assert_eq!(
            run_with(TypeId::STRING, TypeId::LOCAL_DATE_TIME, Value::from("2024-01-01"), &ctx)
                .unwrap(),
            Value::LocalDateTime(datetime!(2024-01-01 00:00))
        );

        let err = run_with(TypeId::STRING, TypeId::LOCAL_DATE, Value::from("tomorrow"), &ctx)
            .unwrap_err();
        assert!(matches!(err, ConversionError::Malformed { .. }));
    }
}
