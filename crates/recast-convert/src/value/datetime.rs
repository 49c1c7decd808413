use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use time::{Month, OffsetDateTime};

use crate::error::ConversionError;

pub const NANOS_PER_SECOND: u32 = 1_000_000_000;
const NANOS_PER_MILLI: u32 = 1_000_000;

/// Canonical decomposition of a point in time or an elapsed amount.
///
/// `seconds` is floored, so `nanos` is always in `0..1_000_000_000` even for
/// instants before the epoch and negative durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochPair {
    seconds: i64,
    nanos: u32,
}

impl EpochPair {
    pub const EPOCH: Self = Self {
        seconds: 0,
        nanos: 0,
    };

    /// Builds a pair, rejecting nanos outside `0..1_000_000_000`.
    pub fn new(seconds: i64, nanos: i64) -> Result<Self, ConversionError> {
        match u32::try_from(nanos) {
            Ok(nanos) if nanos < NANOS_PER_SECOND => Ok(Self { seconds, nanos }),
            _ => Err(ConversionError::range(
                nanos,
                "nanos",
                "must be in 0..=999999999",
            )),
        }
    }

    /// Floor-divides a nanosecond count.
    pub fn from_nanos(total: i128) -> Result<Self, ConversionError> {
        let divisor = i128::from(NANOS_PER_SECOND);
        let seconds = i64::try_from(total.div_euclid(divisor))
            .map_err(|_| ConversionError::range(total, "EpochPair", "seconds overflow i64"))?;
        Ok(Self {
            seconds,
            nanos: total.rem_euclid(divisor) as u32,
        })
    }

    /// Floor-divides an arbitrary-precision nanosecond count.
    pub fn from_big_nanos(total: &BigInt) -> Result<Self, ConversionError> {
        let divisor = BigInt::from(NANOS_PER_SECOND);
        let mut seconds = total / &divisor;
        let mut rem = total % &divisor;
        // BigInt division truncates toward zero; shift to floor semantics.
        if rem < BigInt::from(0) {
            seconds -= 1;
            rem += &divisor;
        }
        let seconds = seconds
            .to_i64()
            .ok_or_else(|| ConversionError::range(total, "EpochPair", "seconds overflow i64"))?;
        let nanos = rem.to_u32().unwrap_or(0);
        Ok(Self { seconds, nanos })
    }

    pub fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1_000),
            nanos: millis.rem_euclid(1_000) as u32 * NANOS_PER_MILLI,
        }
    }

    pub fn from_datetime(value: OffsetDateTime) -> Self {
        Self {
            seconds: value.unix_timestamp(),
            nanos: value.nanosecond(),
        }
    }

    /// Converts back to a UTC date-time.
    pub fn to_datetime(self) -> Result<OffsetDateTime, ConversionError> {
        OffsetDateTime::from_unix_timestamp_nanos(self.total_nanos())
            .map_err(|err| ConversionError::range(self, "date-time", err.to_string()))
    }

    pub fn from_duration(value: time::Duration) -> Result<Self, ConversionError> {
        Self::from_nanos(value.whole_nanoseconds())
    }

    pub fn to_duration(self) -> time::Duration {
        time::Duration::new(self.seconds, self.nanos as i32)
    }

    #[must_use]
    pub fn seconds(self) -> i64 {
        self.seconds
    }

    #[must_use]
    pub fn nanos(self) -> u32 {
        self.nanos
    }

    #[must_use]
    pub fn total_nanos(self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos)
    }

    /// Epoch milliseconds, floored.
    pub fn to_millis(self) -> Result<i64, ConversionError> {
        let millis = i128::from(self.seconds) * 1_000 + i128::from(self.nanos / NANOS_PER_MILLI);
        i64::try_from(millis).map_err(|_| ConversionError::range(self, "Long", "millis overflow"))
    }

    /// Drops sub-millisecond precision.
    #[must_use]
    pub fn truncate_millis(self) -> Self {
        Self {
            seconds: self.seconds,
            nanos: self.nanos - self.nanos % NANOS_PER_MILLI,
        }
    }

    /// Seconds with the fraction as a float.
    #[must_use]
    pub fn as_f64_seconds(self) -> f64 {
        self.seconds as f64 + f64::from(self.nanos) / f64::from(NANOS_PER_SECOND)
    }
}

impl fmt::Display for EpochPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s+{}ns", self.seconds, self.nanos)
    }
}

/// Month and day of month, without a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: Month,
    day: u8,
}

impl MonthDay {
    /// Validates against the longest month length (February allows 29).
    pub fn new(month: u8, day: u8) -> Result<Self, ConversionError> {
        let month_value = Month::try_from(month)
            .map_err(|err| ConversionError::range(month, "MonthDay", err.to_string()))?;
        let max = month_value.length(2000);
        if day == 0 || day > max {
            return Err(ConversionError::range(
                day,
                "MonthDay",
                format!("day must be in 1..={max} for {month_value}"),
            ));
        }
        Ok(Self {
            month: month_value,
            day,
        })
    }

    #[must_use]
    pub fn month(self) -> Month {
        self.month
    }

    #[must_use]
    pub fn day(self) -> u8 {
        self.day
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{:02}-{:02}", u8::from(self.month), self.day)
    }
}
