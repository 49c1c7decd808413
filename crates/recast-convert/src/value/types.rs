use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;
use recast_types::TypeId;
use smol_str::SmolStr;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

use super::MonthDay;

/// Runtime value moved across type boundaries.
///
/// Each variant has exactly one concrete [`TypeId`]; see [`Value::type_id`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
    /// UTF-16 code unit.
    Char(u16),
    String(SmolStr),
    Uuid(Uuid),
    Duration(time::Duration),
    /// Nanosecond point in time, held in UTC.
    Instant(OffsetDateTime),
    /// Nanosecond point in time, held in UTC.
    Timestamp(OffsetDateTime),
    /// Millisecond point in time, held in UTC.
    Date(OffsetDateTime),
    LocalDate(Date),
    LocalTime(Time),
    LocalDateTime(PrimitiveDateTime),
    OffsetDateTime(OffsetDateTime),
    MonthDay(MonthDay),
    Map(IndexMap<SmolStr, Value>),
    Type(TypeId),
    Enum(EnumValue),
    Object(ObjectValue),
}

/// Variant of a user-declared enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub type_id: TypeId,
    pub variant: SmolStr,
}

/// Instance of a user-declared class.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    pub type_id: TypeId,
    pub fields: IndexMap<SmolStr, Value>,
}

impl ObjectValue {
    #[must_use]
    pub fn new(type_id: TypeId) -> Self {
        Self {
            type_id,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Value {
    /// Runtime type of the value; `Null` reports [`TypeId::OBJECT`].
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::Null => TypeId::OBJECT,
            Value::Bool(_) => TypeId::BOOL,
            Value::Byte(_) => TypeId::BYTE,
            Value::Short(_) => TypeId::SHORT,
            Value::Int(_) => TypeId::INT,
            Value::Long(_) => TypeId::LONG,
            Value::Float(_) => TypeId::FLOAT,
            Value::Double(_) => TypeId::DOUBLE,
            Value::BigInteger(_) => TypeId::BIG_INTEGER,
            Value::BigDecimal(_) => TypeId::BIG_DECIMAL,
            Value::Char(_) => TypeId::CHAR,
            Value::String(_) => TypeId::STRING,
            Value::Uuid(_) => TypeId::UUID,
            Value::Duration(_) => TypeId::DURATION,
            Value::Instant(_) => TypeId::INSTANT,
            Value::Timestamp(_) => TypeId::TIMESTAMP,
            Value::Date(_) => TypeId::DATE,
            Value::LocalDate(_) => TypeId::LOCAL_DATE,
            Value::LocalTime(_) => TypeId::LOCAL_TIME,
            Value::LocalDateTime(_) => TypeId::LOCAL_DATE_TIME,
            Value::OffsetDateTime(_) => TypeId::OFFSET_DATE_TIME,
            Value::MonthDay(_) => TypeId::MONTH_DAY,
            Value::Map(_) => TypeId::MAP,
            Value::Type(_) => TypeId::TYPE,
            Value::Enum(value) => value.type_id,
            Value::Object(value) => value.type_id,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<SmolStr, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Builds a record from `(key, value)` pairs, keeping their order.
    pub fn record<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<SmolStr>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Byte(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Short(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInteger(value)
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::BigDecimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(SmolStr::new(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(SmolStr::new(value))
    }
}

impl From<SmolStr> for Value {
    fn from(value: SmolStr) -> Self {
        Value::String(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<time::Duration> for Value {
    fn from(value: time::Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Value::LocalDate(value)
    }
}

impl From<Time> for Value {
    fn from(value: Time) -> Self {
        Value::LocalTime(value)
    }
}

impl From<PrimitiveDateTime> for Value {
    fn from(value: PrimitiveDateTime) -> Self {
        Value::LocalDateTime(value)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(value: OffsetDateTime) -> Self {
        Value::OffsetDateTime(value)
    }
}

impl From<MonthDay> for Value {
    fn from(value: MonthDay) -> Self {
        Value::MonthDay(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}

impl From<ObjectValue> for Value {
    fn from(value: ObjectValue) -> Self {
        Value::Object(value)
    }
}
