//! Type keys and type definitions.
//!
//! Every value that participates in conversion has exactly one concrete
//! [`TypeId`]. Abstract classes (`NUMBER`, `ENUM`) and capability interfaces
//! (`COMPARABLE`, `TEMPORAL`, ...) only ever appear as the source half of a
//! registered conversion, never as the runtime type of a value.

use smol_str::SmolStr;

/// A unique identifier for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    // Abstract roots
    /// Root of every class hierarchy.
    pub const OBJECT: Self = Self(0);
    /// Abstract superclass of all numeric types.
    pub const NUMBER: Self = Self(1);
    /// Abstract superclass of all user enums.
    pub const ENUM: Self = Self(2);

    // Capability interfaces
    /// Readable character sequence.
    pub const CHAR_SEQUENCE: Self = Self(3);
    /// Totally ordered values.
    pub const COMPARABLE: Self = Self(4);
    /// Point-in-time or calendar values.
    pub const TEMPORAL: Self = Self(5);
    /// Elapsed-time amounts.
    pub const TEMPORAL_AMOUNT: Self = Self(6);

    // Concrete built-in types
    /// Boolean.
    pub const BOOL: Self = Self(10);
    /// 8-bit signed integer.
    pub const BYTE: Self = Self(11);
    /// 16-bit signed integer.
    pub const SHORT: Self = Self(12);
    /// 32-bit signed integer.
    pub const INT: Self = Self(13);
    /// 64-bit signed integer.
    pub const LONG: Self = Self(14);
    /// 32-bit float.
    pub const FLOAT: Self = Self(15);
    /// 64-bit float.
    pub const DOUBLE: Self = Self(16);
    /// Arbitrary-precision integer.
    pub const BIG_INTEGER: Self = Self(17);
    /// Arbitrary-precision decimal.
    pub const BIG_DECIMAL: Self = Self(18);
    /// UTF-16 code unit.
    pub const CHAR: Self = Self(19);
    /// Text.
    pub const STRING: Self = Self(20);
    /// 128-bit identifier.
    pub const UUID: Self = Self(21);
    /// Signed elapsed time with nanosecond precision.
    pub const DURATION: Self = Self(22);
    /// Point on the UTC time line with nanosecond precision.
    pub const INSTANT: Self = Self(23);
    /// Point in time with nanosecond precision; a subclass of `DATE`.
    pub const TIMESTAMP: Self = Self(24);
    /// Point in time with millisecond precision.
    pub const DATE: Self = Self(25);
    /// Calendar date without a zone.
    pub const LOCAL_DATE: Self = Self(26);
    /// Wall-clock time without a zone.
    pub const LOCAL_TIME: Self = Self(27);
    /// Calendar date and wall-clock time without a zone.
    pub const LOCAL_DATE_TIME: Self = Self(28);
    /// Date and time with a fixed UTC offset.
    pub const OFFSET_DATE_TIME: Self = Self(29);
    /// Month and day of month.
    pub const MONTH_DAY: Self = Self(30);
    /// Ordered key/value record.
    pub const MAP: Self = Self(31);
    /// Type descriptor.
    pub const TYPE: Self = Self(32);

    /// First user-defined type ID.
    pub const USER_TYPES_START: u32 = 100;

    /// Returns a built-in type ID for a given name (case-insensitive).
    #[must_use]
    pub fn from_builtin_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "OBJECT" => Some(Self::OBJECT),
            "NUMBER" => Some(Self::NUMBER),
            "ENUM" => Some(Self::ENUM),
            "CHARSEQUENCE" | "CHAR_SEQUENCE" => Some(Self::CHAR_SEQUENCE),
            "COMPARABLE" => Some(Self::COMPARABLE),
            "TEMPORAL" => Some(Self::TEMPORAL),
            "TEMPORALAMOUNT" | "TEMPORAL_AMOUNT" => Some(Self::TEMPORAL_AMOUNT),
            "BOOLEAN" | "BOOL" => Some(Self::BOOL),
            "BYTE" => Some(Self::BYTE),
            "SHORT" => Some(Self::SHORT),
            "INTEGER" | "INT" => Some(Self::INT),
            "LONG" => Some(Self::LONG),
            "FLOAT" => Some(Self::FLOAT),
            "DOUBLE" => Some(Self::DOUBLE),
            "BIGINTEGER" | "BIG_INTEGER" => Some(Self::BIG_INTEGER),
            "BIGDECIMAL" | "BIG_DECIMAL" => Some(Self::BIG_DECIMAL),
            "CHARACTER" | "CHAR" => Some(Self::CHAR),
            "STRING" => Some(Self::STRING),
            "UUID" => Some(Self::UUID),
            "DURATION" => Some(Self::DURATION),
            "INSTANT" => Some(Self::INSTANT),
            "TIMESTAMP" => Some(Self::TIMESTAMP),
            "DATE" => Some(Self::DATE),
            "LOCALDATE" | "LOCAL_DATE" => Some(Self::LOCAL_DATE),
            "LOCALTIME" | "LOCAL_TIME" => Some(Self::LOCAL_TIME),
            "LOCALDATETIME" | "LOCAL_DATE_TIME" => Some(Self::LOCAL_DATE_TIME),
            "OFFSETDATETIME" | "OFFSET_DATE_TIME" => Some(Self::OFFSET_DATE_TIME),
            "MONTHDAY" | "MONTH_DAY" => Some(Self::MONTH_DAY),
            "MAP" => Some(Self::MAP),
            "TYPE" | "CLASS" => Some(Self::TYPE),
            _ => None,
        }
    }

    /// Returns the canonical name for a built-in type ID.
    #[must_use]
    pub fn builtin_name(self) -> Option<&'static str> {
        match self {
            Self::OBJECT => Some("Object"),
            Self::NUMBER => Some("Number"),
            Self::ENUM => Some("Enum"),
            Self::CHAR_SEQUENCE => Some("CharSequence"),
            Self::COMPARABLE => Some("Comparable"),
            Self::TEMPORAL => Some("Temporal"),
            Self::TEMPORAL_AMOUNT => Some("TemporalAmount"),
            Self::BOOL => Some("Boolean"),
            Self::BYTE => Some("Byte"),
            Self::SHORT => Some("Short"),
            Self::INT => Some("Integer"),
            Self::LONG => Some("Long"),
            Self::FLOAT => Some("Float"),
            Self::DOUBLE => Some("Double"),
            Self::BIG_INTEGER => Some("BigInteger"),
            Self::BIG_DECIMAL => Some("BigDecimal"),
            Self::CHAR => Some("Character"),
            Self::STRING => Some("String"),
            Self::UUID => Some("UUID"),
            Self::DURATION => Some("Duration"),
            Self::INSTANT => Some("Instant"),
            Self::TIMESTAMP => Some("Timestamp"),
            Self::DATE => Some("Date"),
            Self::LOCAL_DATE => Some("LocalDate"),
            Self::LOCAL_TIME => Some("LocalTime"),
            Self::LOCAL_DATE_TIME => Some("LocalDateTime"),
            Self::OFFSET_DATE_TIME => Some("OffsetDateTime"),
            Self::MONTH_DAY => Some("MonthDay"),
            Self::MAP => Some("Map"),
            Self::TYPE => Some("Type"),
            _ => None,
        }
    }

    /// Returns true for IDs reserved by the built-in type table.
    #[must_use]
    pub fn is_builtin(self) -> bool {
        self.0 < Self::USER_TYPES_START
    }
}

/// A type in the conversion universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Concrete or abstract class.
    Class {
        /// Class name.
        name: SmolStr,
        /// Superclass, `None` only for the root.
        parent: Option<TypeId>,
        /// Directly implemented interfaces in declaration order.
        interfaces: Vec<TypeId>,
        /// Abstract classes never appear as the runtime type of a value.
        is_abstract: bool,
    },
    /// Capability interface.
    Interface {
        /// Interface name.
        name: SmolStr,
        /// Directly extended interfaces in declaration order.
        extends: Vec<TypeId>,
    },
    /// Enumeration; always a subclass of [`TypeId::ENUM`].
    Enum {
        /// Enum name.
        name: SmolStr,
        /// Variant names in declaration order.
        variants: Vec<SmolStr>,
        /// Directly implemented interfaces in declaration order.
        interfaces: Vec<TypeId>,
    },
}

impl Type {
    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &SmolStr {
        match self {
            Type::Class { name, .. } | Type::Interface { name, .. } | Type::Enum { name, .. } => {
                name
            }
        }
    }

    /// Returns the superclass.
    #[must_use]
    pub fn parent(&self) -> Option<TypeId> {
        match self {
            Type::Class { parent, .. } => *parent,
            Type::Interface { .. } => None,
            Type::Enum { .. } => Some(TypeId::ENUM),
        }
    }

    /// Returns the direct interfaces (super-interfaces for an interface).
    #[must_use]
    pub fn interfaces(&self) -> &[TypeId] {
        match self {
            Type::Class { interfaces, .. } | Type::Enum { interfaces, .. } => interfaces.as_slice(),
            Type::Interface { extends, .. } => extends.as_slice(),
        }
    }

    /// Returns true if this is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        matches!(self, Type::Interface { .. })
    }

    /// Returns true if values of this type can exist at runtime.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        match self {
            Type::Class { is_abstract, .. } => !is_abstract,
            Type::Interface { .. } => false,
            Type::Enum { .. } => true,
        }
    }
}
