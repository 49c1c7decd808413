//! Read-only configuration handed to every leaf conversion.

#![allow(missing_docs)]

use std::fmt;
use std::sync::Arc;

use recast_types::{TypeId, TypeRegistry};
use smol_str::SmolStr;
use time::UtcOffset;

use crate::error::ConversionError;

/// Strategy used to resolve type names (text to `Type` conversions).
#[derive(Clone)]
pub enum TypeLookup {
    /// Resolve against a type registry, including user-declared types.
    Registered(Arc<TypeRegistry>),
    /// Only built-in type names.
    BuiltinOnly,
    /// Caller-supplied lookup.
    Custom(Arc<dyn Fn(&str) -> Option<TypeId> + Send + Sync>),
}

impl TypeLookup {
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        match self {
            TypeLookup::Registered(registry) => registry.lookup(name),
            TypeLookup::BuiltinOnly => TypeId::from_builtin_name(name),
            TypeLookup::Custom(lookup) => lookup(name),
        }
    }

    /// Name of a type, falling back to `#<id>` for ids unknown to the strategy.
    #[must_use]
    pub fn type_name(&self, id: TypeId) -> SmolStr {
        match self {
            TypeLookup::Registered(registry) => registry.display_name(id),
            TypeLookup::BuiltinOnly | TypeLookup::Custom(_) => type_label(id),
        }
    }
}

impl fmt::Debug for TypeLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeLookup::Registered(_) => f.write_str("Registered"),
            TypeLookup::BuiltinOnly => f.write_str("BuiltinOnly"),
            TypeLookup::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Built-in name of a type, or `#<id>`.
pub(crate) fn type_label(id: TypeId) -> SmolStr {
    id.builtin_name()
        .map_or_else(|| SmolStr::new(format!("#{}", id.0)), SmolStr::new)
}

/// Immutable per-call conversion settings.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    zone: UtcOffset,
    local_date_zone: Option<UtcOffset>,
    type_lookup: TypeLookup,
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self {
            zone: UtcOffset::UTC,
            local_date_zone: None,
            type_lookup: TypeLookup::BuiltinOnly,
        }
    }
}

impl ConversionContext {
    #[must_use]
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Zone used when zone-less values meet points in time.
    #[must_use]
    pub fn zone(&self) -> UtcOffset {
        self.zone
    }

    /// Zone used for local dates; falls back to [`Self::zone`].
    #[must_use]
    pub fn local_date_zone(&self) -> UtcOffset {
        self.local_date_zone.unwrap_or(self.zone)
    }

    #[must_use]
    pub fn type_lookup(&self) -> &TypeLookup {
        &self.type_lookup
    }

    #[must_use]
    pub fn lookup_type(&self, name: &str) -> Option<TypeId> {
        self.type_lookup.lookup(name)
    }

    #[must_use]
    pub fn type_name(&self, id: TypeId) -> SmolStr {
        self.type_lookup.type_name(id)
    }
}

/// Builder for [`ConversionContext`].
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    context: ConversionContext,
}

impl From<ConversionContext> for ContextBuilder {
    fn from(context: ConversionContext) -> Self {
        Self { context }
    }
}

impl ContextBuilder {
    #[must_use]
    pub fn zone(mut self, zone: UtcOffset) -> Self {
        self.context.zone = zone;
        self
    }

    #[must_use]
    pub fn local_date_zone(mut self, zone: UtcOffset) -> Self {
        self.context.local_date_zone = Some(zone);
        self
    }

    /// Sets the zone from an identifier such as `UTC`, `+02:00` or `UTC-05:30`.
    pub fn zone_id(self, id: &str) -> Result<Self, ConversionError> {
        Ok(self.zone(parse_zone_id(id)?))
    }

    pub fn local_date_zone_id(self, id: &str) -> Result<Self, ConversionError> {
        Ok(self.local_date_zone(parse_zone_id(id)?))
    }

    #[must_use]
    pub fn type_lookup(mut self, lookup: TypeLookup) -> Self {
        self.context.type_lookup = lookup;
        self
    }

    #[must_use]
    pub fn build(self) -> ConversionContext {
        self.context
    }
}

/// Parses `UTC`, `Z`, `GMT`, `+HH`, `+HH:MM`, `+HHMM` and `UTC+HH:MM` style
/// identifiers.
pub fn parse_zone_id(id: &str) -> Result<UtcOffset, ConversionError> {
    let text = id.trim();
    let invalid = || ConversionError::InvalidConfig(format!("invalid zone id '{id}'").into());
    let upper = text.to_ascii_uppercase();
    let offset = match upper.as_str() {
        "UTC" | "Z" | "GMT" | "UT" => return Ok(UtcOffset::UTC),
        _ => ["UTC", "GMT", "UT"]
            .iter()
            .find_map(|prefix| upper.strip_prefix(prefix))
            .unwrap_or(upper.as_str()),
    };

    let (sign, digits) = match offset.as_bytes().first() {
        Some(b'+') => (1, &offset[1..]),
        Some(b'-') => (-1, &offset[1..]),
        _ => return Err(invalid()),
    };
    if !digits.is_ascii() {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.split_once(':') {
        Some((hours, minutes)) => (hours, minutes),
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };
    let is_field = |part: &str| {
        (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !is_field(hours) || !is_field(minutes) {
        return Err(invalid());
    }
    let hours: i8 = hours.parse().map_err(|_| invalid())?;
    let minutes: i8 = minutes.parse().map_err(|_| invalid())?;
    // offsets span -18:00 to +18:00
    if minutes > 59 || i16::from(hours) * 60 + i16::from(minutes) > 18 * 60 {
        return Err(invalid());
    }
    UtcOffset::from_hms(sign * hours, sign * minutes, 0).map_err(|_| invalid())
}
