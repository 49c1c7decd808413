//! Converter configuration loading.

#![allow(missing_docs)]

use std::path::Path;

use serde::Deserialize;
use time::UtcOffset;

use crate::context::parse_zone_id;
use crate::error::ConversionError;

/// Validated `[converter]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub zone: UtcOffset,
    pub local_date_zone: Option<UtcOffset>,
    pub type_lookup: TypeLookupMode,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            zone: UtcOffset::UTC,
            local_date_zone: None,
            type_lookup: TypeLookupMode::Registered,
        }
    }
}

/// Type lookup strategy selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeLookupMode {
    Registered,
    BuiltinOnly,
}

impl TypeLookupMode {
    fn parse(text: &str) -> Result<Self, ConversionError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "registered" => Ok(Self::Registered),
            "builtin" | "builtin_only" | "builtin-only" => Ok(Self::BuiltinOnly),
            _ => Err(ConversionError::InvalidConfig(
                format!("invalid converter.type_lookup '{text}'").into(),
            )),
        }
    }
}

impl ConverterConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            ConversionError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConversionError> {
        let raw: ConfigToml = toml::from_str(text)
            .map_err(|err| ConversionError::InvalidConfig(format!("converter config: {err}").into()))?;
        raw.into_config()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigToml {
    converter: Option<ConverterSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConverterSection {
    zone: Option<String>,
    local_date_zone: Option<String>,
    type_lookup: Option<String>,
}

impl ConfigToml {
    fn into_config(self) -> Result<ConverterConfig, ConversionError> {
        let section = self.converter.unwrap_or_default();
        let zone = match section.zone.as_deref() {
            Some(id) => parse_zone_id(id)?,
            None => UtcOffset::UTC,
        };
        let local_date_zone = section
            .local_date_zone
            .as_deref()
            .map(parse_zone_id)
            .transpose()?;
        let type_lookup = TypeLookupMode::parse(section.type_lookup.as_deref().unwrap_or("registered"))?;
        Ok(ConverterConfig {
            zone,
            local_date_zone,
            type_lookup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(
            ConverterConfig::from_toml_str("").unwrap(),
            ConverterConfig::default()
        );
    }

    #[test]
    fn reads_converter_table() {
        let config = ConverterConfig::from_toml_str(
            r#"
[converter]
zone = "+05:30"
local_date_zone = "UTC"
type_lookup = "builtin"
"#,
        )
        .unwrap();
        assert_eq!(config.zone, UtcOffset::from_hms(5, 30, 0).unwrap());
        assert_eq!(config.local_date_zone, Some(UtcOffset::UTC));
        assert_eq!(config.type_lookup, TypeLookupMode::BuiltinOnly);
    }

    #[test]
    fn rejects_invalid_values() {
        for text in [
            "[converter]\nzone = \"Mars/Olympus\"",
            "[converter]\ntype_lookup = \"everything\"",
            "[converter]\nzones = \"UTC\"",
            "[converter]\nzone = 5",
        ] {
            let err = ConverterConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConversionError::InvalidConfig(_)), "{text}: {err}");
        }
    }
}
