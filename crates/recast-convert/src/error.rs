//! Conversion errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised while resolving or running a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No registered edge matches the source type or any of its ancestors.
    #[error("no conversion available from {from} to {to}")]
    NoConversionAvailable { from: SmolStr, to: SmolStr },

    /// Text could not be read as a number of the target type.
    #[error("cannot parse '{text}' as {target} (expected {range})")]
    NumberFormat {
        text: SmolStr,
        target: SmolStr,
        range: SmolStr,
    },

    /// A leaf conversion failed; wraps the leaf's own error.
    #[error("conversion from {from} to {to} failed: {cause}")]
    ConversionFailed {
        from: SmolStr,
        to: SmolStr,
        #[source]
        cause: Box<ConversionError>,
    },

    /// Value does not fit the target type.
    #[error("{value} is out of range for {target}: {reason}")]
    Range {
        value: SmolStr,
        target: SmolStr,
        reason: SmolStr,
    },

    /// Text content is not a valid rendering of the target type.
    #[error("malformed {target} '{text}': {reason}")]
    Malformed {
        target: SmolStr,
        text: SmolStr,
        reason: SmolStr,
    },

    /// Text names no known type.
    #[error("unknown type '{0}'")]
    UnknownType(SmolStr),

    /// Invalid converter configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(SmolStr),
}

impl ConversionError {
    pub(crate) fn range(
        value: impl ToString,
        target: &str,
        reason: impl Into<SmolStr>,
    ) -> Self {
        Self::Range {
            value: SmolStr::new(value.to_string()),
            target: SmolStr::new(target),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(text: &str, target: &str, reason: impl ToString) -> Self {
        Self::Malformed {
            target: SmolStr::new(target),
            text: SmolStr::new(text),
            reason: SmolStr::new(reason.to_string()),
        }
    }

    /// Returns the innermost leaf error.
    #[must_use]
    pub fn root_cause(&self) -> &ConversionError {
        match self {
            Self::ConversionFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}
