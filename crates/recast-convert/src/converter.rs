//! Conversion resolver and dispatcher.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use recast_types::{TypeId, TypeRegistry};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::config::{ConverterConfig, TypeLookupMode};
use crate::context::{ContextBuilder, ConversionContext, TypeLookup};
use crate::error::ConversionError;
use crate::registry::{ConversionRegistry, ConvertFn, Registration};
use crate::value::{null_value_for, Value};

/// A cached resolution decision.
#[derive(Clone)]
struct Resolution {
    /// Source half of the edge that matched (the concrete type or an ancestor).
    via: TypeId,
    func: ConvertFn,
}

/// Resolutions keyed by `(concrete source, target)`, valid for one registry
/// generation.
#[derive(Default)]
struct ResolutionCache {
    generation: u64,
    entries: FxHashMap<(TypeId, TypeId), Resolution>,
}

/// Converts values between types using registered edges and the type
/// hierarchy.
///
/// Share across threads with `Arc<Converter>`; registration is safe while
/// conversions are running.
pub struct Converter {
    types: Arc<TypeRegistry>,
    registry: ConversionRegistry,
    cache: RwLock<ResolutionCache>,
    context: ConversionContext,
    walks: AtomicU64,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Creates a converter over the built-in types and edges.
    #[must_use]
    pub fn new() -> Self {
        Self::with_types(TypeRegistry::new())
    }

    /// Creates a converter that also knows the user types in `types`.
    #[must_use]
    pub fn with_types(types: TypeRegistry) -> Self {
        let types = Arc::new(types);
        let context = ConversionContext::builder()
            .type_lookup(TypeLookup::Registered(Arc::clone(&types)))
            .build();
        Self {
            types,
            registry: ConversionRegistry::new(),
            cache: RwLock::new(ResolutionCache::default()),
            context,
            walks: AtomicU64::new(0),
        }
    }

    /// Creates a converter whose default context comes from `config`.
    #[must_use]
    pub fn from_config(types: TypeRegistry, config: &ConverterConfig) -> Self {
        let mut converter = Self::with_types(types);
        let mut builder = converter.context_builder().zone(config.zone);
        if let Some(zone) = config.local_date_zone {
            builder = builder.local_date_zone(zone);
        }
        if config.type_lookup == TypeLookupMode::BuiltinOnly {
            builder = builder.type_lookup(TypeLookup::BuiltinOnly);
        }
        converter.context = builder.build();
        converter
    }

    /// Type hierarchy used for fallback resolution.
    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Default context used by [`Converter::convert`].
    #[must_use]
    pub fn context(&self) -> &ConversionContext {
        &self.context
    }

    /// Builder seeded with this converter's default context.
    #[must_use]
    pub fn context_builder(&self) -> ContextBuilder {
        ContextBuilder::from(self.context.clone())
    }

    /// Underlying edge registry.
    #[must_use]
    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    /// Stores or overwrites the `from -> to` edge and invalidates cached
    /// resolutions.
    pub fn register<F>(&self, from: TypeId, to: TypeId, func: F) -> Result<(), ConversionError>
    where
        F: Fn(&Value, &ConversionContext) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        let Registration {
            generation,
            replaced,
        } = self.registry.register(from, to, Arc::new(func))?;
        if replaced {
            debug!(
                from = %self.type_name(from),
                to = %self.type_name(to),
                "conversion overridden"
            );
        }
        let mut cache = self.cache.write();
        if cache.generation < generation {
            debug!(
                cleared = cache.entries.len(),
                generation,
                "conversion cache cleared"
            );
            cache.entries.clear();
            cache.generation = generation;
        }
        Ok(())
    }

    /// Exact-pair lookup, ignoring the hierarchy.
    #[must_use]
    pub fn lookup_exact(&self, from: TypeId, to: TypeId) -> Option<ConvertFn> {
        self.registry.lookup_exact(from, to)
    }

    /// Converts `value` to `target` using the default context.
    pub fn convert(&self, value: &Value, target: TypeId) -> Result<Value, ConversionError> {
        self.convert_with(value, target, &self.context)
    }

    /// Converts `value` to `target` using `ctx`.
    pub fn convert_with(
        &self,
        value: &Value,
        target: TypeId,
        ctx: &ConversionContext,
    ) -> Result<Value, ConversionError> {
        if value.is_null() {
            return Ok(null_value_for(target));
        }
        let source = value.type_id();
        if source == target {
            return Ok(value.clone());
        }
        let resolution = self.resolve(source, target)?;
        (resolution.func)(value, ctx).map_err(|cause| {
            trace!(
                from = %self.type_name(source),
                to = %self.type_name(target),
                error = %cause,
                "conversion failed"
            );
            ConversionError::ConversionFailed {
                from: self.type_name(source),
                to: self.type_name(target),
                cause: Box::new(cause),
            }
        })
    }

    /// Returns true if a conversion from `from` to `to` resolves.
    #[must_use]
    pub fn is_convertible(&self, from: TypeId, to: TypeId) -> bool {
        from == to || self.resolve(from, to).is_ok()
    }

    /// Source type whose edge serves `from -> to`, if any.
    #[must_use]
    pub fn resolved_source(&self, from: TypeId, to: TypeId) -> Option<TypeId> {
        if from == to {
            return Some(from);
        }
        self.resolve(from, to).ok().map(|resolution| resolution.via)
    }

    /// Number of hierarchy walks performed (cache misses).
    #[must_use]
    pub fn resolution_walks(&self) -> u64 {
        self.walks.load(Ordering::Relaxed)
    }

    /// Number of cached resolutions.
    #[must_use]
    pub fn cached_resolutions(&self) -> usize {
        self.cache.read().entries.len()
    }

    /// Drops every cached resolution.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write();
        debug!(cleared = cache.entries.len(), "conversion cache cleared");
        cache.entries.clear();
    }

    fn resolve(&self, from: TypeId, to: TypeId) -> Result<Resolution, ConversionError> {
        let table = self.registry.snapshot();
        let generation = table.generation();
        {
            let cache = self.cache.read();
            if cache.generation == generation {
                if let Some(hit) = cache.entries.get(&(from, to)) {
                    trace!(from = from.0, to = to.0, via = hit.via.0, "conversion cache hit");
                    return Ok(hit.clone());
                }
            }
        }

        self.walks.fetch_add(1, Ordering::Relaxed);
        let found = table
            .get(from, to)
            .map(|func| (from, func))
            .or_else(|| {
                self.types
                    .ancestors(from)
                    .into_iter()
                    .find_map(|ancestor| table.get(ancestor, to).map(|func| (ancestor, func)))
            })
            .map(|(via, func)| Resolution {
                via,
                func: Arc::clone(func),
            });

        let Some(resolution) = found else {
            trace!(
                from = %self.type_name(from),
                to = %self.type_name(to),
                "no conversion available"
            );
            return Err(ConversionError::NoConversionAvailable {
                from: self.type_name(from),
                to: self.type_name(to),
            });
        };
        trace!(
            from = %self.type_name(from),
            to = %self.type_name(to),
            via = %self.type_name(resolution.via),
            "conversion resolved"
        );

        let mut cache = self.cache.write();
        if cache.generation < generation {
            cache.entries.clear();
            cache.generation = generation;
        }
        // A registration published since the walk began makes this result stale.
        if cache.generation == generation {
            cache.entries.insert((from, to), resolution.clone());
        }
        Ok(resolution)
    }

    fn type_name(&self, id: TypeId) -> SmolStr {
        self.types.display_name(id)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("registry", &self.registry)
            .field("cached", &self.cached_resolutions())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }

    #[test]
    fn null_follows_target_policy() {
        let converter = Converter::new();
        assert_eq!(converter.convert(&Value::Null, TypeId::LONG).unwrap(), Value::Long(0));
        assert_eq!(converter.convert(&Value::Null, TypeId::UUID).unwrap(), Value::Null);
        assert_eq!(converter.resolution_walks(), 0);
    }

    #[test]
    fn cache_is_keyed_by_concrete_source() {
        let converter = Converter::new();
        assert_eq!(converter.resolved_source(TypeId::INT, TypeId::STRING), Some(TypeId::NUMBER));
        assert_eq!(converter.resolved_source(TypeId::INT, TypeId::STRING), Some(TypeId::NUMBER));
        assert_eq!(converter.resolution_walks(), 1);
        assert_eq!(converter.cached_resolutions(), 1);

        converter.clear_cache();
        assert_eq!(converter.cached_resolutions(), 0);
        assert!(converter.is_convertible(TypeId::INT, TypeId::STRING));
        assert_eq!(converter.resolution_walks(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let converter = Converter::new();
        assert!(!converter.is_convertible(TypeId::UUID, TypeId::DURATION));
        assert!(!converter.is_convertible(TypeId::UUID, TypeId::DURATION));
        assert_eq!(converter.resolution_walks(), 2);
        assert_eq!(converter.cached_resolutions(), 0);
    }
}
