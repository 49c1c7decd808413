//! Conversion edge table with lock-free snapshot reads.

#![allow(missing_docs)]

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use recast_types::TypeId;
use rustc_hash::FxHashMap;

use crate::context::ConversionContext;
use crate::conversions;
use crate::error::ConversionError;
use crate::value::Value;

/// Leaf conversion function.
pub type ConvertFn =
    Arc<dyn Fn(&Value, &ConversionContext) -> Result<Value, ConversionError> + Send + Sync>;

/// Immutable set of `(source, target)` edges.
///
/// Every published table carries a generation; resolutions cached against an
/// older generation are stale.
#[derive(Clone, Default)]
pub struct EdgeTable {
    edges: FxHashMap<(TypeId, TypeId), ConvertFn>,
    generation: u64,
}

impl EdgeTable {
    /// Adds a built-in edge while the table is being assembled.
    pub(crate) fn add<F>(&mut self, from: TypeId, to: TypeId, func: F)
    where
        F: Fn(&Value, &ConversionContext) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        self.edges.insert((from, to), Arc::new(func));
    }

    #[must_use]
    pub fn get(&self, from: TypeId, to: TypeId) -> Option<&ConvertFn> {
        self.edges.get(&(from, to))
    }

    #[must_use]
    pub fn contains(&self, from: TypeId, to: TypeId) -> bool {
        self.edges.contains_key(&(from, to))
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn with_edge(&self, from: TypeId, to: TypeId, func: ConvertFn) -> Self {
        let mut next = self.clone();
        next.edges.insert((from, to), func);
        next.generation += 1;
        next
    }
}

impl fmt::Debug for EdgeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeTable")
            .field("edges", &self.edges.len())
            .field("generation", &self.generation)
            .finish()
    }
}

/// Outcome of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// Generation of the newly published table.
    pub generation: u64,
    /// An existing edge was replaced.
    pub replaced: bool,
}

/// Registry of conversion edges.
///
/// Readers load the current [`EdgeTable`] snapshot without locking;
/// registration copies the table, inserts the edge and publishes the copy.
pub struct ConversionRegistry {
    snapshot: ArcSwap<EdgeTable>,
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionRegistry {
    /// Creates a registry holding the built-in edges.
    #[must_use]
    pub fn new() -> Self {
        let mut table = EdgeTable::default();
        conversions::register_builtins(&mut table);
        Self::from_table(table)
    }

    /// Creates a registry with no edges at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_table(EdgeTable::default())
    }

    fn from_table(table: EdgeTable) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(table),
        }
    }

    /// Stores or overwrites the `from -> to` edge.
    ///
    /// The identity edge is implicit and cannot be overridden.
    pub fn register(
        &self,
        from: TypeId,
        to: TypeId,
        func: ConvertFn,
    ) -> Result<Registration, ConversionError> {
        if from == to {
            return Err(ConversionError::InvalidConfig(
                format!("identity conversion for type #{} cannot be overridden", from.0).into(),
            ));
        }
        let previous = self
            .snapshot
            .rcu(|table| table.with_edge(from, to, Arc::clone(&func)));
        Ok(Registration {
            generation: previous.generation + 1,
            replaced: previous.contains(from, to),
        })
    }

    /// Exact-pair lookup; absence is a normal outcome.
    #[must_use]
    pub fn lookup_exact(&self, from: TypeId, to: TypeId) -> Option<ConvertFn> {
        self.snapshot.load().get(from, to).cloned()
    }

    /// Current table snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<EdgeTable> {
        self.snapshot.load_full()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.snapshot.load().generation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.load().is_empty()
    }
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConversionRegistry")
            .field(&*self.snapshot.load())
            .finish()
    }
}
