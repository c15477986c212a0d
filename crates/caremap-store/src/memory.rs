//! Session-scoped holder of the current entity graph.
//!
//! Graphs are never mutated after publication. `initialize` and `reset`
//! build a complete replacement outside the lock and then swap one `Arc`, so
//! a reader either sees the old graph or the new one, never a mix. Snapshots
//! taken before a reset keep pointing at the graph they were taken from.

use crate::graph::EntityGraph;
use crate::ports::GraphGenerator;
use caremap_core::error::{CareMapError, Result};
use std::sync::{Arc, PoisonError, RwLock};

/// In-memory session store; nothing here outlives the process
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Arc<EntityGraph>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapReason {
    Initialize,
    Reset,
}

impl SessionStore {
    /// Create an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `graph`
    pub fn from_graph(graph: EntityGraph) -> Self {
        Self { current: RwLock::new(Some(Arc::new(graph))) }
    }

    /// Generate the session's graph unless one already exists
    pub fn initialize<G>(&self, generator: &G) -> Result<Arc<EntityGraph>>
    where
        G: GraphGenerator + ?Sized,
    {
        if let Some(existing) = self.read_current() {
            tracing::debug!(seed = existing.seed(), "Session already initialized");
            return Ok(existing);
        }
        self.regenerate(generator, SwapReason::Initialize)
    }

    /// Discard the current graph and publish a freshly generated one
    pub fn reset<G>(&self, generator: &G) -> Result<Arc<EntityGraph>>
    where
        G: GraphGenerator + ?Sized,
    {
        self.regenerate(generator, SwapReason::Reset)
    }

    /// Current graph snapshot
    pub fn snapshot(&self) -> Result<Arc<EntityGraph>> {
        self.read_current().ok_or(CareMapError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.read_current().is_some()
    }

    fn read_current(&self) -> Option<Arc<EntityGraph>> {
        // The guarded value is a single pointer, so a poisoned lock still holds a whole graph
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn regenerate<G>(&self, generator: &G, reason: SwapReason) -> Result<Arc<EntityGraph>>
    where
        G: GraphGenerator + ?Sized,
    {
        let graph = Arc::new(generator.generate()?);

        let previous = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            current.replace(Arc::clone(&graph))
        };

        let summary = graph.summary();
        tracing::info!(
            reason = ?reason,
            seed = summary.seed,
            coordinators = summary.coordinators,
            health_workers = summary.health_workers,
            customers = summary.customers,
            labs = summary.labs,
            replaced = previous.is_some(),
            "Published entity graph"
        );

        Ok(graph)
    }
}
