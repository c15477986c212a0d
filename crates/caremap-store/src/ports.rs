use crate::graph::EntityGraph;
use caremap_core::error::Result;

/// Port for anything that can produce a complete entity graph
pub trait GraphGenerator {
    /// Run one full generation pass
    fn generate(&self) -> Result<EntityGraph>;
}
