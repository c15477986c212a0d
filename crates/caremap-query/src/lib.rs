//! CareMap Query - Read-only lookups and proximity search over an entity graph
//!
//! Queries borrow a published `EntityGraph` and never mutate it. Unknown ids
//! produce `None` or an empty list; only malformed coordinates and radii are
//! errors.

pub mod engine;
pub mod entity;
pub mod markers;

pub use engine::{ProximityQueryEngine, Ranked};
pub use entity::EntityRef;
pub use markers::{to_feature_collection, MapMarker, MarkerProjector};
