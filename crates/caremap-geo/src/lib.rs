//! CareMap Geo - Distances, disc sampling, and point indexing
//!
//! This crate holds the geospatial primitives of the proximity engine:
//! haversine distance, area-uniform sampling around a center, and an R-tree
//! over entity positions for radius and nearest-in-range queries.

pub mod distance;
pub mod index;
pub mod sampling;

pub use distance::{distance_km, haversine_km, EARTH_RADIUS_KM};
pub use index::PointIndex;
pub use sampling::{sample_in_disc, DiscSampler, KM_PER_DEGREE};
