//! CareMap Synth - Seeded generation of the coordination entity graph
//!
//! The generator runs an ordered pipeline: coordinators around the regional
//! base point, health workers around each coordinator, labs, lab linkage,
//! customers with nearest-worker assignment and medical history, and finally
//! one login record per entity.

pub mod assignment;
pub mod credentials;
pub mod generator;
pub mod history;
pub mod lab_links;
pub mod vocab;

pub use assignment::nearest_worker_within;
pub use generator::EntityGenerator;
