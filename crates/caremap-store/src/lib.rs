//! CareMap Store - The generated entity graph and its session holder
//!
//! This crate defines the in-memory repository value produced by a generation
//! pass, the port a generator implements, and the session store that swaps
//! whole graphs atomically on initialize and reset.

pub mod graph;
pub mod memory;
pub mod ports;

pub use graph::{EntityGraph, GraphSummary};
pub use memory::SessionStore;
pub use ports::GraphGenerator;
