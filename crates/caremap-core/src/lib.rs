//! CareMap Core - Domain models, error type, and configuration
//!
//! This crate contains the entity records shared by the generator, the query
//! engine and the CLI, plus the layered configuration that drives generation.

pub mod config;
pub mod error;
pub mod models;

pub use error::{CareMapError, Result};
