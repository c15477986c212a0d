use caremap_core::config::{parse_lab_link_policy, LabLinkPolicy};
use caremap_core::models::{EntityKind, LabService};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CareMap - Synthetic rural-healthcare coordination data and proximity queries
#[derive(Parser, Debug)]
#[command(name = "caremap")]
#[command(about = "Synthetic rural-healthcare coordination data and proximity queries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Seed for the generator; the same seed always yields the same graph
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Configuration file (defaults to ./caremap.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of coordinators
    #[arg(long, global = true)]
    pub coordinators: Option<usize>,

    /// Number of customers
    #[arg(long, global = true)]
    pub customers: Option<usize>,

    /// Number of labs
    #[arg(long, global = true)]
    pub labs: Option<usize>,

    /// Maximum customer-to-worker distance for assignment, in km
    #[arg(long, global = true, value_name = "KM")]
    pub assignment_radius: Option<f64>,

    /// How workers get their lab (at-setup or per-assignment)
    #[arg(long, global = true, value_parser = parse_lab_link_policy)]
    pub lab_links: Option<LabLinkPolicy>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a graph and summarize it
    Generate,

    /// Show one entity by id
    Lookup(LookupArgs),

    /// List the health workers of a coordinator
    Workers(WorkersArgs),

    /// List the customers assigned to a health worker
    Customers(CustomersArgs),

    /// Find entities within a radius of a point
    Nearby(NearbyArgs),

    /// Project entities into map markers
    Markers(MarkersArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// Entity kind (coordinator, worker, customer, lab)
    pub kind: EntityKind,

    /// Entity id, e.g. HS-004
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct WorkersArgs {
    /// Coordinator id, e.g. CO-001
    pub coordinator_id: String,
}

#[derive(Parser, Debug)]
pub struct CustomersArgs {
    /// Health worker id, e.g. HS-001
    pub worker_id: String,
}

/// Entity collections that support radius search
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NearbyTarget {
    Labs,
    Customers,
    Workers,
}

#[derive(Parser, Debug)]
pub struct NearbyArgs {
    /// What to search for
    pub target: NearbyTarget,

    /// Latitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the search center
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Search radius in km (inclusive)
    #[arg(long, value_name = "KM", allow_hyphen_values = true)]
    pub radius: f64,
}

#[derive(Parser, Debug)]
pub struct MarkersArgs {
    /// Entity kind to project
    pub kind: EntityKind,

    /// Latitude of the reference point for distances
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the reference point for distances
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Only labs offering this service (labs only)
    #[arg(long)]
    pub service: Option<LabService>,

    /// Emit a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: bool,
}
