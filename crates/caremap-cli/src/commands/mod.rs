//! Command implementations

mod config;
mod generate;
mod lookup;
mod markers;
mod nearby;
mod relations;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use caremap_core::config::{CliConfigOverrides, GeneratorSettings, LabLinkPolicy};
use caremap_store::{EntityGraph, SessionStore};
use caremap_synth::EntityGenerator;
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by every command
///
/// Every command regenerates its graph, so the generation overrides are
/// global: the same flags reproduce the same graph under any command.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub coordinators: Option<usize>,
    pub customers: Option<usize>,
    pub labs: Option<usize>,
    pub assignment_radius: Option<f64>,
    pub lab_links: Option<LabLinkPolicy>,
}

impl GlobalArgs {
    fn overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            seed: self.seed,
            coordinator_count: self.coordinators,
            customer_count: self.customers,
            lab_count: self.labs,
            assignment_radius_km: self.assignment_radius,
            lab_link_policy: self.lab_links,
        }
    }

    /// Flags that rebuild the graph generated with `seed`
    ///
    /// Only overrides given on this command line are repeated; file and
    /// environment layers are expected to still be in place.
    fn replay_flags(&self, seed: u64) -> String {
        let mut flags = vec![format!("--seed {}", seed)];
        if let Some(path) = &self.config {
            flags.push(format!("--config {}", path.display()));
        }
        if let Some(count) = self.coordinators {
            flags.push(format!("--coordinators {}", count));
        }
        if let Some(count) = self.customers {
            flags.push(format!("--customers {}", count));
        }
        if let Some(count) = self.labs {
            flags.push(format!("--labs {}", count));
        }
        if let Some(radius) = self.assignment_radius {
            flags.push(format!("--assignment-radius {}", radius));
        }
        if let Some(policy) = self.lab_links {
            let name = match policy {
                LabLinkPolicy::AtWorkerSetup => "at-worker-setup",
                LabLinkPolicy::PerAssignment => "per-assignment",
            };
            flags.push(format!("--lab-links {}", name));
        }
        flags.join(" ")
    }
}

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let globals = GlobalArgs {
        seed: cli.seed,
        config: cli.config,
        coordinators: cli.coordinators,
        customers: cli.customers,
        labs: cli.labs,
        assignment_radius: cli.assignment_radius,
        lab_links: cli.lab_links,
    };

    match cli.command {
        Commands::Generate => generate::execute(&globals, &output),
        Commands::Lookup(args) => lookup::execute(args, &globals, &output),
        Commands::Workers(args) => relations::workers(args, &globals, &output),
        Commands::Customers(args) => relations::customers(args, &globals, &output),
        Commands::Nearby(args) => nearby::execute(args, &globals, &output),
        Commands::Markers(args) => markers::execute(args, &globals, &output),
        Commands::Config => config::execute(&globals, &output),
    }
}

/// Graph generated for this invocation, with the settings that produced it
struct Session {
    graph: Arc<EntityGraph>,
    settings: GeneratorSettings,
}

/// Generate this invocation's graph from the layered configuration
fn open_session(globals: &GlobalArgs) -> Result<Session> {
    let config = load_config_with_overrides(globals.config.as_deref(), globals.overrides())?;
    let settings = config.to_settings().context("Invalid generator configuration")?;
    let generator = EntityGenerator::new(settings.clone())?;

    let graph =
        SessionStore::new().initialize(&generator).context("Failed to generate entity graph")?;
    tracing::debug!(seed = graph.seed(), "Session graph ready");
    Ok(Session { graph, settings })
}
