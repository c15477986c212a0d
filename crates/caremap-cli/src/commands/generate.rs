//! Generate command implementation

use super::{open_session, GlobalArgs};
use crate::output::OutputWriter;
use crate::output_types::{CoordinatorRow, GenerateOutput};
use anyhow::Result;

pub fn execute(globals: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let session = open_session(globals)?;
    let graph = &session.graph;
    let summary = graph.summary();
    let lab_link_policy = session.settings.lab_link_policy;

    if output.is_json() {
        output.result(GenerateOutput {
            assignment_coverage: summary.assignment_coverage(),
            summary,
            lab_link_policy,
        })?;
        return Ok(());
    }

    output.section("Entity Graph");
    output.kv("Seed", summary.seed);
    output.kv("Coordinators", summary.coordinators);
    output.kv("Health Workers", summary.health_workers);
    output.kv("Labs", summary.labs);
    output.kv(
        "Customers",
        format!(
            "{} ({} assigned, {:.0}% coverage)",
            summary.customers,
            summary.assigned_customers,
            summary.assignment_coverage() * 100.0
        ),
    );
    output.kv("Workers With Lab", format!("{} ({:?})", summary.workers_with_lab, lab_link_policy));
    output.kv("User Accounts", summary.users);

    output.section("Coordinators");
    let rows: Vec<CoordinatorRow> = graph
        .coordinators()
        .iter()
        .map(|c| CoordinatorRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            district: c.district.clone(),
            workers: c.linked_health_workers.len(),
        })
        .collect();
    output.table(rows)?;

    output.info(format!(
        "Re-run any command with {} to query this graph",
        globals.replay_flags(summary.seed)
    ));
    Ok(())
}
