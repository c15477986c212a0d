//! Coordinator -> worker and worker -> customer listings

use super::{open_session, GlobalArgs};
use crate::cli::{CustomersArgs, WorkersArgs};
use crate::output::OutputWriter;
use crate::output_types::{CustomerRow, WorkerRow};
use anyhow::Result;
use caremap_query::ProximityQueryEngine;

pub fn workers(args: WorkersArgs, globals: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let session = open_session(globals)?;
    let engine = ProximityQueryEngine::new(&session.graph);

    if engine.coordinator_by_id(&args.coordinator_id).is_none() {
        output.warning(format!("No coordinator with id '{}'", args.coordinator_id));
    }

    let rows: Vec<WorkerRow> = engine
        .health_workers_by_coordinator(&args.coordinator_id)
        .into_iter()
        .map(|w| WorkerRow {
            id: w.id.to_string(),
            name: w.name.clone(),
            village: w.village.clone(),
            lab: w.linked_lab.as_ref().map_or_else(|| "-".to_string(), |lab| lab.to_string()),
            customers: w.linked_customers.len(),
            specializations: w
                .specializations
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    output.section(format!("Health workers of {}", args.coordinator_id));
    output.table(rows)
}

pub fn customers(args: CustomersArgs, globals: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let session = open_session(globals)?;
    let engine = ProximityQueryEngine::new(&session.graph);

    if engine.health_worker_by_id(&args.worker_id).is_none() {
        output.warning(format!("No health worker with id '{}'", args.worker_id));
    }

    let rows: Vec<CustomerRow> = engine
        .customers_by_health_worker(&args.worker_id)
        .into_iter()
        .map(|c| CustomerRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            age: c.age,
            village: c.village.clone(),
            visits: c.medical_history.len(),
            appointments: c.appointments.len(),
        })
        .collect();

    output.section(format!("Customers of {}", args.worker_id));
    output.table(rows)
}
