//! Markers command implementation

use super::{open_session, GlobalArgs};
use crate::cli::MarkersArgs;
use crate::output::OutputWriter;
use crate::output_types::MarkerRow;
use anyhow::{bail, Context, Result};
use caremap_core::models::EntityKind;
use caremap_query::{to_feature_collection, EntityRef, MarkerProjector, ProximityQueryEngine};

pub fn execute(args: MarkersArgs, globals: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    if args.service.is_some() && args.kind != EntityKind::Lab {
        bail!("--service only applies to labs");
    }

    let session = open_session(globals)?;
    let graph = &session.graph;
    let engine = ProximityQueryEngine::new(graph);

    let projector = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => {
            MarkerProjector::with_reference(lat, lon).context("Invalid reference point")?
        }
        _ => MarkerProjector::new(),
    };

    let entities: Vec<EntityRef> = match args.kind {
        EntityKind::Coordinator => graph.coordinators().iter().map(EntityRef::from).collect(),
        EntityKind::HealthWorker => graph.health_workers().iter().map(EntityRef::from).collect(),
        EntityKind::Customer => graph.customers().iter().map(EntityRef::from).collect(),
        EntityKind::Lab => match args.service {
            Some(service) => engine.labs_offering(service).into_iter().map(EntityRef::from).collect(),
            None => graph.labs().iter().map(EntityRef::from).collect(),
        },
    };
    let markers = projector.project(entities);

    if args.geojson {
        // GeoJSON is printed bare so it can be piped straight into map tooling
        return output.data(&to_feature_collection(&markers));
    }

    let rows: Vec<MarkerRow> = markers
        .into_iter()
        .map(|m| MarkerRow {
            id: m.id,
            kind: m.kind,
            label: m.label,
            lat: m.position.lat,
            lon: m.position.lon,
            distance_km: m.distance_km,
        })
        .collect();

    output.section(format!("{} {} markers", rows.len(), args.kind));
    output.table(rows)
}
