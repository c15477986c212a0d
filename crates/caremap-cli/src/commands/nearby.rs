//! Nearby command implementation

use super::{open_session, GlobalArgs};
use crate::cli::{NearbyArgs, NearbyTarget};
use crate::output::OutputWriter;
use crate::output_types::{NearbyOutput, NearbyRow};
use anyhow::{Context, Result};
use caremap_core::models::Coordinate;
use caremap_query::{EntityRef, ProximityQueryEngine, Ranked};

pub fn execute(args: NearbyArgs, globals: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let session = open_session(globals)?;
    let engine = ProximityQueryEngine::new(&session.graph);
    let (lat, lon, radius) = (args.lat, args.lon, args.radius);

    let hits: Vec<Ranked<EntityRef>> = match args.target {
        NearbyTarget::Labs => engine.nearby_labs_ranked(lat, lon, radius).map(erase),
        NearbyTarget::Customers => engine.nearby_customers_ranked(lat, lon, radius).map(erase),
        NearbyTarget::Workers => engine.nearby_health_workers_ranked(lat, lon, radius).map(erase),
    }
    .context("Invalid search parameters")?;

    let results: Vec<NearbyRow> = hits
        .iter()
        .map(|hit| NearbyRow {
            id: hit.item.id().to_string(),
            name: hit.item.name().to_string(),
            locality: hit.item.locality().to_string(),
            distance_km: hit.distance_km,
        })
        .collect();

    if output.is_json() {
        return output.result(NearbyOutput {
            center: Coordinate::new(lat, lon),
            radius_km: radius,
            results,
        });
    }

    output.section(format!("{} {} within {} km", results.len(), label(args.target), radius));
    let empty = results.is_empty();
    output.table(results)?;

    if empty && args.target == NearbyTarget::Labs {
        if let Some(nearest) = engine.nearest_lab(lat, lon)? {
            output.info(format!(
                "Nearest lab is {} ({}) at {:.2} km",
                nearest.item.name, nearest.item.id, nearest.distance_km
            ));
        }
    }

    Ok(())
}

fn erase<'a, T>(hits: Vec<Ranked<&'a T>>) -> Vec<Ranked<EntityRef<'a>>>
where
    &'a T: Into<EntityRef<'a>>,
{
    hits.into_iter()
        .map(|hit| Ranked { item: hit.item.into(), distance_km: hit.distance_km })
        .collect()
}

fn label(target: NearbyTarget) -> &'static str {
    match target {
        NearbyTarget::Labs => "labs",
        NearbyTarget::Customers => "customers",
        NearbyTarget::Workers => "health workers",
    }
}
