//! Integration tests for proximity queries over generated graphs
//!
//! This test suite verifies that:
//! - Radius searches honour the inclusive boundary and grow with the radius
//! - Fabricated ids never raise errors
//! - Markers agree with the query engine's distances

use caremap_core::config::{GeneratorSettings, DEFAULT_BASE};
use caremap_core::models::Coordinate;
use caremap_geo::distance_km;
use caremap_query::{to_feature_collection, MarkerProjector, ProximityQueryEngine};
use caremap_store::EntityGraph;
use caremap_synth::EntityGenerator;
use chrono::NaiveDate;
use proptest::prelude::*;

const B: Coordinate = DEFAULT_BASE;

fn generated(seed: u64) -> EntityGraph {
    EntityGenerator::new(GeneratorSettings::seeded(seed))
        .unwrap()
        .with_reference_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
        .generate_seeded(seed)
}

#[test]
fn test_zero_and_huge_radius() {
    let graph = generated(1);
    let engine = ProximityQueryEngine::new(&graph);
    let lab_at_base = graph.labs().iter().any(|lab| lab.position == B);

    let none = engine.nearby_labs(B.lat, B.lon, 0.0).unwrap();
    assert_eq!(none.is_empty(), !lab_at_base);

    let all = engine.nearby_labs(B.lat, B.lon, 1000.0).unwrap();
    assert_eq!(all.len(), graph.labs().len());
    assert_eq!(engine.nearby_customers(B.lat, B.lon, 1000.0).unwrap().len(), graph.customers().len());
}

#[test]
fn test_fabricated_ids_are_not_found() {
    let graph = generated(2);
    let engine = ProximityQueryEngine::new(&graph);

    assert!(engine.coordinator_by_id("does-not-exist").is_none());
    assert!(engine.health_worker_by_id("does-not-exist").is_none());
    assert!(engine.customer_by_id("does-not-exist").is_none());
    assert!(engine.lab_by_id("does-not-exist").is_none());
    assert!(engine.health_workers_by_coordinator("does-not-exist").is_empty());
    assert!(engine.customers_by_health_worker("does-not-exist").is_empty());
}

#[test]
fn test_relations_match_back_links() {
    let graph = generated(3);
    let engine = ProximityQueryEngine::new(&graph);

    for coordinator in graph.coordinators() {
        let workers = engine.health_workers_by_coordinator(coordinator.id.as_str());
        assert_eq!(workers.len(), coordinator.linked_health_workers.len());
    }
    for worker in graph.health_workers() {
        let customers = engine.customers_by_health_worker(worker.id.as_str());
        assert_eq!(customers.len(), worker.linked_customers.len());
    }
}

#[test]
fn test_results_are_exactly_the_points_in_range() {
    let graph = generated(4);
    let engine = ProximityQueryEngine::new(&graph);
    let radius = 12.5;

    let found = engine.nearby_customers_ranked(B.lat, B.lon, radius).unwrap();
    let expected = graph.customers().iter().filter(|c| distance_km(&B, &c.position) <= radius).count();

    assert_eq!(found.len(), expected);
    assert!(found.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
}

#[test]
fn test_marker_distances_match_engine() {
    let graph = generated(5);
    let engine = ProximityQueryEngine::new(&graph);
    let ranked = engine.nearby_labs_ranked(B.lat, B.lon, 25.0).unwrap();

    let projector = MarkerProjector::with_reference(B.lat, B.lon).unwrap();
    let markers = projector.project(ranked.iter().map(|r| r.item));

    for (marker, hit) in markers.iter().zip(&ranked) {
        assert_eq!(marker.id, hit.item.id.as_str());
        assert_eq!(marker.distance_km, Some(hit.distance_km));
    }
    assert_eq!(to_feature_collection(&markers).features.len(), ranked.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_radius_search_is_monotonic(
        seed in 0u64..8,
        dlat in -0.3f64..0.3,
        dlon in -0.3f64..0.3,
        r1 in 0.0f64..40.0,
        extra in 0.0f64..40.0,
    ) {
        let graph = generated(seed);
        let engine = ProximityQueryEngine::new(&graph);
        let (lat, lon) = (B.lat + dlat, B.lon + dlon);

        let small = engine.nearby_labs(lat, lon, r1).unwrap();
        let large = engine.nearby_labs(lat, lon, r1 + extra).unwrap();

        for lab in &small {
            prop_assert!(large.iter().any(|l| l.id == lab.id));
        }

        let center = Coordinate::new(lat, lon);
        for worker in engine.nearby_health_workers(lat, lon, r1).unwrap() {
            prop_assert!(distance_km(&center, &worker.position) <= r1);
        }
    }
}
