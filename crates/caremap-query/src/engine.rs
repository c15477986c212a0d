use crate::entity::EntityRef;
use caremap_core::error::{CareMapError, Result};
use caremap_core::models::{
    Coordinate, Coordinator, Customer, EntityKind, HealthWorker, Lab, LabService,
};
use caremap_geo::PointIndex;
use caremap_store::EntityGraph;

/// An entity returned by a radius search, with its distance from the center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub distance_km: f64,
}

/// Lookups and proximity queries over one graph snapshot
///
/// Radius searches include points exactly on the boundary, grow
/// monotonically with the radius, and return results nearest first (equal
/// distances in generation order).
#[derive(Debug, Clone, Copy)]
pub struct ProximityQueryEngine<'a> {
    graph: &'a EntityGraph,
}

impl<'a> ProximityQueryEngine<'a> {
    pub fn new(graph: &'a EntityGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'a EntityGraph {
        self.graph
    }

    pub fn coordinator_by_id(&self, id: &str) -> Option<&'a Coordinator> {
        self.graph.coordinator(id)
    }

    pub fn health_worker_by_id(&self, id: &str) -> Option<&'a HealthWorker> {
        self.graph.health_worker(id)
    }

    pub fn customer_by_id(&self, id: &str) -> Option<&'a Customer> {
        self.graph.customer(id)
    }

    pub fn lab_by_id(&self, id: &str) -> Option<&'a Lab> {
        self.graph.lab(id)
    }

    /// Look up an entity of the given kind
    pub fn entity_by_id(&self, kind: EntityKind, id: &str) -> Option<EntityRef<'a>> {
        match kind {
            EntityKind::Coordinator => self.coordinator_by_id(id).map(EntityRef::from),
            EntityKind::HealthWorker => self.health_worker_by_id(id).map(EntityRef::from),
            EntityKind::Customer => self.customer_by_id(id).map(EntityRef::from),
            EntityKind::Lab => self.lab_by_id(id).map(EntityRef::from),
        }
    }

    /// Workers owned by a coordinator, in generation order
    pub fn health_workers_by_coordinator(&self, coordinator_id: &str) -> Vec<&'a HealthWorker> {
        self.graph
            .health_workers()
            .iter()
            .filter(|w| w.coordinator_id.as_str() == coordinator_id)
            .collect()
    }

    /// Customers assigned to a worker, in generation order
    pub fn customers_by_health_worker(&self, health_worker_id: &str) -> Vec<&'a Customer> {
        self.graph
            .customers()
            .iter()
            .filter(|c| c.linked_health_worker.as_ref().is_some_and(|w| w.as_str() == health_worker_id))
            .collect()
    }

    pub fn nearby_labs(&self, lat: f64, lon: f64, radius_km: f64) -> Result<Vec<&'a Lab>> {
        Ok(strip(self.nearby_labs_ranked(lat, lon, radius_km)?))
    }

    pub fn nearby_customers(&self, lat: f64, lon: f64, radius_km: f64) -> Result<Vec<&'a Customer>> {
        Ok(strip(self.nearby_customers_ranked(lat, lon, radius_km)?))
    }

    pub fn nearby_health_workers(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<&'a HealthWorker>> {
        Ok(strip(self.nearby_health_workers_ranked(lat, lon, radius_km)?))
    }

    pub fn nearby_labs_ranked(&self, lat: f64, lon: f64, radius_km: f64) -> Result<Vec<Ranked<&'a Lab>>> {
        let slots = within(self.graph.lab_index(), lat, lon, radius_km)?;
        Ok(resolve(slots, self.graph.labs()))
    }

    pub fn nearby_customers_ranked(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<Ranked<&'a Customer>>> {
        let slots = within(self.graph.customer_index(), lat, lon, radius_km)?;
        Ok(resolve(slots, self.graph.customers()))
    }

    pub fn nearby_health_workers_ranked(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<Ranked<&'a HealthWorker>>> {
        let slots = within(self.graph.worker_index(), lat, lon, radius_km)?;
        Ok(resolve(slots, self.graph.health_workers()))
    }

    /// Closest lab to a point regardless of distance; `None` when there are no labs
    pub fn nearest_lab(&self, lat: f64, lon: f64) -> Result<Option<Ranked<&'a Lab>>> {
        let center = Coordinate::try_new(lat, lon)?;
        let labs = self.graph.labs();

        Ok(self.graph.lab_index().nearest_within(center, f64::INFINITY).and_then(|(slot, d)| {
            labs.get(slot).map(|lab| Ranked { item: lab, distance_km: d })
        }))
    }

    /// Labs offering a service, in generation order
    pub fn labs_offering(&self, service: LabService) -> Vec<&'a Lab> {
        self.graph.labs().iter().filter(|lab| lab.offers(service)).collect()
    }
}

fn within(index: &PointIndex, lat: f64, lon: f64, radius_km: f64) -> Result<Vec<(usize, f64)>> {
    let center = Coordinate::try_new(lat, lon)?;
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(CareMapError::InvalidRadius { radius_km });
    }

    let hits = index.within_radius(center, radius_km);
    tracing::debug!(lat, lon, radius_km, hits = hits.len(), "Radius search");
    Ok(hits)
}

fn resolve<T>(slots: Vec<(usize, f64)>, items: &[T]) -> Vec<Ranked<&T>> {
    slots
        .into_iter()
        .filter_map(|(slot, distance_km)| items.get(slot).map(|item| Ranked { item, distance_km }))
        .collect()
}

fn strip<T>(ranked: Vec<Ranked<T>>) -> Vec<T> {
    ranked.into_iter().map(|r| r.item).collect()
}
