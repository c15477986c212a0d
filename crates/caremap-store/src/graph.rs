//! The generated entity graph: four collections, id lookups, and point indexes.
//!
//! A graph is immutable once built. Every relationship was resolved by the
//! generation pass, so readers only ever see a complete snapshot.

use caremap_core::models::{
    Coordinator, CoordinatorId, Customer, CustomerId, HealthWorker, HealthWorkerId, Lab, LabId,
    UserAccount,
};
use caremap_geo::PointIndex;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Entity collections of one generation pass
#[derive(Debug)]
pub struct EntityGraph {
    seed: u64,
    coordinators: Vec<Coordinator>,
    health_workers: Vec<HealthWorker>,
    customers: Vec<Customer>,
    labs: Vec<Lab>,
    users: Vec<UserAccount>,

    coordinator_slots: HashMap<CoordinatorId, usize>,
    worker_slots: HashMap<HealthWorkerId, usize>,
    customer_slots: HashMap<CustomerId, usize>,
    lab_slots: HashMap<LabId, usize>,

    worker_index: PointIndex,
    customer_index: PointIndex,
    lab_index: PointIndex,
}

/// Counts reported after a generation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub seed: u64,
    pub coordinators: usize,
    pub health_workers: usize,
    pub customers: usize,
    pub assigned_customers: usize,
    pub labs: usize,
    pub workers_with_lab: usize,
    pub users: usize,
}

impl GraphSummary {
    /// Share of customers served by a health worker, in [0, 1]
    pub fn assignment_coverage(&self) -> f64 {
        if self.customers == 0 {
            0.0
        } else {
            self.assigned_customers as f64 / self.customers as f64
        }
    }
}

fn slot_map<K, T>(items: &[T], key: impl Fn(&T) -> &K) -> HashMap<K, usize>
where
    K: Clone + Eq + Hash,
{
    items.iter().enumerate().map(|(slot, item)| (key(item).clone(), slot)).collect()
}

impl EntityGraph {
    /// Assemble a graph from fully linked collections and build its indexes
    pub fn new(
        seed: u64,
        coordinators: Vec<Coordinator>,
        health_workers: Vec<HealthWorker>,
        customers: Vec<Customer>,
        labs: Vec<Lab>,
        users: Vec<UserAccount>,
    ) -> Self {
        let coordinator_slots = slot_map(&coordinators, |c| &c.id);
        let worker_slots = slot_map(&health_workers, |w| &w.id);
        let customer_slots = slot_map(&customers, |c| &c.id);
        let lab_slots = slot_map(&labs, |l| &l.id);

        let worker_index = PointIndex::from_positions(health_workers.iter().map(|w| w.position));
        let customer_index = PointIndex::from_positions(customers.iter().map(|c| c.position));
        let lab_index = PointIndex::from_positions(labs.iter().map(|l| l.position));

        Self {
            seed,
            coordinators,
            health_workers,
            customers,
            labs,
            users,
            coordinator_slots,
            worker_slots,
            customer_slots,
            lab_slots,
            worker_index,
            customer_index,
            lab_index,
        }
    }

    /// Seed the generation pass ran with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn coordinators(&self) -> &[Coordinator] {
        &self.coordinators
    }

    pub fn health_workers(&self) -> &[HealthWorker] {
        &self.health_workers
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn labs(&self) -> &[Lab] {
        &self.labs
    }

    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    pub fn coordinator(&self, id: &str) -> Option<&Coordinator> {
        self.coordinator_slots.get(id).map(|&slot| &self.coordinators[slot])
    }

    pub fn health_worker(&self, id: &str) -> Option<&HealthWorker> {
        self.worker_slots.get(id).map(|&slot| &self.health_workers[slot])
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customer_slots.get(id).map(|&slot| &self.customers[slot])
    }

    pub fn lab(&self, id: &str) -> Option<&Lab> {
        self.lab_slots.get(id).map(|&slot| &self.labs[slot])
    }

    /// Login record resolving to the given entity id
    pub fn user_for_entity(&self, entity_id: &str) -> Option<&UserAccount> {
        self.users.iter().find(|user| user.entity_id == entity_id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&UserAccount> {
        self.users.iter().find(|user| user.username == username)
    }

    /// R-tree over health worker positions; slots index `health_workers()`
    pub fn worker_index(&self) -> &PointIndex {
        &self.worker_index
    }

    /// R-tree over customer positions; slots index `customers()`
    pub fn customer_index(&self) -> &PointIndex {
        &self.customer_index
    }

    /// R-tree over lab positions; slots index `labs()`
    pub fn lab_index(&self) -> &PointIndex {
        &self.lab_index
    }

    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            seed: self.seed,
            coordinators: self.coordinators.len(),
            health_workers: self.health_workers.len(),
            customers: self.customers.len(),
            assigned_customers: self
                .customers
                .iter()
                .filter(|c| c.linked_health_worker.is_some())
                .count(),
            labs: self.labs.len(),
            workers_with_lab: self.health_workers.iter().filter(|w| w.linked_lab.is_some()).count(),
            users: self.users.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caremap_core::models::{ContactInfo, Coordinate};
    use std::collections::BTreeSet;

    fn contact() -> ContactInfo {
        ContactInfo { phone: "+91 90000 00000".to_string(), email: "x@example.org".to_string() }
    }

    fn coordinator(n: usize) -> Coordinator {
        Coordinator {
            id: CoordinatorId::from_sequence(n),
            name: format!("Coordinator {}", n),
            position: Coordinate::new(12.1, 78.1),
            district: "Dharmapuri".to_string(),
            linked_health_workers: BTreeSet::new(),
            contact: contact(),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let graph = EntityGraph::new(
            1,
            vec![coordinator(1), coordinator(2)],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(graph.coordinator("CO-002").unwrap().name, "Coordinator 2");
        assert!(graph.coordinator("does-not-exist").is_none());
        assert!(graph.lab("LAB-01").is_none());
        assert_eq!(graph.coordinators().len(), 2);
    }

    #[test]
    fn test_empty_summary() {
        let graph =
            EntityGraph::new(9, Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new());
        let summary = graph.summary();
        assert_eq!(summary.seed, 9);
        assert_eq!(summary.customers, 0);
        assert_eq!(summary.assignment_coverage(), 0.0);
        assert!(graph.lab_index().is_empty());
    }
}
