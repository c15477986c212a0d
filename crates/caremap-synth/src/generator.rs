use crate::assignment::nearest_worker_within;
use crate::credentials::account_for;
use crate::history::{generate_appointments, generate_history};
use crate::lab_links::{link_labs_at_setup, relink_labs_per_assignment};
use crate::vocab::{self, LAB_NAME_STEMS, LAB_NAME_SUFFIXES, STREETS, VILLAGES};
use caremap_core::config::{GeneratorSettings, LabLinkPolicy};
use caremap_core::error::Result;
use caremap_core::models::{
    Coordinator, CoordinatorId, Customer, CustomerId, EntityKind, Gender, HealthWorker,
    HealthWorkerId, Lab, LabId, LabService, Specialization, UserAccount, WorkingHours,
};
use caremap_geo::{sample_in_disc, PointIndex};
use caremap_store::{EntityGraph, GraphGenerator};
use chrono::{NaiveDate, NaiveTime, Utc, Weekday};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

const EMAIL_DOMAIN: &str = "caremap.example";
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Builds complete entity graphs from validated settings
///
/// Each pass is driven by one `StdRng`, so a fixed seed and reference date
/// reproduce the same graph, ids and relationships included.
#[derive(Debug, Clone)]
pub struct EntityGenerator {
    settings: GeneratorSettings,
    as_of: NaiveDate,
}

impl EntityGenerator {
    /// Create a generator; fails if the settings are out of domain
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings, as_of: Utc::now().date_naive() })
    }

    /// Date medical histories and appointments are generated relative to
    pub fn with_reference_date(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Run the full pipeline with an explicit seed
    pub fn generate_seeded(&self, seed: u64) -> EntityGraph {
        let settings = &self.settings;
        let mut rng = StdRng::seed_from_u64(seed);
        tracing::info!(
            seed,
            coordinators = settings.coordinator_count,
            labs = settings.lab_count,
            customers = settings.customer_count,
            policy = ?settings.lab_link_policy,
            "Generating entity graph"
        );

        let mut coordinators = self.generate_coordinators(&mut rng);
        let mut workers = self.generate_health_workers(&mut rng, &mut coordinators);
        let labs = self.generate_labs(&mut rng);

        if settings.lab_link_policy == LabLinkPolicy::AtWorkerSetup {
            link_labs_at_setup(&mut rng, &mut workers, &labs);
        }

        let (customers, assignments) = self.generate_customers(&mut rng, &mut workers, &labs);

        if settings.lab_link_policy == LabLinkPolicy::PerAssignment {
            relink_labs_per_assignment(&mut rng, &mut workers, &assignments, &labs);
        }

        let users = generate_users(&mut rng, &coordinators, &workers, &customers, &labs);

        tracing::debug!(
            workers = workers.len(),
            assigned = assignments.len(),
            users = users.len(),
            "Generation pass complete"
        );

        EntityGraph::new(seed, coordinators, workers, customers, labs, users)
    }

    fn generate_coordinators(&self, rng: &mut StdRng) -> Vec<Coordinator> {
        let settings = &self.settings;
        (1..=settings.coordinator_count)
            .map(|n| {
                let female = rng.random_bool(0.5);
                let name = vocab::full_name(rng, female);
                Coordinator {
                    id: CoordinatorId::from_sequence(n),
                    position: sample_in_disc(rng, settings.base, settings.coordinator_radius_km),
                    district: settings.district.clone(),
                    linked_health_workers: BTreeSet::new(),
                    contact: vocab::contact_for(rng, &name, EMAIL_DOMAIN),
                    name,
                }
            })
            .collect()
    }

    /// Workers are numbered across all coordinators in creation order
    fn generate_health_workers(
        &self,
        rng: &mut StdRng,
        coordinators: &mut [Coordinator],
    ) -> Vec<HealthWorker> {
        let settings = &self.settings;
        let mut workers = Vec::new();

        for coordinator in coordinators.iter_mut() {
            let count = rng.random_range(
                settings.min_workers_per_coordinator..=settings.max_workers_per_coordinator,
            );

            for _ in 0..count {
                let id = HealthWorkerId::from_sequence(workers.len() + 1);
                let name = vocab::full_name(rng, true);
                let specializations: BTreeSet<Specialization> =
                    vocab::non_empty_subset(rng, &Specialization::ALL, 3).into_iter().collect();

                coordinator.linked_health_workers.insert(id.clone());
                workers.push(HealthWorker {
                    id,
                    village: vocab::pick(rng, VILLAGES).to_string(),
                    position: sample_in_disc(rng, coordinator.position, settings.worker_radius_km),
                    specializations,
                    contact: vocab::contact_for(rng, &name, EMAIL_DOMAIN),
                    name,
                    coordinator_id: coordinator.id.clone(),
                    linked_lab: None,
                    linked_customers: BTreeSet::new(),
                });
            }
        }

        tracing::debug!(count = workers.len(), "Generated health workers");
        workers
    }

    fn generate_labs(&self, rng: &mut StdRng) -> Vec<Lab> {
        let settings = &self.settings;
        (1..=settings.lab_count)
            .map(|n| {
                let name = format!(
                    "{} {}",
                    vocab::pick(rng, LAB_NAME_STEMS),
                    vocab::pick(rng, LAB_NAME_SUFFIXES)
                );
                let address = format!(
                    "{}, {}, {}",
                    rng.random_range(1..=250),
                    vocab::pick(rng, STREETS),
                    vocab::pick(rng, VILLAGES)
                );
                let services: BTreeSet<LabService> =
                    vocab::non_empty_subset(rng, &LabService::ALL, 6).into_iter().collect();

                Lab {
                    id: LabId::from_sequence(n),
                    position: sample_in_disc(rng, settings.base, settings.lab_radius_km),
                    address,
                    contact: vocab::contact_for(rng, &name, EMAIL_DOMAIN),
                    name,
                    services,
                    working_hours: random_working_hours(rng),
                }
            })
            .collect()
    }

    /// Customers plus the worker slot of every assignment, in customer order
    fn generate_customers(
        &self,
        rng: &mut StdRng,
        workers: &mut [HealthWorker],
        labs: &[Lab],
    ) -> (Vec<Customer>, Vec<usize>) {
        let settings = &self.settings;
        let worker_index = PointIndex::from_positions(workers.iter().map(|w| w.position));
        let mut assignments = Vec::new();

        let customers: Vec<Customer> = (1..=settings.customer_count)
            .map(|n| {
                let id = CustomerId::from_sequence(n);
                let position = sample_in_disc(rng, settings.base, settings.customer_radius_km);
                let assigned =
                    nearest_worker_within(&worker_index, position, settings.assignment_radius_km);

                let gender = match rng.random_range(0..100) {
                    0..=54 => Gender::Female,
                    55..=97 => Gender::Male,
                    _ => Gender::Other,
                };
                let name = vocab::full_name(rng, gender != Gender::Male);
                let village = match assigned {
                    Some(slot) => workers[slot].village.clone(),
                    None => vocab::pick(rng, VILLAGES).to_string(),
                };
                let linked_health_worker = assigned.map(|slot| workers[slot].id.clone());

                if let Some(slot) = assigned {
                    workers[slot].linked_customers.insert(id.clone());
                    assignments.push(slot);
                }

                Customer {
                    id,
                    age: rng.random_range(1..=85),
                    gender,
                    village,
                    position,
                    contact: vocab::contact_for(rng, &name, EMAIL_DOMAIN),
                    name,
                    medical_history: generate_history(rng, labs, self.as_of),
                    appointments: generate_appointments(
                        rng,
                        linked_health_worker.as_ref(),
                        labs,
                        self.as_of,
                    ),
                    linked_health_worker,
                }
            })
            .collect();

        tracing::debug!(
            count = customers.len(),
            assigned = assignments.len(),
            radius_km = settings.assignment_radius_km,
            "Generated customers"
        );
        (customers, assignments)
    }
}

impl GraphGenerator for EntityGenerator {
    fn generate(&self) -> Result<EntityGraph> {
        let seed = self.settings.seed.unwrap_or_else(|| rand::rng().random());
        Ok(self.generate_seeded(seed))
    }
}

fn random_working_hours<R: Rng + ?Sized>(rng: &mut R) -> WorkingHours {
    let opens = NaiveTime::from_hms_opt(rng.random_range(7..=9), 0, 0).unwrap_or(NaiveTime::MIN);
    let closes = NaiveTime::from_hms_opt(rng.random_range(17..=20), 0, 0).unwrap_or(NaiveTime::MIN);

    let day_count = rng.random_range(5..=WEEK.len());
    let mut picked = index::sample(rng, WEEK.len(), day_count).into_vec();
    picked.sort_unstable();

    WorkingHours { opens, closes, days: picked.into_iter().map(|i| WEEK[i]).collect() }
}

fn generate_users<R: Rng + ?Sized>(
    rng: &mut R,
    coordinators: &[Coordinator],
    workers: &[HealthWorker],
    customers: &[Customer],
    labs: &[Lab],
) -> Vec<UserAccount> {
    let mut users =
        Vec::with_capacity(coordinators.len() + workers.len() + customers.len() + labs.len());

    users.extend(
        coordinators
            .iter()
            .map(|c| account_for(rng, EntityKind::Coordinator, c.id.as_str(), &c.name)),
    );
    users.extend(
        workers.iter().map(|w| account_for(rng, EntityKind::HealthWorker, w.id.as_str(), &w.name)),
    );
    users.extend(
        customers.iter().map(|c| account_for(rng, EntityKind::Customer, c.id.as_str(), &c.name)),
    );
    users.extend(labs.iter().map(|l| account_for(rng, EntityKind::Lab, l.id.as_str(), &l.name)));

    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use caremap_core::models::Coordinate;
    use caremap_geo::distance_km;

    fn generator(settings: GeneratorSettings) -> EntityGenerator {
        EntityGenerator::new(settings)
            .unwrap()
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
    }

    #[test]
    fn test_workers_stay_near_their_coordinator() {
        let graph = generator(GeneratorSettings::seeded(3)).generate_seeded(3);
        let radius = GeneratorSettings::default().worker_radius_km;
        // Flat-Earth sampling overshoot at 12 degrees is far below a meter at 20 km
        let eps = 0.01;

        assert_eq!(graph.coordinators().len(), 8);
        for coordinator in graph.coordinators() {
            let count = coordinator.linked_health_workers.len();
            assert!((3..=6).contains(&count), "{} has {} workers", coordinator.id, count);
        }
        for worker in graph.health_workers() {
            let coordinator = graph.coordinator(worker.coordinator_id.as_str()).unwrap();
            let d = distance_km(&coordinator.position, &worker.position);
            assert!(d <= radius + eps, "{} is {} km from {}", worker.id, d, coordinator.id);
        }
    }

    #[test]
    fn test_ownership_is_consistent() {
        let graph = generator(GeneratorSettings::seeded(4)).generate_seeded(4);

        for coordinator in graph.coordinators() {
            let owned: BTreeSet<HealthWorkerId> = graph
                .health_workers()
                .iter()
                .filter(|w| w.coordinator_id == coordinator.id)
                .map(|w| w.id.clone())
                .collect();
            assert_eq!(owned, coordinator.linked_health_workers);
        }
        let total: usize = graph.coordinators().iter().map(|c| c.linked_health_workers.len()).sum();
        assert_eq!(total, graph.health_workers().len());
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = generator(GeneratorSettings::default()).generate_seeded(77);
        let b = generator(GeneratorSettings::default()).generate_seeded(77);

        assert_eq!(a.coordinators(), b.coordinators());
        assert_eq!(a.health_workers(), b.health_workers());
        assert_eq!(a.customers(), b.customers());
        assert_eq!(a.labs(), b.labs());
        assert_eq!(a.users(), b.users());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generator(GeneratorSettings::default()).generate_seeded(1);
        let b = generator(GeneratorSettings::default()).generate_seeded(2);
        assert_ne!(a.customers(), b.customers());
    }

    #[test]
    fn test_generate_uses_configured_seed() {
        let graph = generator(GeneratorSettings::seeded(123)).generate().unwrap();
        assert_eq!(graph.seed(), 123);
    }

    #[test]
    fn test_labs_have_services_and_days() {
        let graph = generator(GeneratorSettings::seeded(6)).generate_seeded(6);

        assert_eq!(graph.labs().len(), 12);
        for lab in graph.labs() {
            assert!(!lab.services.is_empty());
            assert!(lab.working_hours.days.len() >= 5);
            assert!(lab.working_hours.opens < lab.working_hours.closes);
        }
    }

    #[test]
    fn test_empty_worker_range_still_generates() {
        let settings = GeneratorSettings {
            min_workers_per_coordinator: 0,
            max_workers_per_coordinator: 0,
            ..GeneratorSettings::seeded(8)
        };
        let graph = generator(settings).generate_seeded(8);

        assert!(graph.health_workers().is_empty());
        assert!(graph.customers().iter().all(|c| c.linked_health_worker.is_none()));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = GeneratorSettings { worker_radius_km: f64::NAN, ..Default::default() };
        assert!(EntityGenerator::new(settings).is_err());
    }

    #[test]
    fn test_polar_base_rejected() {
        let settings = GeneratorSettings {
            base: Coordinate::new(89.9, 78.1578),
            ..GeneratorSettings::seeded(1)
        };
        assert!(EntityGenerator::new(settings).is_err());
    }

    #[test]
    fn test_accepted_edge_bases_yield_valid_positions() {
        let bases = [Coordinate::new(89.0, 0.0), Coordinate::new(-89.0, 0.0), Coordinate::new(0.0, 179.3)];

        for base in bases {
            for seed in 0..5 {
                let settings = GeneratorSettings { base, ..GeneratorSettings::seeded(seed) };
                let graph = generator(settings).generate_seeded(seed);

                let positions = graph
                    .coordinators()
                    .iter()
                    .map(|c| (c.id.to_string(), c.position))
                    .chain(graph.health_workers().iter().map(|w| (w.id.to_string(), w.position)))
                    .chain(graph.labs().iter().map(|l| (l.id.to_string(), l.position)))
                    .chain(graph.customers().iter().map(|c| (c.id.to_string(), c.position)));
                for (id, position) in positions {
                    assert!(position.is_valid(), "{} at {} around {}", id, position, base);
                }
            }
        }
    }
}
