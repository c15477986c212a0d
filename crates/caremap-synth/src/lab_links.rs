//! Linking health workers to labs.
//!
//! Two policies exist. `AtWorkerSetup` links every worker once, right after
//! labs are generated, independent of customers. `PerAssignment` replays the
//! dashboard's historical behaviour: each customer assignment overwrites the
//! assigned worker's lab with a fresh uniform pick, so a worker's final lab
//! is whatever its last assignment rolled and workers without customers stay
//! unlinked.

use caremap_core::models::{HealthWorker, Lab};
use rand::Rng;

/// Link every worker to a uniformly chosen lab; no-op when there are no labs
pub fn link_labs_at_setup<R>(rng: &mut R, workers: &mut [HealthWorker], labs: &[Lab])
where
    R: Rng + ?Sized,
{
    if labs.is_empty() {
        return;
    }
    for worker in workers.iter_mut() {
        worker.linked_lab = Some(labs[rng.random_range(0..labs.len())].id.clone());
    }
}

/// Re-roll the lab of the assigned worker once per assignment, in customer order
///
/// `assignments` holds worker slots, one entry per assigned customer.
pub fn relink_labs_per_assignment<R>(
    rng: &mut R,
    workers: &mut [HealthWorker],
    assignments: &[usize],
    labs: &[Lab],
) where
    R: Rng + ?Sized,
{
    if labs.is_empty() {
        return;
    }
    for &slot in assignments {
        if let Some(worker) = workers.get_mut(slot) {
            worker.linked_lab = Some(labs[rng.random_range(0..labs.len())].id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caremap_core::models::{
        ContactInfo, Coordinate, CoordinatorId, HealthWorkerId, LabId, LabService, WorkingHours,
    };
    use chrono::{NaiveTime, Weekday};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn contact() -> ContactInfo {
        ContactInfo { phone: "+91 90000 00000".to_string(), email: "t@example.org".to_string() }
    }

    fn worker(n: usize) -> HealthWorker {
        HealthWorker {
            id: HealthWorkerId::from_sequence(n),
            name: format!("Worker {}", n),
            village: "Harur".to_string(),
            position: Coordinate::new(12.0, 78.0),
            specializations: BTreeSet::new(),
            contact: contact(),
            coordinator_id: CoordinatorId::from_sequence(1),
            linked_lab: None,
            linked_customers: BTreeSet::new(),
        }
    }

    fn lab(n: usize) -> Lab {
        Lab {
            id: LabId::from_sequence(n),
            name: format!("Lab {}", n),
            position: Coordinate::new(12.1, 78.1),
            address: "Main Road".to_string(),
            contact: contact(),
            services: BTreeSet::from([LabService::BloodTest]),
            working_hours: WorkingHours {
                opens: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                closes: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                days: vec![Weekday::Mon],
            },
        }
    }

    #[test]
    fn test_at_setup_links_everyone_to_existing_labs() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut workers: Vec<HealthWorker> = (1..=10).map(worker).collect();
        let labs: Vec<Lab> = (1..=3).map(lab).collect();

        link_labs_at_setup(&mut rng, &mut workers, &labs);

        for w in &workers {
            let linked = w.linked_lab.as_ref().unwrap();
            assert!(labs.iter().any(|l| &l.id == linked));
        }
    }

    #[test]
    fn test_no_labs_leaves_workers_unlinked() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut workers: Vec<HealthWorker> = (1..=3).map(worker).collect();

        link_labs_at_setup(&mut rng, &mut workers, &[]);
        relink_labs_per_assignment(&mut rng, &mut workers, &[0, 1], &[]);

        assert!(workers.iter().all(|w| w.linked_lab.is_none()));
    }

    #[test]
    fn test_per_assignment_only_touches_assigned_workers() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut workers: Vec<HealthWorker> = (1..=4).map(worker).collect();
        let labs: Vec<Lab> = (1..=5).map(lab).collect();

        relink_labs_per_assignment(&mut rng, &mut workers, &[1, 3, 1, 1], &labs);

        assert!(workers[0].linked_lab.is_none());
        assert!(workers[1].linked_lab.is_some());
        assert!(workers[2].linked_lab.is_none());
        assert!(workers[3].linked_lab.is_some());
    }

    #[test]
    fn test_per_assignment_is_deterministic_for_a_seed() {
        let labs: Vec<Lab> = (1..=5).map(lab).collect();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut workers: Vec<HealthWorker> = (1..=4).map(worker).collect();
            relink_labs_per_assignment(&mut rng, &mut workers, &[0, 2, 0], &labs);
            workers.into_iter().map(|w| w.linked_lab).collect::<Vec<_>>()
        };
        assert_eq!(run(8), run(8));
    }
}
