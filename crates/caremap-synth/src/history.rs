//! Medical history and appointments attached to generated customers.

use crate::vocab::{self, APPOINTMENT_PURPOSES, CONDITIONS, TEST_RESULTS};
use caremap_core::models::{
    Appointment, AppointmentStatus, HealthWorkerId, Lab, LabTestEntry, VisitRecord,
};
use chrono::{Days, NaiveDate, NaiveTime};
use rand::Rng;

const MAX_VISITS: usize = 3;
const MAX_TESTS_PER_VISIT: usize = 2;
const MAX_APPOINTMENTS: usize = 2;
const HISTORY_WINDOW_DAYS: u64 = 365;
const APPOINTMENT_WINDOW_DAYS: u64 = 30;

/// Possibly empty list of past visits, oldest first
///
/// Lab tests only reference labs from `labs` and services those labs offer;
/// with no labs, visits carry no tests.
pub fn generate_history<R>(rng: &mut R, labs: &[Lab], as_of: NaiveDate) -> Vec<VisitRecord>
where
    R: Rng + ?Sized,
{
    let visit_count = rng.random_range(0..=MAX_VISITS);
    let mut visits: Vec<VisitRecord> = (0..visit_count)
        .map(|_| {
            let date = days_before(as_of, rng.random_range(1..=HISTORY_WINDOW_DAYS));
            let (symptom, diagnosis, prescription) = vocab::pick(rng, CONDITIONS);
            let diagnosed = rng.random_bool(0.7);

            VisitRecord {
                date,
                symptom: symptom.to_string(),
                diagnosis: diagnosed.then(|| diagnosis.to_string()),
                prescription: (diagnosed && rng.random_bool(0.8)).then(|| prescription.to_string()),
                lab_tests: generate_lab_tests(rng, labs, date, as_of),
            }
        })
        .collect();

    visits.sort_by_key(|visit| visit.date);
    visits
}

fn generate_lab_tests<R>(
    rng: &mut R,
    labs: &[Lab],
    visit_date: NaiveDate,
    as_of: NaiveDate,
) -> Vec<LabTestEntry>
where
    R: Rng + ?Sized,
{
    if labs.is_empty() {
        return Vec::new();
    }

    let test_count = rng.random_range(0..=MAX_TESTS_PER_VISIT);
    (0..test_count)
        .filter_map(|_| {
            let lab = &labs[rng.random_range(0..labs.len())];
            let services: Vec<_> = lab.services.iter().copied().collect();
            if services.is_empty() {
                return None;
            }
            let service = vocab::pick(rng, &services);
            let date = visit_date
                .checked_add_days(Days::new(rng.random_range(0..=3)))
                .map_or(visit_date, |d| d.min(as_of));

            Some(LabTestEntry {
                lab_id: lab.id.clone(),
                service,
                date,
                result: rng.random_bool(0.85).then(|| vocab::pick(rng, TEST_RESULTS).to_string()),
            })
        })
        .collect()
}

/// Up to two appointments within a month either side of `as_of`
///
/// Past appointments are completed or cancelled; future ones are scheduled.
/// They name the customer's worker, when there is one, and optionally a lab.
pub fn generate_appointments<R>(
    rng: &mut R,
    health_worker: Option<&HealthWorkerId>,
    labs: &[Lab],
    as_of: NaiveDate,
) -> Vec<Appointment>
where
    R: Rng + ?Sized,
{
    let count = rng.random_range(0..=MAX_APPOINTMENTS);
    let mut appointments: Vec<Appointment> = (0..count)
        .map(|_| {
            let offset = rng.random_range(0..=2 * APPOINTMENT_WINDOW_DAYS);
            let (date, in_past) = if offset < APPOINTMENT_WINDOW_DAYS {
                (days_before(as_of, APPOINTMENT_WINDOW_DAYS - offset), true)
            } else {
                (days_after(as_of, offset - APPOINTMENT_WINDOW_DAYS), false)
            };
            let time = NaiveTime::from_hms_opt(rng.random_range(9..=16), 30 * rng.random_range(0..2), 0)
                .unwrap_or(NaiveTime::MIN);

            let status = if !in_past {
                AppointmentStatus::Scheduled
            } else if rng.random_bool(0.8) {
                AppointmentStatus::Completed
            } else {
                AppointmentStatus::Cancelled
            };

            let lab_id = (!labs.is_empty() && rng.random_bool(0.4))
                .then(|| labs[rng.random_range(0..labs.len())].id.clone());

            Appointment {
                scheduled_at: date.and_time(time),
                purpose: vocab::pick(rng, APPOINTMENT_PURPOSES).to_string(),
                health_worker_id: health_worker.cloned(),
                lab_id,
                status,
            }
        })
        .collect();

    appointments.sort_by_key(|appointment| appointment.scheduled_at);
    appointments
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}
