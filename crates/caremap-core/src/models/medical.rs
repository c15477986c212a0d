use super::entities::{HealthWorkerId, LabId, LabService};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One visit in a customer's medical history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub date: NaiveDate,
    pub symptom: String,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub lab_tests: Vec<LabTestEntry>,
}

/// A test ordered during a visit, performed by a lab that offers the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTestEntry {
    pub lab_id: LabId,
    pub service: LabService,
    pub date: NaiveDate,
    pub result: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub scheduled_at: NaiveDateTime,
    pub purpose: String,
    pub health_worker_id: Option<HealthWorkerId>,
    pub lab_id: Option<LabId>,
    pub status: AppointmentStatus,
}

impl VisitRecord {
    /// Labs referenced by this visit's tests
    pub fn referenced_labs(&self) -> impl Iterator<Item = &LabId> {
        self.lab_tests.iter().map(|test| &test.lab_id)
    }
}
