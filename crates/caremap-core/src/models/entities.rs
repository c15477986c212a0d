//! The four entity kinds placed by the generator.

use super::coordinate::Coordinate;
use super::medical::{Appointment, VisitRecord};
use crate::error::{CareMapError, Result};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $width:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Build the id for the `n`-th generated entity (1-based)
            pub fn from_sequence(n: usize) -> Self {
                Self(format!("{}-{:0width$}", $prefix, n, width = $width))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

entity_id!(
    /// Identifier of a coordinator, e.g. `CO-001`
    CoordinatorId,
    "CO",
    3
);
entity_id!(
    /// Identifier of a health worker, e.g. `HS-001`
    HealthWorkerId,
    "HS",
    3
);
entity_id!(
    /// Identifier of a customer, e.g. `CU-0001`
    CustomerId,
    "CU",
    4
);
entity_id!(
    /// Identifier of a lab, e.g. `LAB-01`
    LabId,
    "LAB",
    2
);

/// Entity kind, used by lookups, markers and credential roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Coordinator,
    HealthWorker,
    Customer,
    Lab,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Coordinator,
        EntityKind::HealthWorker,
        EntityKind::Customer,
        EntityKind::Lab,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Coordinator => "coordinator",
            EntityKind::HealthWorker => "health_worker",
            EntityKind::Customer => "customer",
            EntityKind::Lab => "lab",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = CareMapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "coordinator" | "coordinators" | "co" => Ok(EntityKind::Coordinator),
            "worker" | "workers" | "health_worker" | "health-worker" | "sakhi" | "hs" => {
                Ok(EntityKind::HealthWorker)
            }
            "customer" | "customers" | "cu" => Ok(EntityKind::Customer),
            "lab" | "labs" => Ok(EntityKind::Lab),
            _ => Err(CareMapError::UnknownEntityKind { kind: s.to_string() }),
        }
    }
}

/// Phone and email shown on entity cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

/// Health worker specialization vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    MaternalHealth,
    ChildHealth,
    Nutrition,
    Immunization,
    FamilyPlanning,
    ChronicDisease,
    FirstAid,
    MentalHealth,
}

impl Specialization {
    pub const ALL: [Specialization; 8] = [
        Specialization::MaternalHealth,
        Specialization::ChildHealth,
        Specialization::Nutrition,
        Specialization::Immunization,
        Specialization::FamilyPlanning,
        Specialization::ChronicDisease,
        Specialization::FirstAid,
        Specialization::MentalHealth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Specialization::MaternalHealth => "Maternal Health",
            Specialization::ChildHealth => "Child Health",
            Specialization::Nutrition => "Nutrition",
            Specialization::Immunization => "Immunization",
            Specialization::FamilyPlanning => "Family Planning",
            Specialization::ChronicDisease => "Chronic Disease",
            Specialization::FirstAid => "First Aid",
            Specialization::MentalHealth => "Mental Health",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Diagnostic services a lab may offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabService {
    BloodTest,
    Urinalysis,
    XRay,
    Ultrasound,
    Ecg,
    ThyroidProfile,
    LipidProfile,
    Hba1c,
    MalariaTest,
    TbScreening,
}

impl LabService {
    pub const ALL: [LabService; 10] = [
        LabService::BloodTest,
        LabService::Urinalysis,
        LabService::XRay,
        LabService::Ultrasound,
        LabService::Ecg,
        LabService::ThyroidProfile,
        LabService::LipidProfile,
        LabService::Hba1c,
        LabService::MalariaTest,
        LabService::TbScreening,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LabService::BloodTest => "Blood Test",
            LabService::Urinalysis => "Urinalysis",
            LabService::XRay => "X-Ray",
            LabService::Ultrasound => "Ultrasound",
            LabService::Ecg => "ECG",
            LabService::ThyroidProfile => "Thyroid Profile",
            LabService::LipidProfile => "Lipid Profile",
            LabService::Hba1c => "HbA1c",
            LabService::MalariaTest => "Malaria Test",
            LabService::TbScreening => "TB Screening",
        }
    }
}

impl fmt::Display for LabService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LabService {
    type Err = CareMapError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.to_lowercase().replace(['-', '_', ' '], "");
        LabService::ALL
            .into_iter()
            .find(|service| service.label().to_lowercase().replace(['-', ' '], "") == wanted)
            .ok_or_else(|| CareMapError::UnknownLabService { service: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// Opening hours and weekdays of a lab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
    /// Sorted Monday first
    pub days: Vec<Weekday>,
}

impl WorkingHours {
    /// Check whether the lab is open at the given weekday and time
    pub fn is_open(&self, day: Weekday, time: NaiveTime) -> bool {
        self.days.contains(&day) && time >= self.opens && time < self.closes
    }
}

/// Top-level regional role overseeing several health workers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinator {
    pub id: CoordinatorId,
    pub name: String,
    pub position: Coordinate,
    pub district: String,
    pub linked_health_workers: BTreeSet<HealthWorkerId>,
    pub contact: ContactInfo,
}

/// Field worker ("Health Sakhi") serving nearby customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthWorker {
    pub id: HealthWorkerId,
    pub name: String,
    pub village: String,
    pub position: Coordinate,
    pub specializations: BTreeSet<Specialization>,
    pub contact: ContactInfo,
    pub coordinator_id: CoordinatorId,
    pub linked_lab: Option<LabId>,
    pub linked_customers: BTreeSet<CustomerId>,
}

/// End beneficiary, optionally served by the nearest health worker in range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub village: String,
    pub position: Coordinate,
    pub contact: ContactInfo,
    pub linked_health_worker: Option<HealthWorkerId>,
    pub medical_history: Vec<VisitRecord>,
    pub appointments: Vec<Appointment>,
}

/// Diagnostic service provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub id: LabId,
    pub name: String,
    pub position: Coordinate,
    pub address: String,
    pub contact: ContactInfo,
    pub services: BTreeSet<LabService>,
    pub working_hours: WorkingHours,
}

impl Lab {
    pub fn offers(&self, service: LabService) -> bool {
        self.services.contains(&service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_ids_are_zero_padded() {
        assert_eq!(CoordinatorId::from_sequence(3).as_str(), "CO-003");
        assert_eq!(HealthWorkerId::from_sequence(12).as_str(), "HS-012");
        assert_eq!(CustomerId::from_sequence(7).as_str(), "CU-0007");
        assert_eq!(LabId::from_sequence(1).as_str(), "LAB-01");
    }

    #[test]
    fn test_id_map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(LabId::from_sequence(4), 3usize);
        assert_eq!(map.get("LAB-04"), Some(&3));
        assert_eq!(map.get("does-not-exist"), None);
    }

    #[test]
    fn test_entity_kind_parsing() {
        assert_eq!("lab".parse::<EntityKind>().unwrap(), EntityKind::Lab);
        assert_eq!("Workers".parse::<EntityKind>().unwrap(), EntityKind::HealthWorker);
        assert_eq!("sakhi".parse::<EntityKind>().unwrap(), EntityKind::HealthWorker);
        assert!("hospital".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_lab_service_parsing() {
        assert_eq!("x-ray".parse::<LabService>().unwrap(), LabService::XRay);
        assert_eq!("blood_test".parse::<LabService>().unwrap(), LabService::BloodTest);
        assert_eq!("HBA1C".parse::<LabService>().unwrap(), LabService::Hba1c);
        assert!("mri".parse::<LabService>().is_err());
    }

    #[test]
    fn test_working_hours() {
        let hours = WorkingHours {
            opens: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            closes: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            days: vec![Weekday::Mon, Weekday::Tue],
        };
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(hours.is_open(Weekday::Mon, noon));
        assert!(!hours.is_open(Weekday::Sun, noon));
        assert!(!hours.is_open(Weekday::Tue, hours.closes));
    }
}
