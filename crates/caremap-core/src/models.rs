pub mod coordinate;
pub mod credentials;
pub mod entities;
pub mod medical;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, KM_PER_DEGREE};
pub use credentials::{Role, UserAccount};
pub use entities::{
    ContactInfo, Coordinator, CoordinatorId, Customer, CustomerId, EntityKind, Gender,
    HealthWorker, HealthWorkerId, Lab, LabId, LabService, Specialization, WorkingHours,
};
pub use medical::{Appointment, AppointmentStatus, LabTestEntry, VisitRecord};
