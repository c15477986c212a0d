//! Synthetic login identities for generated entities.
//!
//! The auth layer resolves a login to an entity through `entity_id`; the
//! records carry no secrets.

use super::entities::EntityKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dashboard role granted to a login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Coordinator,
    HealthWorker,
    Customer,
    Lab,
}

impl From<EntityKind> for Role {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Coordinator => Role::Coordinator,
            EntityKind::HealthWorker => Role::HealthWorker,
            EntityKind::Customer => Role::Customer,
            EntityKind::Lab => Role::Lab,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    /// Id of the coordinator, worker, customer or lab this login resolves to
    pub entity_id: String,
}
