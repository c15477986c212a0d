//! One synthetic login per generated entity.

use caremap_core::models::{EntityKind, Role, UserAccount};
use rand::Rng;
use uuid::{Builder, Uuid};

/// Build a login for an entity; the username is the lowercased entity id
pub fn account_for<R>(rng: &mut R, kind: EntityKind, entity_id: &str, display_name: &str) -> UserAccount
where
    R: Rng + ?Sized,
{
    UserAccount {
        user_id: seeded_uuid(rng),
        username: entity_id.to_lowercase(),
        display_name: display_name.to_string(),
        role: Role::from(kind),
        entity_id: entity_id.to_string(),
    }
}

/// Version 4 uuid drawn from the generator's RNG so seeded runs reproduce it
fn seeded_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.random::<[u8; 16]>()).into_uuid()
}
