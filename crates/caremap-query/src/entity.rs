use caremap_core::models::{Coordinate, Coordinator, Customer, EntityKind, HealthWorker, Lab};
use serde::Serialize;

/// Borrowed view of any entity in a graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "entity", rename_all = "snake_case")]
pub enum EntityRef<'a> {
    Coordinator(&'a Coordinator),
    HealthWorker(&'a HealthWorker),
    Customer(&'a Customer),
    Lab(&'a Lab),
}

impl<'a> EntityRef<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Coordinator(_) => EntityKind::Coordinator,
            EntityRef::HealthWorker(_) => EntityKind::HealthWorker,
            EntityRef::Customer(_) => EntityKind::Customer,
            EntityRef::Lab(_) => EntityKind::Lab,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            EntityRef::Coordinator(c) => c.id.as_str(),
            EntityRef::HealthWorker(w) => w.id.as_str(),
            EntityRef::Customer(c) => c.id.as_str(),
            EntityRef::Lab(l) => l.id.as_str(),
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            EntityRef::Coordinator(c) => &c.name,
            EntityRef::HealthWorker(w) => &w.name,
            EntityRef::Customer(c) => &c.name,
            EntityRef::Lab(l) => &l.name,
        }
    }

    pub fn position(&self) -> Coordinate {
        match self {
            EntityRef::Coordinator(c) => c.position,
            EntityRef::HealthWorker(w) => w.position,
            EntityRef::Customer(c) => c.position,
            EntityRef::Lab(l) => l.position,
        }
    }

    /// Village or district line shown under the name on entity cards
    pub fn locality(&self) -> &'a str {
        match self {
            EntityRef::Coordinator(c) => &c.district,
            EntityRef::HealthWorker(w) => &w.village,
            EntityRef::Customer(c) => &c.village,
            EntityRef::Lab(l) => &l.address,
        }
    }
}

impl<'a> From<&'a Coordinator> for EntityRef<'a> {
    fn from(value: &'a Coordinator) -> Self {
        EntityRef::Coordinator(value)
    }
}

impl<'a> From<&'a HealthWorker> for EntityRef<'a> {
    fn from(value: &'a HealthWorker) -> Self {
        EntityRef::HealthWorker(value)
    }
}

impl<'a> From<&'a Customer> for EntityRef<'a> {
    fn from(value: &'a Customer) -> Self {
        EntityRef::Customer(value)
    }
}

impl<'a> From<&'a Lab> for EntityRef<'a> {
    fn from(value: &'a Lab) -> Self {
        EntityRef::Lab(value)
    }
}
