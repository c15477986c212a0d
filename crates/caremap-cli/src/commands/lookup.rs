//! Lookup command implementation

use super::{open_session, GlobalArgs};
use crate::cli::LookupArgs;
use crate::output::OutputWriter;
use anyhow::Result;
use caremap_query::{EntityRef, ProximityQueryEngine};

pub fn execute(args: LookupArgs, globals: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let session = open_session(globals)?;
    let engine = ProximityQueryEngine::new(&session.graph);

    // Logins are lowercased ids, so `lab-01` also finds LAB-01
    let entity = engine.entity_by_id(args.kind, &args.id).or_else(|| {
        let user = session.graph.user_by_username(&args.id)?;
        engine.entity_by_id(args.kind, &user.entity_id)
    });
    let Some(entity) = entity else {
        output.warning(format!("No {} with id '{}'", args.kind, args.id));
        return Ok(());
    };

    if output.is_json() {
        return output.result(entity);
    }

    output.section(format!("{} {}", args.kind, entity.id()));
    output.kv("Name", entity.name());
    output.kv("Position", entity.position());
    output.kv("Locality", entity.locality());

    match entity {
        EntityRef::Coordinator(c) => {
            output.kv("Health Workers", join(c.linked_health_workers.iter()));
            output.kv("Phone", &c.contact.phone);
            output.kv("Email", &c.contact.email);
        }
        EntityRef::HealthWorker(w) => {
            output.kv("Coordinator", &w.coordinator_id);
            output.kv("Lab", w.linked_lab.as_ref().map_or("-", |lab| lab.as_str()));
            output.kv("Specializations", join(w.specializations.iter()));
            output.kv("Customers", w.linked_customers.len());
            output.kv("Phone", &w.contact.phone);
        }
        EntityRef::Customer(c) => {
            output.kv("Age", c.age);
            output.kv("Gender", format!("{:?}", c.gender));
            output.kv(
                "Health Worker",
                c.linked_health_worker.as_ref().map_or("unassigned", |w| w.as_str()),
            );
            output.kv("Visits", c.medical_history.len());
            output.kv("Appointments", c.appointments.len());
            output.kv("Phone", &c.contact.phone);
        }
        EntityRef::Lab(l) => {
            output.kv("Services", join(l.services.iter()));
            output.kv(
                "Hours",
                format!(
                    "{}-{} {}",
                    l.working_hours.opens.format("%H:%M"),
                    l.working_hours.closes.format("%H:%M"),
                    join(l.working_hours.days.iter())
                ),
            );
            output.kv("Phone", &l.contact.phone);
        }
    }

    if let Some(user) = session.graph.user_for_entity(entity.id()) {
        output.kv("Login", &user.username);
    }

    Ok(())
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let parts: Vec<String> = items.map(|item| item.to_string()).collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}
