//! Nearest-worker assignment of customers.

use caremap_core::models::Coordinate;
use caremap_geo::PointIndex;

/// Slot of the health worker that should serve a customer at `position`
///
/// Picks the minimum haversine distance among workers within
/// `assignment_radius_km` (inclusive). Equal distances resolve to the
/// earliest generated worker, the same outcome as a first-seen scan over
/// workers in generation order. `None` leaves the customer unassigned.
pub fn nearest_worker_within(
    worker_index: &PointIndex,
    position: Coordinate,
    assignment_radius_km: f64,
) -> Option<usize> {
    worker_index.nearest_within(position, assignment_radius_km).map(|(slot, _)| slot)
}
