use crate::distance::{distance_km, EARTH_RADIUS_KM};
use caremap_core::models::Coordinate;
use rstar::{RTree, RTreeObject, AABB};
use std::cmp::Ordering;

/// Position of one entity, keyed by its slot in the owning collection
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPosition {
    /// Index of the entity in its collection (generation order)
    pub slot: usize,

    pub position: Coordinate,
}

impl RTreeObject for IndexedPosition {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position.lon_lat())
    }
}

/// R-tree over entity positions answering haversine radius queries
///
/// The tree works in lon/lat degrees; radius queries first cut candidates
/// with a degree envelope that always contains the spherical cap, then keep
/// the ones whose haversine distance is within the radius (inclusive).
#[derive(Debug, Default)]
pub struct PointIndex {
    tree: RTree<IndexedPosition>,
}

impl PointIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load positions; each position's slot is its enumeration index
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let indexed: Vec<IndexedPosition> = positions
            .into_iter()
            .enumerate()
            .map(|(slot, position)| IndexedPosition { slot, position })
            .collect();

        Self { tree: RTree::bulk_load(indexed) }
    }

    /// Query positions within a lon/lat bounding box
    pub fn query_bbox(&self, min: [f64; 2], max: [f64; 2]) -> Vec<&IndexedPosition> {
        let bbox = AABB::from_corners(min, max);
        self.tree.locate_in_envelope(&bbox).collect()
    }

    /// All slots whose distance to `center` is `<= radius_km`, with distances
    ///
    /// Sorted by ascending distance; equal distances keep generation order.
    pub fn within_radius(&self, center: Coordinate, radius_km: f64) -> Vec<(usize, f64)> {
        let candidates: Vec<&IndexedPosition> = match search_envelope(center, radius_km) {
            Some((min, max)) => self.query_bbox(min, max),
            None => self.tree.iter().collect(),
        };

        let mut hits: Vec<(usize, f64)> = candidates
            .into_iter()
            .filter_map(|indexed| {
                let d = distance_km(&center, &indexed.position);
                (d <= radius_km).then_some((indexed.slot, d))
            })
            .collect();

        hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
        hits
    }

    /// Closest slot within `radius_km`, ties going to the earliest slot
    pub fn nearest_within(&self, center: Coordinate, radius_km: f64) -> Option<(usize, f64)> {
        self.within_radius(center, radius_km).into_iter().next()
    }

    /// Get the total number of positions in the index
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Lon/lat box containing every point within `radius_km` of `center`
///
/// Returns `None` when the cap reaches a pole or crosses the antimeridian;
/// callers then scan everything.
fn search_envelope(center: Coordinate, radius_km: f64) -> Option<([f64; 2], [f64; 2])> {
    // Headroom so rounding never drops a point sitting exactly on the rim
    const MARGIN_DEG: f64 = 1e-7;

    let delta = radius_km / EARTH_RADIUS_KM;
    let phi = center.lat.to_radians();
    if delta >= std::f64::consts::FRAC_PI_2 || phi.abs() + delta >= std::f64::consts::FRAC_PI_2 {
        return None;
    }

    let d_lat = delta.to_degrees() + MARGIN_DEG;
    // Widest longitude span of a spherical cap of angular radius delta
    let d_lon = (delta.sin() / phi.cos()).asin().to_degrees() + MARGIN_DEG;

    let min = [center.lon - d_lon, center.lat - d_lat];
    let max = [center.lon + d_lon, center.lat + d_lat];
    if min[0] < -180.0 || max[0] > 180.0 {
        return None;
    }

    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::sample_in_disc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BASE: Coordinate = Coordinate::new(12.1289, 78.1578);

    fn scattered(seed: u64, count: usize, radius_km: f64) -> Vec<Coordinate> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count).map(|_| sample_in_disc(&mut rng, BASE, radius_km)).collect()
    }

    #[test]
    fn test_index_creation() {
        let index = PointIndex::new();
        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
        assert!(index.within_radius(BASE, 1000.0).is_empty());
    }

    #[test]
    fn test_within_radius_matches_linear_scan() {
        let positions = scattered(5, 300, 40.0);
        let index = PointIndex::from_positions(positions.iter().copied());

        for radius_km in [0.0, 1.0, 5.0, 12.5, 30.0, 80.0] {
            let mut expected: Vec<usize> = positions
                .iter()
                .enumerate()
                .filter(|(_, p)| distance_km(&BASE, p) <= radius_km)
                .map(|(slot, _)| slot)
                .collect();
            let mut got: Vec<usize> =
                index.within_radius(BASE, radius_km).into_iter().map(|(s, _)| s).collect();
            expected.sort_unstable();
            got.sort_unstable();
            assert_eq!(got, expected, "radius {}", radius_km);
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let east = Coordinate::new(BASE.lat, BASE.lon + 0.05);
        let index = PointIndex::from_positions([east]);
        let exact = distance_km(&BASE, &east);

        assert_eq!(index.within_radius(BASE, exact).len(), 1);
        assert!(index.within_radius(BASE, exact * 0.999).is_empty());
    }

    #[test]
    fn test_results_sorted_by_distance() {
        let index = PointIndex::from_positions(scattered(9, 100, 25.0));
        let hits = index.within_radius(BASE, 25.0);
        assert!(hits.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn test_nearest_within_prefers_earliest_on_tie() {
        let north = Coordinate::new(BASE.lat + 0.02, BASE.lon);
        let index = PointIndex::from_positions([north, north, BASE]);

        let (slot, d) = index.nearest_within(BASE, 10.0).unwrap();
        assert_eq!(slot, 2);
        assert_eq!(d, 0.0);

        let index = PointIndex::from_positions([north, north]);
        assert_eq!(index.nearest_within(BASE, 10.0).unwrap().0, 0);
        assert!(index.nearest_within(BASE, 1.0).is_none());
    }

    #[test]
    fn test_envelope_falls_back_near_poles() {
        assert!(search_envelope(Coordinate::new(89.5, 0.0), 100.0).is_none());
        assert!(search_envelope(Coordinate::new(0.0, 179.9), 50.0).is_none());
        assert!(search_envelope(BASE, 1000.0).is_some());
    }
}
