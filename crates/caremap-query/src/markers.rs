//! Map markers for the dashboard views.
//!
//! A marker is the flattened, serializable form of an entity pin. When the
//! projector has a reference point (the logged-in user's position, say),
//! every marker carries its distance from it.

use crate::entity::EntityRef;
use caremap_core::error::Result;
use caremap_core::models::{Coordinate, EntityKind};
use caremap_geo::distance_km;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// One pin on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub kind: EntityKind,
    pub label: String,
    pub position: Coordinate,

    /// Distance from the projector's reference point, if it has one
    pub distance_km: Option<f64>,
}

/// Turns entities into markers, optionally measuring from a reference point
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerProjector {
    reference: Option<Coordinate>,
}

impl MarkerProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projector measuring distances from `(lat, lon)`
    pub fn with_reference(lat: f64, lon: f64) -> Result<Self> {
        Ok(Self { reference: Some(Coordinate::try_new(lat, lon)?) })
    }

    pub fn reference(&self) -> Option<Coordinate> {
        self.reference
    }

    pub fn marker(&self, entity: EntityRef<'_>) -> MapMarker {
        let position = entity.position();
        MapMarker {
            id: entity.id().to_string(),
            kind: entity.kind(),
            label: entity.name().to_string(),
            position,
            distance_km: self.reference.map(|reference| distance_km(&reference, &position)),
        }
    }

    /// Markers in input order
    pub fn project<'a, I, E>(&self, entities: I) -> Vec<MapMarker>
    where
        I: IntoIterator<Item = E>,
        E: Into<EntityRef<'a>>,
    {
        entities.into_iter().map(|entity| self.marker(entity.into())).collect()
    }
}

/// Render markers as GeoJSON point features
pub fn to_feature_collection(markers: &[MapMarker]) -> FeatureCollection {
    let features = markers
        .iter()
        .map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), JsonValue::from(marker.kind.label()));
            properties.insert("label".to_string(), JsonValue::from(marker.label.clone()));
            if let Some(distance) = marker.distance_km {
                properties.insert("distance_km".to_string(), JsonValue::from(distance));
            }

            Feature {
                geometry: Some(Geometry::new(Value::Point(marker.position.lon_lat().to_vec()))),
                properties: Some(properties),
                id: Some(Id::String(marker.id.clone())),
                bbox: None,
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection { features, bbox: None, foreign_members: None }
}
