use caremap_core::config::LabLinkPolicy;
use caremap_core::models::{Coordinate, EntityKind};
use caremap_store::GraphSummary;
use serde::Serialize;
use tabled::Tabled;

fn display_km(km: &f64) -> String {
    format!("{:.2}", km)
}

fn display_optional_km(km: &Option<f64>) -> String {
    km.map_or_else(|| "-".to_string(), |km| display_km(&km))
}

/// Output for generate command
#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    #[serde(flatten)]
    pub summary: GraphSummary,
    pub assignment_coverage: f64,
    pub lab_link_policy: LabLinkPolicy,
}

#[derive(Debug, Serialize, Tabled)]
pub struct CoordinatorRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "District")]
    pub district: String,
    #[tabled(rename = "Workers")]
    pub workers: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct WorkerRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Village")]
    pub village: String,
    #[tabled(rename = "Lab")]
    pub lab: String,
    #[tabled(rename = "Customers")]
    pub customers: usize,
    #[tabled(rename = "Specializations")]
    pub specializations: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct CustomerRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Age")]
    pub age: u8,
    #[tabled(rename = "Village")]
    pub village: String,
    #[tabled(rename = "Visits")]
    pub visits: usize,
    #[tabled(rename = "Appointments")]
    pub appointments: usize,
}

/// Output for nearby command
#[derive(Debug, Serialize)]
pub struct NearbyOutput {
    pub center: Coordinate,
    pub radius_km: f64,
    pub results: Vec<NearbyRow>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct NearbyRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Locality")]
    pub locality: String,
    #[tabled(rename = "Distance (km)", display_with = "display_km")]
    pub distance_km: f64,
}

#[derive(Debug, Serialize, Tabled)]
pub struct MarkerRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Kind")]
    pub kind: EntityKind,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Lat")]
    pub lat: f64,
    #[tabled(rename = "Lon")]
    pub lon: f64,
    #[tabled(rename = "Distance (km)", display_with = "display_optional_km")]
    pub distance_km: Option<f64>,
}

/// One row of the config command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
