use crate::error::{CareMapError, Result};
use crate::models::{Coordinate, KM_PER_DEGREE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::Path;

/// Regional base point the default dataset is centred on (Dharmapuri district)
pub const DEFAULT_BASE: Coordinate = Coordinate::new(12.1289, 78.1578);

/// Maximum distance at which a health worker may serve a customer
pub const DEFAULT_ASSIGNMENT_RADIUS_KM: f64 = 10.0;

/// How health workers get their linked lab during generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LabLinkPolicy {
    /// Each worker is linked once to a uniformly chosen lab, independent of customers
    #[default]
    AtWorkerSetup,
    /// Every customer assignment re-rolls the assigned worker's lab
    PerAssignment,
}

/// Parameters of one generation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// RNG seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
    pub base: Coordinate,
    pub district: String,
    pub coordinator_count: usize,
    pub min_workers_per_coordinator: usize,
    pub max_workers_per_coordinator: usize,
    pub lab_count: usize,
    pub customer_count: usize,
    pub coordinator_radius_km: f64,
    pub worker_radius_km: f64,
    pub lab_radius_km: f64,
    pub customer_radius_km: f64,
    pub assignment_radius_km: f64,
    pub lab_link_policy: LabLinkPolicy,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            base: DEFAULT_BASE,
            district: "Dharmapuri".to_string(),
            coordinator_count: 8,
            min_workers_per_coordinator: 3,
            max_workers_per_coordinator: 6,
            lab_count: 12,
            customer_count: 120,
            coordinator_radius_km: 50.0,
            worker_radius_km: 20.0,
            lab_radius_km: 30.0,
            customer_radius_km: 50.0,
            assignment_radius_km: DEFAULT_ASSIGNMENT_RADIUS_KM,
            lab_link_policy: LabLinkPolicy::AtWorkerSetup,
        }
    }
}

impl GeneratorSettings {
    /// Settings with a fixed seed, for reproducible graphs
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Default::default() }
    }

    /// Reject parameters that would make generation meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.base.is_valid() {
            return Err(CareMapError::InvalidCoordinate {
                lat: self.base.lat,
                lon: self.base.lon,
            });
        }

        let radii = [
            ("coordinator_radius_km", self.coordinator_radius_km),
            ("worker_radius_km", self.worker_radius_km),
            ("lab_radius_km", self.lab_radius_km),
            ("customer_radius_km", self.customer_radius_km),
            ("assignment_radius_km", self.assignment_radius_km),
        ];
        for (key, radius) in radii {
            if !radius.is_finite() || radius < 0.0 {
                return Err(CareMapError::ConfigInvalid {
                    key: key.to_string(),
                    reason: format!("Radius must be a finite, non-negative number, got {}", radius),
                });
            }
        }

        self.validate_reach()?;

        if self.min_workers_per_coordinator > self.max_workers_per_coordinator {
            return Err(CareMapError::ConfigInvalid {
                key: "workers_per_coordinator".to_string(),
                reason: format!(
                    "Minimum {} exceeds maximum {}",
                    self.min_workers_per_coordinator, self.max_workers_per_coordinator
                ),
            });
        }

        Ok(())
    }

    /// Farthest any generated entity can land from `base`, in km
    ///
    /// Health workers are drawn around their coordinator, so their reach is
    /// the sum of both radii.
    pub fn sampling_reach_km(&self) -> f64 {
        (self.coordinator_radius_km + self.worker_radius_km)
            .max(self.lab_radius_km)
            .max(self.customer_radius_km)
    }

    /// Every sampled position must stay a valid coordinate
    ///
    /// The latitude bound is `|base.lat| + reach / KM_PER_DEGREE`. The
    /// longitude span is the reach stretched by `1 / cos` of that bound, the
    /// widest a flat-Earth offset can get anywhere inside the sampled area.
    fn validate_reach(&self) -> Result<()> {
        let reach_km = self.sampling_reach_km();
        let max_abs_lat = self.base.lat.abs() + reach_km / KM_PER_DEGREE;
        if max_abs_lat > 90.0 {
            return Err(CareMapError::ConfigInvalid {
                key: "base".to_string(),
                reason: format!(
                    "Sampling {} km around latitude {} would cross a pole",
                    reach_km, self.base.lat
                ),
            });
        }

        let lon_span = reach_km / (KM_PER_DEGREE * max_abs_lat.to_radians().cos());
        if self.base.lon - lon_span < -180.0 || self.base.lon + lon_span > 180.0 {
            return Err(CareMapError::ConfigInvalid {
                key: "base".to_string(),
                reason: format!(
                    "Sampling {} km around ({}, {}) would cross the antimeridian",
                    reach_km, self.base.lat, self.base.lon
                ),
            });
        }

        Ok(())
    }
}

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for CareMap generation
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub seed: ConfigValue<Option<u64>>,
    pub base_lat: ConfigValue<f64>,
    pub base_lon: ConfigValue<f64>,
    pub coordinator_count: ConfigValue<usize>,
    pub customer_count: ConfigValue<usize>,
    pub lab_count: ConfigValue<usize>,
    pub assignment_radius_km: ConfigValue<f64>,
    pub lab_link_policy: ConfigValue<LabLinkPolicy>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let defaults = GeneratorSettings::default();
        Self {
            seed: ConfigValue::new(defaults.seed, ConfigSource::Default),
            base_lat: ConfigValue::new(defaults.base.lat, ConfigSource::Default),
            base_lon: ConfigValue::new(defaults.base.lon, ConfigSource::Default),
            coordinator_count: ConfigValue::new(defaults.coordinator_count, ConfigSource::Default),
            customer_count: ConfigValue::new(defaults.customer_count, ConfigSource::Default),
            lab_count: ConfigValue::new(defaults.lab_count, ConfigSource::Default),
            assignment_radius_km: ConfigValue::new(
                defaults.assignment_radius_km,
                ConfigSource::Default,
            ),
            lab_link_policy: ConfigValue::new(defaults.lab_link_policy, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CareMapError::ConfigMissing {
                key: format!("config file {}", path.display()),
            },
            _ => CareMapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            },
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CareMapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(seed) = file_config.seed {
            self.seed.update(Some(seed), ConfigSource::File);
        }

        if let Some(base_lat) = file_config.base_lat {
            self.base_lat.update(base_lat, ConfigSource::File);
        }

        if let Some(base_lon) = file_config.base_lon {
            self.base_lon.update(base_lon, ConfigSource::File);
        }

        if let Some(count) = file_config.coordinator_count {
            self.coordinator_count.update(count, ConfigSource::File);
        }

        if let Some(count) = file_config.customer_count {
            self.customer_count.update(count, ConfigSource::File);
        }

        if let Some(count) = file_config.lab_count {
            self.lab_count.update(count, ConfigSource::File);
        }

        if let Some(radius) = file_config.assignment_radius_km {
            self.assignment_radius_km.update(radius, ConfigSource::File);
        }

        if let Some(policy) = file_config.lab_link_policy {
            self.lab_link_policy.update(policy, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CAREMAP_SEED
        if let Ok(seed_str) = env::var("CAREMAP_SEED") {
            match seed_str.parse::<u64>() {
                Ok(seed) => self.seed.update(Some(seed), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CAREMAP_SEED value '{}': expected unsigned integer",
                    seed_str
                ),
            }
        }

        // CAREMAP_BASE_LAT / CAREMAP_BASE_LON
        if let Some(lat) = parse_env_f64("CAREMAP_BASE_LAT") {
            self.base_lat.update(lat, ConfigSource::Environment);
        }
        if let Some(lon) = parse_env_f64("CAREMAP_BASE_LON") {
            self.base_lon.update(lon, ConfigSource::Environment);
        }

        // CAREMAP_COORDINATORS / CAREMAP_CUSTOMERS / CAREMAP_LABS
        if let Some(count) = parse_env_count("CAREMAP_COORDINATORS") {
            self.coordinator_count.update(count, ConfigSource::Environment);
        }
        if let Some(count) = parse_env_count("CAREMAP_CUSTOMERS") {
            self.customer_count.update(count, ConfigSource::Environment);
        }
        if let Some(count) = parse_env_count("CAREMAP_LABS") {
            self.lab_count.update(count, ConfigSource::Environment);
        }

        // CAREMAP_ASSIGNMENT_RADIUS_KM
        if let Some(radius) = parse_env_f64("CAREMAP_ASSIGNMENT_RADIUS_KM") {
            self.assignment_radius_km.update(radius, ConfigSource::Environment);
        }

        // CAREMAP_LAB_LINKS
        if let Ok(policy_str) = env::var("CAREMAP_LAB_LINKS") {
            match parse_lab_link_policy(&policy_str) {
                Ok(policy) => self.lab_link_policy.update(policy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CAREMAP_LAB_LINKS value '{}': expected at-worker-setup or per-assignment",
                    policy_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(seed) = overrides.seed {
            self.seed.update(Some(seed), ConfigSource::Cli);
        }

        if let Some(count) = overrides.coordinator_count {
            self.coordinator_count.update(count, ConfigSource::Cli);
        }

        if let Some(count) = overrides.customer_count {
            self.customer_count.update(count, ConfigSource::Cli);
        }

        if let Some(count) = overrides.lab_count {
            self.lab_count.update(count, ConfigSource::Cli);
        }

        if let Some(radius) = overrides.assignment_radius_km {
            self.assignment_radius_km.update(radius, ConfigSource::Cli);
        }

        if let Some(policy) = overrides.lab_link_policy {
            self.lab_link_policy.update(policy, ConfigSource::Cli);
        }
    }

    /// Resolve the layered values into validated generator settings
    pub fn to_settings(&self) -> Result<GeneratorSettings> {
        let settings = GeneratorSettings {
            seed: self.seed.value,
            base: Coordinate::new(self.base_lat.value, self.base_lon.value),
            coordinator_count: self.coordinator_count.value,
            customer_count: self.customer_count.value,
            lab_count: self.lab_count.value,
            assignment_radius_km: self.assignment_radius_km.value,
            lab_link_policy: self.lab_link_policy.value,
            ..GeneratorSettings::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "seed".to_string(),
            (
                self.seed.value.map_or_else(|| "random".to_string(), |s| s.to_string()),
                self.seed.source,
            ),
        );

        map.insert(
            "base_lat".to_string(),
            (self.base_lat.value.to_string(), self.base_lat.source),
        );

        map.insert(
            "base_lon".to_string(),
            (self.base_lon.value.to_string(), self.base_lon.source),
        );

        map.insert(
            "coordinator_count".to_string(),
            (self.coordinator_count.value.to_string(), self.coordinator_count.source),
        );

        map.insert(
            "customer_count".to_string(),
            (self.customer_count.value.to_string(), self.customer_count.source),
        );

        map.insert("lab_count".to_string(), (self.lab_count.value.to_string(), self.lab_count.source));

        map.insert(
            "assignment_radius_km".to_string(),
            (self.assignment_radius_km.value.to_string(), self.assignment_radius_km.source),
        );

        map.insert(
            "lab_link_policy".to_string(),
            (format!("{:?}", self.lab_link_policy.value), self.lab_link_policy.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    seed: Option<u64>,
    base_lat: Option<f64>,
    base_lon: Option<f64>,
    coordinator_count: Option<usize>,
    customer_count: Option<usize>,
    lab_count: Option<usize>,
    assignment_radius_km: Option<f64>,
    lab_link_policy: Option<LabLinkPolicy>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub seed: Option<u64>,
    pub coordinator_count: Option<usize>,
    pub customer_count: Option<usize>,
    pub lab_count: Option<usize>,
    pub assignment_radius_km: Option<f64>,
    pub lab_link_policy: Option<LabLinkPolicy>,
}

/// Parse lab link policy from string
pub fn parse_lab_link_policy(s: &str) -> Result<LabLinkPolicy> {
    match s.to_lowercase().as_str() {
        "at-worker-setup" | "at-setup" | "setup" => Ok(LabLinkPolicy::AtWorkerSetup),
        "per-assignment" | "assignment" | "legacy" => Ok(LabLinkPolicy::PerAssignment),
        _ => Err(CareMapError::ConfigInvalid {
            key: "lab_link_policy".to_string(),
            reason: format!("Invalid lab link policy: {}. Use at-worker-setup or per-assignment", s),
        }),
    }
}

fn parse_env_f64(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!("Invalid {} value '{}': expected a finite number", key, raw);
            None
        }
    }
}

fn parse_env_count(key: &str) -> Option<usize> {
    let raw = env::var(key).ok()?;
    match raw.parse::<usize>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected unsigned integer", key, raw);
            None
        }
    }
}
