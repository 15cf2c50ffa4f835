//! Configuration management for the travel planner
//!
//! Handles loading configuration from a TOML file and environment
//! variables, and validates all settings. The city coordinate table
//! lives here and is injected into the request handlers; it is the
//! only process-wide state and is read-only after startup.

use crate::PlannerError;
use crate::models::Coordinates;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure for the travel planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Overpass point-of-interest index settings
    #[serde(default)]
    pub overpass: OverpassConfig,
    /// Open-Meteo forecast provider settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// OSRM-compatible routing provider settings
    #[serde(default)]
    pub routing: RoutingConfig,
    /// City name -> coordinates; cities outside this table cannot be planned
    #[serde(default = "default_cities")]
    pub cities: HashMap<String, Coordinates>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent on outbound requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Overpass API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Overpass interpreter endpoint
    #[serde(default = "default_overpass_base_url")]
    pub base_url: String,
    /// Search radius for attractions in meters
    #[serde(default = "default_poi_radius")]
    pub poi_radius_m: u32,
    /// Search radius for restaurants in meters
    #[serde(default = "default_restaurant_radius")]
    pub restaurant_radius_m: u32,
}

/// Open-Meteo API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

/// Routing provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL for the OSRM-compatible routing API
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("travel-planner/{}", env!("CARGO_PKG_VERSION"))
}

fn default_overpass_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_poi_radius() -> u32 {
    10_000
}

fn default_restaurant_radius() -> u32 {
    5_000
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_routing_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_cities() -> HashMap<String, Coordinates> {
    HashMap::from([
        ("Paris".to_string(), Coordinates::new(48.8566, 2.3522)),
        ("London".to_string(), Coordinates::new(51.5074, -0.1278)),
        ("Rome".to_string(), Coordinates::new(41.9028, 12.4964)),
        ("Barcelona".to_string(), Coordinates::new(41.3874, 2.1686)),
        ("Berlin".to_string(), Coordinates::new(52.5200, 13.4050)),
        ("Tokyo".to_string(), Coordinates::new(35.6762, 139.6503)),
        ("Kyoto".to_string(), Coordinates::new(35.0116, 135.7681)),
        ("New York".to_string(), Coordinates::new(40.7128, -74.0060)),
    ])
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: default_overpass_base_url(),
            poi_radius_m: default_poi_radius(),
            restaurant_radius_m: default_restaurant_radius(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            http: HttpConfig::default(),
            overpass: OverpassConfig::default(),
            weather: WeatherConfig::default(),
            routing: RoutingConfig::default(),
            cities: default_cities(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from `config.toml` (if present) and
    /// `TRAVELPLANNER_`-prefixed environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("TRAVELPLANNER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > 300 {
            return Err(PlannerError::config(
                "HTTP timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.overpass.poi_radius_m == 0 || self.overpass.poi_radius_m > 100_000 {
            return Err(PlannerError::config(
                "Attraction search radius must be between 1 and 100000 meters",
            )
            .into());
        }

        if self.overpass.restaurant_radius_m == 0 || self.overpass.restaurant_radius_m > 100_000 {
            return Err(PlannerError::config(
                "Restaurant search radius must be between 1 and 100000 meters",
            )
            .into());
        }

        for (name, url) in [
            ("overpass", &self.overpass.base_url),
            ("weather", &self.weather.base_url),
            ("routing", &self.routing.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PlannerError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.cities.is_empty() {
            return Err(PlannerError::config("City coordinate table cannot be empty").into());
        }

        Ok(())
    }

    /// Look up a city's coordinates, case-insensitively
    #[must_use]
    pub fn city_coordinates(&self, city: &str) -> Option<Coordinates> {
        let wanted = city.trim();
        self.cities
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, coords)| *coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(
            config.overpass.base_url,
            "https://overpass-api.de/api/interpreter"
        );
        assert_eq!(config.overpass.restaurant_radius_m, 5000);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert!(config.cities.contains_key("Paris"));
    }

    #[test]
    fn test_default_config_validates() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_timeout() {
        let mut config = PlannerConfig::default();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let mut config = PlannerConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_cities() {
        let mut config = PlannerConfig::default();
        config.cities.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_city_lookup_is_case_insensitive() {
        let config = PlannerConfig::default();
        let paris = config.city_coordinates("paris").unwrap();
        assert_eq!(paris.latitude, 48.8566);
        assert!(config.city_coordinates(" PARIS ").is_some());
        assert!(config.city_coordinates("Atlantis").is_none());
    }
}
