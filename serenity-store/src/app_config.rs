use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub capacity: CapacityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 { 10 }

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub path: String,
}

/// Where the room catalog comes from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    Backend,
    Static,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: CatalogSource,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Cap per guest-selector field
    #[serde(default = "default_max_party_members")]
    pub max_party_members: u32,
}

fn default_max_party_members() -> u32 { 10 }

impl Default for BookingConfig {
    fn default() -> Self {
        Self { max_party_members: default_max_party_members() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CapacityConfig {
    /// Room capacities that also take exactly one child on top of a full adult party
    #[serde(default = "default_extra_child_capacities")]
    pub extra_child_capacities: Vec<u32>,
}

fn default_extra_child_capacities() -> Vec<u32> { vec![2] }

impl Default for CapacityConfig {
    fn default() -> Self {
        Self { extra_child_capacities: default_extra_child_capacities() }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SERENITY__BACKEND__BASE_URL=http://...`
            .add_source(config::Environment::with_prefix("SERENITY").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(raw: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_optional_sections() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [backend]
            base_url = "http://localhost:4000/api/bookingweb"

            [session]
            path = "data/session.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.timeout_seconds, 10);
        assert_eq!(config.catalog.source, CatalogSource::Backend);
        assert_eq!(config.booking.max_party_members, 10);
        assert_eq!(config.capacity.extra_child_capacities, vec![2]);
    }

    #[test]
    fn test_static_catalog_and_capacity_overrides() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 3000

            [backend]
            base_url = "http://backend"
            timeout_seconds = 3

            [session]
            path = "session.json"

            [catalog]
            source = "static"

            [capacity]
            extra_child_capacities = [2, 4]
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.source, CatalogSource::Static);
        assert_eq!(config.capacity.extra_child_capacities, vec![2, 4]);
        assert_eq!(config.backend.timeout_seconds, 3);
    }

    #[test]
    fn test_missing_backend_is_an_error() {
        assert!(Config::from_toml("[server]\nport = 1\n[session]\npath = \"s\"").is_err());
    }
}
