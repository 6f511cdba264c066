use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::services::DEFAULT_MAX_PRODUCTS;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub scraper: ScraperSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    pub user_agent: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_products")]
    pub max_products: usize,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

fn default_max_products() -> usize {
    DEFAULT_MAX_PRODUCTS
}

impl ScraperSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}

/// Reads `configuration.yaml` from the working directory, then applies
/// `APP_`-prefixed environment overrides such as `APP_APPLICATION__PORT`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("No working directory: {}", e)))?;

    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings: Settings = settings.try_deserialize()?;

    if settings.scraper.min_delay_ms > settings.scraper.max_delay_ms {
        return Err(config::ConfigError::Message(format!(
            "scraper.min_delay_ms ({}) is greater than scraper.max_delay_ms ({})",
            settings.scraper.min_delay_ms, settings.scraper.max_delay_ms
        )));
    }

    Ok(settings)
}
