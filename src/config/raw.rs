use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("platefinder.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
    pub max_concurrency: Option<usize>,
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default().geocoding.expect("Geocoding configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Yandex,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub yandex: Option<Yandex>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Yandex {
    pub api_key: String,
    pub api_base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(cfg.db.is_some());
        assert!(cfg.geocoding.is_some());
        assert!(cfg.gateway.is_none());
    }

    #[test]
    fn default_geocoding_config() {
        let cfg = Geocoding::default();
        assert!(cfg.gateway.is_none());
        assert!(cfg.timeout.is_some());
        assert!(cfg.max_concurrency.is_some());
    }

    #[test]
    fn parse_full_config_example_from_file() {
        let cfg_string = fs::read_to_string("src/config/platefinder.full-example.toml").unwrap();
        let cfg: Config = toml::from_str(&cfg_string).unwrap();
        assert!(matches!(
            cfg.geocoding.and_then(|g| g.gateway),
            Some(GeocodingGateway::Yandex)
        ));
        assert!(cfg.gateway.and_then(|g| g.yandex).is_some());
    }
}
