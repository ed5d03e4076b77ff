use anyhow::{anyhow, Result};
use std::{
    env, fs,
    io::ErrorKind,
    path::Path,
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "platefinder.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

const DEFAULT_GEOCODER_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_CONCURRENCY: usize = 4;

pub struct Config {
    pub db: Db,
    pub geocoding: Geocoding,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    /// Upper bound for a single geocoder request.
    pub timeout: Duration,
    /// Number of addresses resolved in parallel.
    pub max_concurrency: usize,
}

pub enum GeocodingGateway {
    Yandex {
        api_key: String,
        api_base_url: Option<String>,
    },
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            geocoding,
            gateway,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::Geocoding {
            gateway: gw_name,
            timeout,
            max_concurrency,
        } = geocoding.unwrap_or_default();

        let geo_gateway = match gw_name {
            Some(gw_name) => {
                let gateway = gateway.ok_or_else(|| anyhow!("Missing gateway configuration"))?;
                let gw = match gw_name {
                    raw::GeocodingGateway::Yandex => {
                        let raw::Yandex {
                            api_key,
                            api_base_url,
                        } = gateway
                            .yandex
                            .ok_or_else(|| anyhow!("Missing 'yandex' gateway configuration"))?;
                        GeocodingGateway::Yandex {
                            api_key,
                            api_base_url,
                        }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
            timeout: timeout.unwrap_or(DEFAULT_GEOCODER_TIMEOUT),
            max_concurrency: max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY),
        };

        Ok(Self { db, geocoding })
    }
}
