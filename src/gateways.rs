use crate::config;
use pf_core::{
    entities::{Address, MapPoint},
    gateways::geocode::{GeocodeError, GeocodingGateway},
};
use pf_gateways::Yandex;

pub fn geocoding_gateway(cfg: &config::Geocoding) -> anyhow::Result<GeocodingGw> {
    match &cfg.gateway {
        Some(config::GeocodingGateway::Yandex {
            api_key,
            api_base_url,
        }) => {
            log::info!("Use Yandex geocoding gateway");
            let mut gw = Yandex::new(api_key.clone(), cfg.timeout)?;
            if let Some(api_base_url) = api_base_url {
                gw = gw.with_api_base_url(api_base_url.clone());
            }
            Ok(GeocodingGw::new(gw))
        }
        None => {
            log::warn!("No geocoding gateway was configured");
            Ok(GeocodingGw::new(NoGeocoding))
        }
    }
}

struct NoGeocoding;

impl GeocodingGateway for NoGeocoding {
    fn resolve_address_lat_lng(&self, addr: &Address) -> Result<MapPoint, GeocodeError> {
        log::debug!("Cannot resolve '{addr}' because no geocoding gateway was configured");
        Err(GeocodeError::NotFound)
    }
}

pub struct GeocodingGw(Box<dyn GeocodingGateway + Send + Sync + 'static>);

impl GeocodingGw {
    pub fn new<G>(gw: G) -> Self
    where
        G: GeocodingGateway + Send + Sync + 'static,
    {
        Self(Box::new(gw))
    }
}

impl GeocodingGateway for GeocodingGw {
    fn resolve_address_lat_lng(&self, addr: &Address) -> Result<MapPoint, GeocodeError> {
        self.0.resolve_address_lat_lng(addr)
    }
}
