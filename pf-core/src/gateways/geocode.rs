use thiserror::Error;

use crate::entities::{Address, MapPoint};

/// Failure modes of the external geocoding provider.
///
/// The cache layer converts both variants into an unresolved coordinate;
/// neither ever escalates past its boundary.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The provider answered but returned no candidate for the address.
    #[error("No geocoding candidate found")]
    NotFound,
    /// Transport failure, timeout or a malformed provider response.
    #[error("Geocoding provider unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),
}

pub trait GeocodingGateway {
    fn resolve_address_lat_lng(&self, addr: &Address) -> Result<MapPoint, GeocodeError>;
}
