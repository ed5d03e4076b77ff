// Low-level database access traits.

use std::io;

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// Persistent store of geocoding attempts, keyed by the exact address
/// string.
pub trait PlaceRepo {
    /// Loads the cache entries for the given addresses.
    ///
    /// Addresses without an entry are simply missing from the result,
    /// which is not an error.
    fn get_places(&self, addresses: &[&str]) -> Result<Vec<Place>>;

    /// Insert-or-update, keyed by address. Refreshes `updated_at`.
    fn create_or_update_place(&self, place: Place) -> Result<()>;
}
