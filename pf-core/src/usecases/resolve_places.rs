use std::collections::{HashMap, HashSet};

use super::prelude::*;

/// Splits a batch of addresses into already-cached coordinates and the
/// addresses that (still) need a geocoder round trip.
///
/// An address qualifies for a new attempt both when it was never seen
/// before and when the last attempt failed; failed lookups are retried on
/// every call. The unresolved remainder is returned in a stable order.
pub fn partition_cached_places<R>(
    repo: &R,
    addresses: &HashSet<Address>,
) -> Result<(HashMap<Address, MapPoint>, Vec<Address>)>
where
    R: PlaceRepo,
{
    let keys: Vec<&str> = addresses.iter().map(Address::as_str).collect();
    let cached: HashMap<Address, Option<MapPoint>> = repo
        .get_places(&keys)?
        .into_iter()
        .map(|place| (place.address, place.pos))
        .collect();

    let mut resolved = HashMap::new();
    let mut unresolved = Vec::new();
    for addr in addresses {
        match cached.get(addr).copied().flatten() {
            Some(pos) => {
                resolved.insert(addr.clone(), pos);
            }
            None => unresolved.push(addr.clone()),
        }
    }
    unresolved.sort_unstable();
    Ok((resolved, unresolved))
}

/// Resolves a single address through the external geocoder.
///
/// Gateway failures are data, not control flow: they are logged and
/// reported as an absent coordinate.
pub fn geocode_address<G>(geocoder: &G, address: &Address) -> Option<MapPoint>
where
    G: GeocodingGateway + ?Sized,
{
    match geocoder.resolve_address_lat_lng(address) {
        Ok(pos) => Some(pos),
        Err(err) => {
            log::warn!("Failed to geocode '{address}': {err}");
            None
        }
    }
}

/// Persists the outcome of a geocoding attempt, success or failure.
///
/// Every attempt writes: a failure is stored as an entry with an absent
/// coordinate so that the cache keeps track of when it was last tried.
pub fn store_geocoded_place<R>(
    repo: &R,
    address: &Address,
    pos: Option<MapPoint>,
) -> Result<()>
where
    R: PlaceRepo,
{
    repo.create_or_update_place(Place {
        address: address.clone(),
        pos,
        updated_at: Timestamp::now(),
    })?;
    Ok(())
}
