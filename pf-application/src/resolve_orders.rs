use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    prelude::GeocodeCache, usecases, Address, GeocodingGateway, MapPoint, Order, OrderId,
    OrderRankResult, RestaurantAvailabilityIndex, RestaurantId, Result,
};

/// Resolves a whole order batch: candidate restaurants per order, one
/// batched address resolution for everything the batch touches, then a
/// deterministic distance ranking per order.
///
/// All inputs are read-only snapshots owned by the caller; the output
/// consists entirely of freshly built result values.
pub fn resolve_order_batch<G>(
    geocode_cache: &GeocodeCache<G>,
    orders: &[Order],
    index: &RestaurantAvailabilityIndex,
    restaurants: &HashMap<RestaurantId, Address>,
) -> Result<BTreeMap<OrderId, OrderRankResult>>
where
    G: GeocodingGateway + Send + Sync,
{
    let mut candidates_by_order = Vec::with_capacity(orders.len());
    let mut addresses = HashSet::new();
    for order in orders {
        let candidates = usecases::resolve_candidate_restaurants(order, index)?;
        addresses.insert(order.delivery_address.clone());
        for restaurant in &candidates {
            // A candidate unknown to the restaurant snapshot simply has
            // no address to resolve; it will surface as unranked.
            if let Some(address) = restaurants.get(restaurant) {
                addresses.insert(address.clone());
            }
        }
        candidates_by_order.push((order, candidates));
    }

    let coordinates = geocode_cache.resolve(&addresses)?;

    let mut results = BTreeMap::new();
    for (order, candidates) in candidates_by_order {
        let order_pos = coordinates
            .get(&order.delivery_address)
            .copied()
            .flatten();
        let restaurant_pos: HashMap<RestaurantId, Option<MapPoint>> = candidates
            .iter()
            .map(|&restaurant| {
                let pos = restaurants
                    .get(&restaurant)
                    .and_then(|address| coordinates.get(address).copied().flatten());
                (restaurant, pos)
            })
            .collect();
        let ranked = usecases::rank_candidates_by_distance(order_pos, &candidates, &restaurant_pos);
        results.insert(order.id, ranked);
    }
    Ok(results)
}
