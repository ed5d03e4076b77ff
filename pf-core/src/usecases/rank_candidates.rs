use std::collections::{HashMap, HashSet};

use super::prelude::*;

/// Ranks the candidate restaurants of one order by geodesic delivery
/// distance.
///
/// Without a coordinate for the order's own delivery address no distance
/// is meaningful: the whole order is flagged instead and no per-restaurant
/// work happens. A candidate whose address could not be resolved stays in
/// the list as an unranked entry; it never aborts the remainder.
pub fn rank_candidates_by_distance(
    order_pos: Option<MapPoint>,
    candidates: &HashSet<RestaurantId>,
    restaurant_pos: &HashMap<RestaurantId, Option<MapPoint>>,
) -> OrderRankResult {
    let Some(order_pos) = order_pos else {
        return OrderRankResult::address_not_found();
    };
    let mut ranked: Vec<_> = candidates
        .iter()
        .map(
            |&restaurant| match restaurant_pos.get(&restaurant).copied().flatten() {
                Some(pos) => Candidate::Distance {
                    restaurant,
                    km: round_km(distance_km(order_pos, pos)),
                },
                None => Candidate::Unranked {
                    restaurant,
                    reason: UnrankedReason::RestaurantAddressNotFound,
                },
            },
        )
        .collect();
    ranked.sort_unstable();
    OrderRankResult {
        address_not_found: false,
        candidates: ranked,
    }
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
