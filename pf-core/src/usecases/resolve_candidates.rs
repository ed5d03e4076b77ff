use std::collections::HashSet;

use super::prelude::*;

/// Computes the set of restaurants able to fulfill the entire order.
///
/// Strict intersection over all order lines: a restaurant qualifies only
/// if it offers every single product of the order. No partial fulfillment,
/// no substitution. Orders without lines have no candidates by definition,
/// and the line order never matters.
pub fn resolve_candidate_restaurants(
    order: &Order,
    index: &RestaurantAvailabilityIndex,
) -> Result<HashSet<RestaurantId>> {
    validate::order(order)?;

    let mut lines = order.lines.iter();
    let Some(first) = lines.next() else {
        return Ok(HashSet::new());
    };
    let mut candidates = index
        .restaurants_offering(first.product)
        .cloned()
        .unwrap_or_default();
    for line in lines {
        if candidates.is_empty() {
            break;
        }
        match index.restaurants_offering(line.product) {
            Some(offering) => candidates.retain(|restaurant| offering.contains(restaurant)),
            None => candidates.clear(),
        }
    }
    Ok(candidates)
}
