use std::collections::{HashMap, HashSet};

use crate::id::{ProductId, RestaurantId};

/// A single `(restaurant, product)` availability flag as maintained by the
/// external menu administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub restaurant: RestaurantId,
    pub product: ProductId,
    pub available: bool,
}

/// Product id -> restaurants currently offering that product.
///
/// Only menu items flagged as available contribute. Products without any
/// available offer have no entry at all.
#[derive(Debug, Default, Clone)]
pub struct RestaurantAvailabilityIndex {
    offers: HashMap<ProductId, HashSet<RestaurantId>>,
}

impl RestaurantAvailabilityIndex {
    pub fn restaurants_offering(&self, product: ProductId) -> Option<&HashSet<RestaurantId>> {
        self.offers.get(&product)
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl FromIterator<MenuItem> for RestaurantAvailabilityIndex {
    fn from_iter<I: IntoIterator<Item = MenuItem>>(items: I) -> Self {
        let mut offers: HashMap<ProductId, HashSet<RestaurantId>> = HashMap::new();
        for item in items.into_iter().filter(|item| item.available) {
            offers.entry(item.product).or_default().insert(item.restaurant);
        }
        Self { offers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_available_items_are_indexed() {
        let index: RestaurantAvailabilityIndex = [
            MenuItem {
                restaurant: RestaurantId::new(1),
                product: ProductId::new(10),
                available: true,
            },
            MenuItem {
                restaurant: RestaurantId::new(2),
                product: ProductId::new(10),
                available: false,
            },
            MenuItem {
                restaurant: RestaurantId::new(2),
                product: ProductId::new(11),
                available: true,
            },
        ]
        .into_iter()
        .collect();

        let p10 = index.restaurants_offering(ProductId::new(10)).unwrap();
        assert_eq!(1, p10.len());
        assert!(p10.contains(&RestaurantId::new(1)));
        let p11 = index.restaurants_offering(ProductId::new(11)).unwrap();
        assert!(p11.contains(&RestaurantId::new(2)));
        assert!(index.restaurants_offering(ProductId::new(12)).is_none());
    }
}
