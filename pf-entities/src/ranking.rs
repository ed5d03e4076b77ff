use std::cmp::Ordering;

use strum::IntoStaticStr;

use crate::id::RestaurantId;

/// Why a candidate restaurant could not be ranked by distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, IntoStaticStr)]
pub enum UnrankedReason {
    #[strum(serialize = "restaurant address not found")]
    RestaurantAddressNotFound,
}

impl UnrankedReason {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// One entry of a ranked candidate list.
///
/// A candidate either carries a computed delivery distance or the reason
/// why no distance could be computed. Both kinds live in the same list;
/// a partial failure never discards the ranked remainder.
#[derive(Debug, Clone, Copy)]
pub enum Candidate {
    /// Geodesic delivery distance in kilometers, rounded to two decimals.
    Distance { restaurant: RestaurantId, km: f64 },
    /// The candidate could not be ranked.
    Unranked {
        restaurant: RestaurantId,
        reason: UnrankedReason,
    },
}

impl Candidate {
    pub const fn restaurant(&self) -> RestaurantId {
        match self {
            Self::Distance { restaurant, .. } | Self::Unranked { restaurant, .. } => *restaurant,
        }
    }
}

// Ranked entries sort before unranked ones, distances ascending, reasons
// in lexicographic order of their string form. Ties are resolved by
// restaurant id, which makes the ordering a reproducible total order.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        use Candidate::*;
        match (self, other) {
            (
                Distance {
                    km: km_a,
                    restaurant: r_a,
                },
                Distance {
                    km: km_b,
                    restaurant: r_b,
                },
            ) => km_a.total_cmp(km_b).then_with(|| r_a.cmp(r_b)),
            (Distance { .. }, Unranked { .. }) => Ordering::Less,
            (Unranked { .. }, Distance { .. }) => Ordering::Greater,
            (
                Unranked {
                    reason: reason_a,
                    restaurant: r_a,
                },
                Unranked {
                    reason: reason_b,
                    restaurant: r_b,
                },
            ) => reason_a
                .as_str()
                .cmp(reason_b.as_str())
                .then_with(|| r_a.cmp(r_b)),
        }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Ranked outcome for a single order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderRankResult {
    /// Set iff the order's own delivery address could not be geocoded.
    /// In that case no per-restaurant distance is computed at all.
    pub address_not_found: bool,
    pub candidates: Vec<Candidate>,
}

impl OrderRankResult {
    pub fn address_not_found() -> Self {
        Self {
            address_not_found: true,
            candidates: vec![],
        }
    }
}
