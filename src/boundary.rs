//! JSON representations of the entities crossing the CLI boundary.
//!
//! The core crates stay serde-free; all (de)serialization happens here.

use serde::{Deserialize, Serialize};

use pf_core::entities as e;

#[derive(Debug, Deserialize)]
pub struct Order {
    pub id: i64,
    pub address: String,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Deserialize)]
pub struct OrderLine {
    pub product: i64,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct MenuItem {
    pub restaurant: i64,
    pub product: i64,
    #[serde(default = "default_availability")]
    pub available: bool,
}

const fn default_availability() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub address: String,
}

impl From<Order> for e::Order {
    fn from(from: Order) -> Self {
        let Order { id, address, lines } = from;
        Self {
            id: id.into(),
            delivery_address: address.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderLine> for e::OrderLine {
    fn from(from: OrderLine) -> Self {
        let OrderLine { product, quantity } = from;
        Self {
            product: product.into(),
            quantity,
        }
    }
}

impl From<MenuItem> for e::MenuItem {
    fn from(from: MenuItem) -> Self {
        let MenuItem {
            restaurant,
            product,
            available,
        } = from;
        Self {
            restaurant: restaurant.into(),
            product: product.into(),
            available,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedOrder {
    pub order: i64,
    pub address_not_found: bool,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Candidate {
    Distance { restaurant: i64, km: f64 },
    Unranked { restaurant: i64, reason: String },
}

impl From<(e::OrderId, e::OrderRankResult)> for RankedOrder {
    fn from(from: (e::OrderId, e::OrderRankResult)) -> Self {
        let (order, result) = from;
        Self {
            order: order.into(),
            address_not_found: result.address_not_found,
            candidates: result.candidates.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<e::Candidate> for Candidate {
    fn from(from: e::Candidate) -> Self {
        match from {
            e::Candidate::Distance { restaurant, km } => Self::Distance {
                restaurant: restaurant.into(),
                km,
            },
            e::Candidate::Unranked { restaurant, reason } => Self::Unranked {
                restaurant: restaurant.into(),
                reason: reason.to_string(),
            },
        }
    }
}
