use crate::{
    address::Address,
    id::{OrderId, ProductId},
};

/// One product position of an order.
///
/// The quantity is part of the order's identity but irrelevant for
/// candidate resolution. It must be at least 1; violations are a bug of
/// the order intake, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product: ProductId,
    pub quantity: u32,
}

/// Read-only snapshot of a customer order as consumed by the resolution
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub delivery_address: Address,
    pub lines: Vec<OrderLine>,
}
