use crate::{address::Address, geo::MapPoint, time::Timestamp};

/// A persistently cached geocoding attempt for one address.
///
/// `pos` is `None` if the most recent attempt failed. Entries are created
/// on the first attempt for an address, overwritten on every retry and
/// never deleted by the resolution engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub address: Address,
    pub pos: Option<MapPoint>,
    pub updated_at: Timestamp,
}

impl Place {
    pub const fn is_resolved(&self) -> bool {
        self.pos.is_some()
    }
}
