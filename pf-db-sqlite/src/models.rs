// NOTE:
// `updated_at` is stored as unix timestamp in **milli**seconds.

use pf_core::entities::{MapPoint, Place, Timestamp};

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = places)]
#[diesel(treat_none_as_null = true)]
pub struct NewPlace<'a> {
    pub address: &'a str,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct PlaceEntity {
    pub rowid: i64,
    pub address: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub updated_at: i64,
}

impl From<PlaceEntity> for Place {
    fn from(from: PlaceEntity) -> Self {
        let PlaceEntity {
            rowid: _,
            address,
            lat,
            lon,
            updated_at,
        } = from;
        // A valid coordinate requires both columns; anything else counts
        // as a failed attempt.
        let pos = match (lat, lon) {
            (Some(lat), Some(lng)) => Some(MapPoint { lat, lng }),
            _ => None,
        };
        Self {
            address: address.into(),
            pos,
            updated_at: Timestamp::from_millis(updated_at),
        }
    }
}
