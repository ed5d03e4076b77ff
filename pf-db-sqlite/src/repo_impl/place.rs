use diesel::prelude::*;
use pf_core::{entities::*, repositories::PlaceRepo};

use super::{from_diesel_err, Result};
use crate::{models, schema, DbReadOnly, DbReadWrite};

impl PlaceRepo for DbReadOnly<'_> {
    fn get_places(&self, addresses: &[&str]) -> Result<Vec<Place>> {
        get_places(&mut self.conn.borrow_mut(), addresses)
    }

    fn create_or_update_place(&self, _place: Place) -> Result<()> {
        unreachable!();
    }
}

impl PlaceRepo for DbReadWrite<'_> {
    fn get_places(&self, addresses: &[&str]) -> Result<Vec<Place>> {
        get_places(&mut self.conn.borrow_mut(), addresses)
    }

    fn create_or_update_place(&self, place: Place) -> Result<()> {
        create_or_update_place(&mut self.conn.borrow_mut(), place)
    }
}

fn get_places(conn: &mut SqliteConnection, addresses: &[&str]) -> Result<Vec<Place>> {
    use schema::places::dsl;
    Ok(dsl::places
        .filter(dsl::address.eq_any(addresses))
        .load::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn create_or_update_place(conn: &mut SqliteConnection, place: Place) -> Result<()> {
    use schema::places::dsl;
    let Place {
        address,
        pos,
        updated_at,
    } = place;
    let model = models::NewPlace {
        address: address.as_str(),
        lat: pos.map(|pos| pos.lat),
        lon: pos.map(|pos| pos.lng),
        updated_at: updated_at.as_millis(),
    };
    // Insert...
    if diesel::insert_or_ignore_into(schema::places::table)
        .values(&model)
        .execute(conn)
        .map_err(from_diesel_err)?
        == 0
    {
        // ...or update
        let _count = diesel::update(dsl::places.filter(dsl::address.eq(model.address)))
            .set(&model)
            .execute(conn)
            .map_err(from_diesel_err)?;
        debug_assert_eq!(1, _count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use diesel_migrations::MigrationHarness;

    use super::*;
    use crate::MIGRATIONS;

    fn conn() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();
        conn
    }

    fn new_place(address: &str, pos: Option<MapPoint>) -> Place {
        Place {
            address: address.into(),
            pos,
            updated_at: Timestamp::from_millis(1_000),
        }
    }

    #[test]
    fn upsert_and_load() {
        let mut conn = conn();
        let pos = MapPoint {
            lat: 55.75,
            lng: 37.62,
        };
        create_or_update_place(&mut conn, new_place("a", Some(pos))).unwrap();
        create_or_update_place(&mut conn, new_place("b", None)).unwrap();

        let places = get_places(&mut conn, &["a", "b", "c"]).unwrap();
        assert_eq!(2, places.len());
        let a = places.iter().find(|p| p.address.as_str() == "a").unwrap();
        assert_eq!(Some(pos), a.pos);
        let b = places.iter().find(|p| p.address.as_str() == "b").unwrap();
        assert!(!b.is_resolved());
    }

    #[test]
    fn update_keeps_the_address_unique() {
        let mut conn = conn();
        create_or_update_place(&mut conn, new_place("a", None)).unwrap();
        let pos = MapPoint {
            lat: 48.14,
            lng: 11.58,
        };
        let mut updated = new_place("a", Some(pos));
        updated.updated_at = Timestamp::from_millis(2_000);
        create_or_update_place(&mut conn, updated).unwrap();

        let places = get_places(&mut conn, &["a"]).unwrap();
        assert_eq!(1, places.len());
        assert_eq!(Some(pos), places[0].pos);
        assert_eq!(Timestamp::from_millis(2_000), places[0].updated_at);
    }

    #[test]
    fn a_failed_retry_clears_the_coordinate() {
        let mut conn = conn();
        let pos = MapPoint {
            lat: 48.14,
            lng: 11.58,
        };
        create_or_update_place(&mut conn, new_place("a", Some(pos))).unwrap();
        create_or_update_place(&mut conn, new_place("a", None)).unwrap();

        let places = get_places(&mut conn, &["a"]).unwrap();
        assert!(!places[0].is_resolved());
    }
}
