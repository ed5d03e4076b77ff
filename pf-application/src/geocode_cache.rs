use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Arc,
    thread,
};

use parking_lot::{Condvar, Mutex};

use crate::{error::BError, sqlite, usecases, Address, GeocodingGateway, MapPoint, Result};

const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Batched, persistently cached address resolution.
///
/// Couples the place store with the outbound geocoder: cached coordinates
/// are served without any network traffic, everything else is geocoded on
/// a bounded worker pool and the outcome is persisted, success or failure.
/// Concurrent requests for the same unresolved address collapse into a
/// single gateway call whose result all callers share.
pub struct GeocodeCache<G> {
    connections: sqlite::Connections,
    geocoder: G,
    max_concurrency: usize,
    in_flight: Mutex<HashMap<Address, Arc<Flight>>>,
}

#[derive(Default)]
struct Flight {
    state: Mutex<FlightState>,
    done: Condvar,
}

#[derive(Default, Clone, Copy)]
enum FlightState {
    #[default]
    Pending,
    Done(Option<MapPoint>),
    // The leading caller failed with an infrastructure error before it
    // could publish a result.
    Abandoned,
}

impl<G> GeocodeCache<G>
where
    G: GeocodingGateway + Send + Sync,
{
    pub fn new(connections: sqlite::Connections, geocoder: G) -> Self {
        Self {
            connections,
            geocoder,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            in_flight: Mutex::default(),
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Resolves a batch of addresses, consulting the persistent store
    /// first and geocoding only the unresolved remainder.
    ///
    /// Geocoder trouble never fails the batch: affected addresses come
    /// back as `None`. Only infrastructure faults (pool, SQL) escalate.
    pub fn resolve(
        &self,
        addresses: &HashSet<Address>,
    ) -> Result<HashMap<Address, Option<MapPoint>>> {
        let (cached, unresolved) = {
            let db = self.connections.shared()?;
            usecases::partition_cached_places(&db, addresses)?
        };
        let mut resolved: HashMap<Address, Option<MapPoint>> = cached
            .into_iter()
            .map(|(addr, pos)| (addr, Some(pos)))
            .collect();
        if !unresolved.is_empty() {
            debug!("Geocoding {} unresolved address(es)", unresolved.len());
            for (addr, pos) in self.geocode_unresolved(unresolved)? {
                resolved.insert(addr, pos);
            }
        }
        debug_assert_eq!(addresses.len(), resolved.len());
        Ok(resolved)
    }

    /// Fans the unresolved addresses out to a bounded number of worker
    /// threads. The addresses are distinct at this point, so the workers
    /// never compete for the same flight within one batch.
    fn geocode_unresolved(
        &self,
        unresolved: Vec<Address>,
    ) -> Result<Vec<(Address, Option<MapPoint>)>> {
        let workers = self.max_concurrency.min(unresolved.len());
        let queue = Mutex::new(unresolved.into_iter().collect::<VecDeque<_>>());
        let resolved = Mutex::new(Vec::new());
        let failure = Mutex::new(None);
        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let Some(addr) = queue.lock().pop_front() else {
                        break;
                    };
                    match self.resolve_single(&addr) {
                        Ok(pos) => resolved.lock().push((addr, pos)),
                        Err(err) => {
                            error!("Giving up on geocoding '{addr}': {err}");
                            failure.lock().get_or_insert(err);
                            break;
                        }
                    }
                });
            }
        });
        match failure.into_inner() {
            Some(err) => Err(err),
            None => Ok(resolved.into_inner()),
        }
    }

    /// Resolves one address through the geocoder with single-flight
    /// deduplication across concurrent batches.
    fn resolve_single(&self, address: &Address) -> Result<Option<MapPoint>> {
        // The flight table lock must be released before joining, otherwise
        // the leading caller could never publish its result.
        let (flight, leader) = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get(address) {
                Some(flight) => (Arc::clone(flight), false),
                None => {
                    let flight = Arc::new(Flight::default());
                    in_flight.insert(address.clone(), Arc::clone(&flight));
                    (flight, true)
                }
            }
        };
        if !leader {
            // Someone else is already on it; wait for their result.
            return join_flight(address, &flight);
        }

        // The gateway round trip happens outside of any database lock.
        let pos = usecases::geocode_address(&self.geocoder, address);
        let outcome = self.store(address, pos).map(|()| pos);

        let mut state = flight.state.lock();
        *state = match &outcome {
            Ok(pos) => FlightState::Done(*pos),
            Err(_) => FlightState::Abandoned,
        };
        drop(state);
        flight.done.notify_all();
        self.in_flight.lock().remove(address);
        outcome
    }

    fn store(&self, address: &Address, pos: Option<MapPoint>) -> Result<()> {
        let db = self.connections.exclusive()?;
        usecases::store_geocoded_place(&db, address, pos)?;
        Ok(())
    }
}

fn join_flight(address: &Address, flight: &Flight) -> Result<Option<MapPoint>> {
    let mut state = flight.state.lock();
    while matches!(*state, FlightState::Pending) {
        flight.done.wait(&mut state);
    }
    match *state {
        FlightState::Done(pos) => Ok(pos),
        FlightState::Abandoned => {
            Err(BError::from(format!("Geocoding of '{address}' was abandoned")).into())
        }
        FlightState::Pending => unreachable!(),
    }
}
