use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering::SeqCst},
        Arc,
    },
    thread,
    time::Duration,
};

use super::*;
use crate::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Default)]
struct FakeGeocoder {
    known: HashMap<Address, MapPoint>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl FakeGeocoder {
    fn with_known<I>(known: I) -> Self
    where
        I: IntoIterator<Item = (Address, MapPoint)>,
    {
        Self {
            known: known.into_iter().collect(),
            ..Default::default()
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl GeocodingGateway for FakeGeocoder {
    fn resolve_address_lat_lng(
        &self,
        addr: &Address,
    ) -> std::result::Result<MapPoint, GeocodeError> {
        self.calls.fetch_add(1, SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.known.get(addr).copied().ok_or(GeocodeError::NotFound)
    }
}

fn new_cache(geocoder: FakeGeocoder) -> GeocodeCache<FakeGeocoder> {
    let connections = sqlite::Connections::init(":memory:", 1).unwrap();
    sqlite::run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    GeocodeCache::new(connections, geocoder)
}

fn addresses<const N: usize>(addrs: [&str; N]) -> HashSet<Address> {
    addrs.into_iter().map(Into::into).collect()
}

const KREMLIN: MapPoint = MapPoint {
    lat: 55.75,
    lng: 37.62,
};
const NEARBY: MapPoint = MapPoint {
    lat: 55.76,
    lng: 37.64,
};
const FARAWAY: MapPoint = MapPoint {
    lat: 55.90,
    lng: 37.40,
};

#[test]
fn successful_resolutions_are_cached_failed_ones_are_retried() {
    init_logger();
    let geocoder = FakeGeocoder::with_known([("hit".into(), KREMLIN)]);
    let calls = geocoder.call_counter();
    let cache = new_cache(geocoder);

    let first = cache.resolve(&addresses(["hit", "miss"])).unwrap();
    assert_eq!(Some(&Some(KREMLIN)), first.get("hit"));
    assert_eq!(Some(&None), first.get("miss"));
    assert_eq!(2, calls.load(SeqCst));

    // "hit" is now served from the store, "miss" hits the gateway again.
    let second = cache.resolve(&addresses(["hit", "miss"])).unwrap();
    assert_eq!(first, second);
    assert_eq!(3, calls.load(SeqCst));
}

#[test]
fn concurrent_resolves_of_the_same_address_share_one_gateway_call() {
    init_logger();
    let geocoder = FakeGeocoder::with_known([("shared".into(), KREMLIN)])
        .with_delay(Duration::from_millis(200));
    let calls = geocoder.call_counter();
    let cache = Arc::new(new_cache(geocoder));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.resolve(&addresses(["shared"])).unwrap())
        })
        .collect();
    for handle in handles {
        let resolved = handle.join().unwrap();
        assert_eq!(Some(&Some(KREMLIN)), resolved.get("shared"));
    }
    assert_eq!(1, calls.load(SeqCst));
}

#[test]
fn distinct_addresses_are_geocoded_concurrently() {
    init_logger();
    let geocoder = FakeGeocoder::with_known([
        ("a".into(), KREMLIN),
        ("b".into(), NEARBY),
        ("c".into(), FARAWAY),
        ("d".into(), KREMLIN),
    ])
    .with_delay(Duration::from_millis(100));
    let calls = geocoder.call_counter();
    let cache = new_cache(geocoder).with_max_concurrency(4);

    let started_at = std::time::Instant::now();
    let resolved = cache.resolve(&addresses(["a", "b", "c", "d"])).unwrap();
    assert_eq!(4, resolved.len());
    assert_eq!(4, calls.load(SeqCst));
    // Four sequential lookups would take at least 400ms.
    assert!(started_at.elapsed() < Duration::from_millis(390));
}

mod resolve_order_batch {
    use super::*;

    fn new_order(id: i64, address: &str, products: &[i64]) -> Order {
        Order {
            id: OrderId::new(id),
            delivery_address: address.into(),
            lines: products
                .iter()
                .map(|&product| OrderLine {
                    product: ProductId::new(product),
                    quantity: 1,
                })
                .collect(),
        }
    }

    fn new_index(offers: &[(i64, i64)]) -> RestaurantAvailabilityIndex {
        offers
            .iter()
            .map(|&(restaurant, product)| MenuItem {
                restaurant: RestaurantId::new(restaurant),
                product: ProductId::new(product),
                available: true,
            })
            .collect()
    }

    #[test]
    fn candidates_are_the_intersection_of_all_lines() {
        init_logger();
        // R1 offers P1 and P2, R2 only P1.
        let index = new_index(&[(1, 1), (1, 2), (2, 1)]);
        let restaurants = HashMap::from([
            (RestaurantId::new(1), Address::from("r1")),
            (RestaurantId::new(2), Address::from("r2")),
        ]);
        let geocoder = FakeGeocoder::with_known([
            ("o1".into(), KREMLIN),
            ("r1".into(), NEARBY),
            ("r2".into(), FARAWAY),
        ]);
        let cache = new_cache(geocoder);
        let orders = vec![new_order(1, "o1", &[1, 2])];

        let results = resolve_order_batch(&cache, &orders, &index, &restaurants).unwrap();
        let result = &results[&OrderId::new(1)];
        assert!(!result.address_not_found);
        assert_eq!(1, result.candidates.len());
        assert_eq!(RestaurantId::new(1), result.candidates[0].restaurant());
    }

    #[test]
    fn unresolvable_delivery_address_flags_the_order() {
        init_logger();
        let index = new_index(&[(1, 1)]);
        let restaurants = HashMap::from([(RestaurantId::new(1), Address::from("r1"))]);
        // The order's own address is unknown to the geocoder.
        let geocoder = FakeGeocoder::with_known([("r1".into(), NEARBY)]);
        let cache = new_cache(geocoder);
        let orders = vec![new_order(1, "o1", &[1])];

        let results = resolve_order_batch(&cache, &orders, &index, &restaurants).unwrap();
        let result = &results[&OrderId::new(1)];
        assert!(result.address_not_found);
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn distances_precede_unranked_candidates() {
        init_logger();
        let index = new_index(&[(1, 1), (2, 1)]);
        let restaurants = HashMap::from([
            (RestaurantId::new(1), Address::from("resolvable")),
            (RestaurantId::new(2), Address::from("unresolvable")),
        ]);
        let geocoder =
            FakeGeocoder::with_known([("o1".into(), KREMLIN), ("resolvable".into(), NEARBY)]);
        let cache = new_cache(geocoder);
        let orders = vec![new_order(1, "o1", &[1])];

        let results = resolve_order_batch(&cache, &orders, &index, &restaurants).unwrap();
        let result = &results[&OrderId::new(1)];
        assert!(!result.address_not_found);
        assert!(matches!(
            result.candidates.as_slice(),
            [
                Candidate::Distance { restaurant: first, .. },
                Candidate::Unranked {
                    restaurant: second,
                    reason: UnrankedReason::RestaurantAddressNotFound,
                },
            ] if *first == RestaurantId::new(1) && *second == RestaurantId::new(2)
        ));
    }

    #[test]
    fn addresses_shared_across_orders_are_resolved_once() {
        init_logger();
        let index = new_index(&[(1, 1), (1, 2)]);
        let restaurants = HashMap::from([(RestaurantId::new(1), Address::from("r1"))]);
        let geocoder =
            FakeGeocoder::with_known([("same house".into(), KREMLIN), ("r1".into(), NEARBY)]);
        let calls = geocoder.call_counter();
        let cache = new_cache(geocoder);
        // Two orders from the same address, both served by R1.
        let orders = vec![
            new_order(1, "same house", &[1]),
            new_order(2, "same house", &[2]),
        ];

        let results = resolve_order_batch(&cache, &orders, &index, &restaurants).unwrap();
        assert_eq!(2, results.len());
        // One call for "same house", one for "r1".
        assert_eq!(2, calls.load(SeqCst));
    }

    #[test]
    fn empty_intersection_is_not_an_error() {
        init_logger();
        let index = new_index(&[(1, 1), (2, 2)]);
        let restaurants = HashMap::from([
            (RestaurantId::new(1), Address::from("r1")),
            (RestaurantId::new(2), Address::from("r2")),
        ]);
        let geocoder = FakeGeocoder::with_known([("o1".into(), KREMLIN)]);
        let cache = new_cache(geocoder);
        // No restaurant offers both products.
        let orders = vec![new_order(1, "o1", &[1, 2])];

        let results = resolve_order_batch(&cache, &orders, &index, &restaurants).unwrap();
        let result = &results[&OrderId::new(1)];
        assert!(!result.address_not_found);
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn invalid_quantity_aborts_the_batch() {
        init_logger();
        let index = new_index(&[(1, 1)]);
        let restaurants = HashMap::new();
        let cache = new_cache(FakeGeocoder::default());
        let mut order = new_order(1, "o1", &[1]);
        order.lines[0].quantity = 0;

        let result = resolve_order_batch(&cache, &[order], &index, &restaurants);
        assert!(result.is_err());
    }
}
