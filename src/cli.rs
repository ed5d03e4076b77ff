use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use pf_application::{prelude::*, sqlite};
use pf_core::entities::{Address, MenuItem, Order, RestaurantAvailabilityIndex, RestaurantId};

use crate::{boundary, config::Config, gateways};

#[derive(Debug, Parser)]
#[command(name = "platefinder", version, about = "Restaurant order resolution")]
struct Args {
    /// Path to the configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a batch of orders to ranked restaurant candidates.
    Resolve {
        /// JSON file with the orders to resolve.
        #[arg(long, value_name = "FILE")]
        orders: PathBuf,
        /// JSON file with the menu items offered by the restaurants.
        #[arg(long, value_name = "FILE")]
        menu: PathBuf,
        /// JSON file with the restaurants and their addresses.
        #[arg(long, value_name = "FILE")]
        restaurants: PathBuf,
    },
    /// Resolve a single address and print its coordinate.
    Geocode {
        /// The address to resolve.
        address: String,
    },
}

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.config.as_deref())?;

    match args.command {
        Command::Resolve {
            orders,
            menu,
            restaurants,
        } => resolve(&cfg, &orders, &menu, &restaurants),
        Command::Geocode { address } => geocode(&cfg, &address),
    }
}

fn new_geocode_cache(cfg: &Config) -> Result<GeocodeCache<gateways::GeocodingGw>> {
    info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite, cfg.db.conn_pool_size
    );
    let connections =
        sqlite::Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())?;
    sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    let geocoder = gateways::geocoding_gateway(&cfg.geocoding)?;
    Ok(GeocodeCache::new(connections, geocoder)
        .with_max_concurrency(cfg.geocoding.max_concurrency))
}

fn resolve(
    cfg: &Config,
    orders_file: &Path,
    menu_file: &Path,
    restaurants_file: &Path,
) -> Result<()> {
    let orders: Vec<boundary::Order> = read_json(orders_file)?;
    let menu: Vec<boundary::MenuItem> = read_json(menu_file)?;
    let restaurants: Vec<boundary::Restaurant> = read_json(restaurants_file)?;
    info!(
        "Resolving {} order(s) against {} menu item(s) of {} restaurant(s)",
        orders.len(),
        menu.len(),
        restaurants.len()
    );

    let orders: Vec<Order> = orders.into_iter().map(Into::into).collect();
    let index: RestaurantAvailabilityIndex = menu.into_iter().map(MenuItem::from).collect();
    let restaurants: HashMap<RestaurantId, Address> = restaurants
        .into_iter()
        .map(|r| (RestaurantId::new(r.id), r.address.into()))
        .collect();

    let geocode_cache = new_geocode_cache(cfg)?;
    let results = resolve_order_batch(&geocode_cache, &orders, &index, &restaurants)?;

    let ranked: Vec<boundary::RankedOrder> = results.into_iter().map(Into::into).collect();
    serde_json::to_writer_pretty(io::stdout().lock(), &ranked)?;
    println!();
    Ok(())
}

fn geocode(cfg: &Config, address: &str) -> Result<()> {
    let geocode_cache = new_geocode_cache(cfg)?;
    let addresses = std::iter::once(Address::from(address)).collect();
    let resolved = geocode_cache.resolve(&addresses)?;
    match resolved.get(address).copied().flatten() {
        Some(pos) => {
            println!("{} {}", pos.lat, pos.lng);
            Ok(())
        }
        None => {
            warn!("'{address}' could not be resolved");
            process::exit(1);
        }
    }
}

fn read_json<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open '{}'", file_path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse '{}'", file_path.display()))
}
