#[macro_use]
extern crate log;

mod geocode_cache;
mod resolve_orders;

pub mod prelude {
    pub use super::{geocode_cache::*, resolve_orders::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use pf_core::{entities::*, gateways::geocode::*, usecases};

#[cfg(test)]
mod tests;

pub mod sqlite {
    pub use pf_db_sqlite::{run_embedded_database_migrations, Connections};
}
