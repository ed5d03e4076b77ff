mod error;
mod rank_candidates;
mod resolve_candidates;
mod resolve_places;


pub use self::{
    error::Error, rank_candidates::*, resolve_candidates::*, resolve_places::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::geocode::*, repositories::*, util::validate};
}
