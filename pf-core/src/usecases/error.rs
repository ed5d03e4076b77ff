use thiserror::Error;

use crate::{repositories, util::validate::OrderInvalidation};

#[derive(Debug, Error)]
pub enum Error {
    #[error("An order line has an invalid quantity")]
    Quantity,
    #[error("The delivery address is too long")]
    Address,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<OrderInvalidation> for Error {
    fn from(err: OrderInvalidation) -> Self {
        match err {
            OrderInvalidation::Quantity => Self::Quantity,
            OrderInvalidation::Address => Self::Address,
        }
    }
}
