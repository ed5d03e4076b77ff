use std::fmt;

/// Identifier of an order as assigned by the external order intake.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(i64);

/// Identifier of a product in the external menu administration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(i64);

/// Identifier of a restaurant in the external menu administration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RestaurantId(i64);

macro_rules! impl_id {
    ($t:ty) => {
        impl $t {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $t {
            fn from(from: i64) -> Self {
                Self(from)
            }
        }

        impl From<$t> for i64 {
            fn from(from: $t) -> Self {
                from.0
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_id!(OrderId);
impl_id!(ProductId);
impl_id!(RestaurantId);
