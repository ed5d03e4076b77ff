#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # pf-core
//!
//! Business core of the Platefinder order resolution engine: gateway and
//! repository abstractions plus the pure usecases built on top of them.

pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use pf_entities::{
        address::*, geo::*, id::*, menu::*, order::*, place::*, ranking::*, time::*,
    };
}
