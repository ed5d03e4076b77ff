#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # pf-entities
//!
//! Reusable, agnostic domain entities for Platefinder.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod address;
pub mod geo;
pub mod id;
pub mod menu;
pub mod order;
pub mod place;
pub mod ranking;
pub mod time;
