//! ordertree: price and render nested orders
//!
//! Layers:
//! - `domain`: pricing trees, rendering, delivery pricing
//! - `application`: loading and quoting order documents
//! - `infrastructure`: filesystem access and service wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
