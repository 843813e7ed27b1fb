//! Application services
//!
//! Concrete services that orchestrate domain logic. They depend on the
//! `FileSystem` boundary trait but are themselves concrete structs.

mod quote;

pub use quote::{DeliveryQuote, LoadedOrder, Quote, QuoteService};
