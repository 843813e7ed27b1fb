//! Application layer: use cases built on the domain
//!
//! Services here read order documents through infrastructure traits and
//! turn them into rendered, priced quotes.

pub mod demo;
pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
