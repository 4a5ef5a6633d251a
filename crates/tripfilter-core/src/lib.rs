//! Shared vocabulary for the catalog filter workspace: filter kinds and
//! values, the error type, and Figment-backed configuration.
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{FacetValue, FilterKind, FilterValue, NumericRange};
