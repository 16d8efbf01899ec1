//! Validation core.
//!
//! [`Flexible`] dispatches a record to its store-resolved schema and
//! collapses every expected failure into the normalized [`ValidationError`].

pub mod error;
pub mod flexible;

pub use error::{FlexibleError, ValidationError};
pub use flexible::Flexible;
