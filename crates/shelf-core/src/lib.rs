//! shelf-core library.
//!
//! Catalog model, fixture loading, the joiner that resolves products to
//! their categories and owners, and the filter engine that derives the
//! visible subset from a [`filter::FilterState`].
//!
//! # Conventions
//!
//! - **Errors**: fallible construction returns `Result<_, ShelfError>`.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod catalog;
pub mod error;
pub mod filter;
pub mod fixture;
pub mod model;

pub use catalog::{Catalog, EnrichedProduct};
pub use error::ShelfError;
pub use filter::FilterState;
