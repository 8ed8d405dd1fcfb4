//! Terminal user interface (TUI) for shelf.
//!
//! Provides an interactive full-screen view for browsing and filtering
//! the product catalog.
//!
//! ## Entry points
//!
//! - [`browse::run_browse_tui`] — interactive catalog with owner, search,
//!   and category filters.

pub mod browse;
