//! Raw catalog record types, as they appear in the fixture files.

mod record;

pub use record::{Category, Product, Sex, User};
