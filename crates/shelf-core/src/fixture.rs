//! Embedded fixture data.
//!
//! The catalog is a static asset: three JSON files compiled into the
//! binary, standing in for a real backend. They are parsed once at
//! startup and joined into a [`Catalog`]; both parse failures and
//! dangling references are fatal load-time errors.

use crate::catalog::Catalog;
use crate::error::ShelfError;
use crate::model::{Category, Product, User};

const USERS_JSON: &str = include_str!("../fixtures/users.json");
const CATEGORIES_JSON: &str = include_str!("../fixtures/categories.json");
const PRODUCTS_JSON: &str = include_str!("../fixtures/products.json");

fn parse<T: serde::de::DeserializeOwned>(
    name: &'static str,
    json: &str,
) -> Result<Vec<T>, ShelfError> {
    serde_json::from_str(json).map_err(|source| ShelfError::Fixture { name, source })
}

/// Parse the embedded fixtures and build the joined catalog.
pub fn load() -> Result<Catalog, ShelfError> {
    let users: Vec<User> = parse("users.json", USERS_JSON)?;
    let categories: Vec<Category> = parse("categories.json", CATEGORIES_JSON)?;
    let products: Vec<Product> = parse("products.json", PRODUCTS_JSON)?;
    Catalog::build(products, categories, users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fixtures_load_and_join() {
        let catalog = load().expect("fixtures must be internally consistent");
        assert!(!catalog.products.is_empty());
        assert!(!catalog.users.is_empty());
        assert!(!catalog.categories.is_empty());
    }

    #[test]
    fn every_product_is_fully_resolved() {
        let catalog = load().expect("load");
        for product in &catalog.products {
            assert!(!product.category.title.is_empty());
            assert!(!product.user.name.is_empty());
        }
    }

    #[test]
    fn fixture_order_is_preserved() {
        let catalog = load().expect("load");
        let ids: Vec<u32> = catalog.products.iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        // Fixture ids happen to be ascending; order must match the file.
        assert_eq!(ids, sorted);
    }

    #[test]
    fn owner_names_are_unique() {
        // The owner filter matches by display name, which assumes
        // uniqueness; guard the fixture against breaking that.
        let catalog = load().expect("load");
        let mut names: Vec<&str> = catalog.users.iter().map(|u| u.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog.users.len());
    }

    #[test]
    fn category_titles_are_unique() {
        let catalog = load().expect("load");
        let mut titles: Vec<&str> = catalog
            .categories
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), catalog.categories.len());
    }

    #[test]
    fn bad_json_surfaces_fixture_error() {
        let res: Result<Vec<User>, _> = parse("users.json", "[{");
        let err = res.expect_err("must fail");
        assert_eq!(err.error_code(), "E1001");
        assert!(err.to_string().contains("users.json"));
    }
}
