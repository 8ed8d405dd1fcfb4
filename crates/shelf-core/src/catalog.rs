//! Catalog joiner.
//!
//! Resolves every raw [`Product`] to its [`Category`] and the category's
//! owner, producing the enriched, display-ready catalog. Runs once at
//! load time; the result is immutable for the life of the process.

use crate::error::ShelfError;
use crate::model::{Category, Product, Sex, User};
use std::collections::HashMap;

/// A product joined with its resolved category and owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedProduct {
    pub id: u32,
    pub name: String,
    pub category: Category,
    pub user: User,
}

impl EnrichedProduct {
    /// The `<icon> - <title>` category cell shown in every renderer.
    #[must_use]
    pub fn category_label(&self) -> String {
        format!("{} - {}", self.category.icon, self.category.title)
    }

    /// Returns `true` when the owner is displayed in the "danger" color.
    #[must_use]
    pub const fn owner_is_danger(&self) -> bool {
        matches!(self.user.sex, Sex::F)
    }
}

/// The fully joined catalog plus the raw selector lists the UI needs.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Enriched products in fixture order.
    pub products: Vec<EnrichedProduct>,
    /// All users, for the owner selector.
    pub users: Vec<User>,
    /// All categories, for the category multi-select.
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Join raw records into an enriched catalog, preserving product order.
    ///
    /// Every product's `category_id` must resolve to exactly one category
    /// and every category's `owner_id` to exactly one user. A dangling
    /// reference is a data-integrity violation and fails the whole build;
    /// rows are never silently skipped.
    pub fn build(
        products: Vec<Product>,
        categories: Vec<Category>,
        users: Vec<User>,
    ) -> Result<Self, ShelfError> {
        let category_by_id: HashMap<u32, &Category> =
            categories.iter().map(|c| (c.id, c)).collect();
        let user_by_id: HashMap<u32, &User> = users.iter().map(|u| (u.id, u)).collect();

        // Every category's owner must resolve, products or not.
        for category in &categories {
            if !user_by_id.contains_key(&category.owner_id) {
                return Err(ShelfError::UnknownOwner {
                    category_id: category.id,
                    owner_id: category.owner_id,
                });
            }
        }

        let mut enriched = Vec::with_capacity(products.len());
        for product in &products {
            let category = category_by_id.get(&product.category_id).ok_or(
                ShelfError::UnknownCategory {
                    product_id: product.id,
                    category_id: product.category_id,
                },
            )?;
            let user =
                user_by_id
                    .get(&category.owner_id)
                    .ok_or(ShelfError::UnknownOwner {
                        category_id: category.id,
                        owner_id: category.owner_id,
                    })?;
            enriched.push(EnrichedProduct {
                id: product.id,
                name: product.name.clone(),
                category: (*category).clone(),
                user: (*user).clone(),
            });
        }

        tracing::debug!(
            products = enriched.len(),
            categories = categories.len(),
            users = users.len(),
            "catalog joined"
        );

        Ok(Self {
            products: enriched,
            users,
            categories,
        })
    }
}
