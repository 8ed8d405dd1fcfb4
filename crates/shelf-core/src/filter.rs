//! Filter engine and filter state.
//!
//! [`FilterState`] is a flat value type holding the three UI-selectable
//! criteria (owner, free-text search, multi-select categories). Every
//! transition returns a fresh state by structural copy; nothing mutates
//! in place. [`FilterState::apply`] derives the visible subset of the
//! catalog and is the only piece of logic here worth testing hard.

use crate::catalog::EnrichedProduct;
use crate::model::Category;

/// Filter criteria applied to the enriched product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Filter by owner display name. `None` means "All".
    pub owner: Option<String>,
    /// Free-text search query; leading whitespace is stripped at input.
    pub search: String,
    /// Selected categories, in toggle order. Membership is by id; the
    /// order only matters for display.
    pub categories: Vec<Category>,
}

impl FilterState {
    /// Returns true if no filter criteria are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owner.is_none() && self.search.is_empty() && self.categories.is_empty()
    }

    /// Returns true if the product satisfies all active criteria.
    #[must_use]
    pub fn matches(&self, product: &EnrichedProduct) -> bool {
        if let Some(ref owner) = self.owner {
            if product.user.name != *owner {
                return false;
            }
        }
        if !self.search.is_empty() {
            // Activation is checked on the raw string, the needle is
            // trimmed. A whitespace-only query trims to an empty needle
            // and matches every name; the source behaves the same way.
            let needle = self.search.trim().to_lowercase();
            if !product.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if !self.categories.is_empty()
            && !self
                .categories
                .iter()
                .any(|c| c.title == product.category.title)
        {
            return false;
        }
        true
    }

    /// Apply this filter to the enriched catalog.
    ///
    /// Pure and deterministic: returns the surviving subset in the
    /// catalog's original order.
    #[must_use]
    pub fn apply(&self, products: &[EnrichedProduct]) -> Vec<EnrichedProduct> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Select an owner by display name; `None` selects "All".
    #[must_use]
    pub fn select_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    /// Replace the search query, stripping leading whitespace at input.
    ///
    /// Trailing whitespace is kept; trimming both ends happens inside
    /// [`FilterState::matches`] when the needle is built.
    #[must_use]
    pub fn set_search(mut self, text: &str) -> Self {
        self.search = text.trim_start().to_string();
        self
    }

    /// Clear the search query.
    #[must_use]
    pub fn clear_search(self) -> Self {
        self.set_search("")
    }

    /// Toggle a category in the multi-select.
    ///
    /// Removes the category if already selected (by id), otherwise
    /// appends it at the end. Re-adding after removal appends rather
    /// than restoring the original position.
    #[must_use]
    pub fn toggle_category(mut self, category: &Category) -> Self {
        if self.categories.iter().any(|c| c.id == category.id) {
            self.categories.retain(|c| c.id != category.id);
        } else {
            self.categories.push(category.clone());
        }
        self
    }

    /// Deselect every category.
    #[must_use]
    pub fn clear_categories(mut self) -> Self {
        self.categories.clear();
        self
    }

    /// Reset to the default state in one transition.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }
}
