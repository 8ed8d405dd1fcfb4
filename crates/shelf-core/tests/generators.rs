//! Shared proptest generators for catalog and filter-state values.

use proptest::prelude::*;
use shelf_core::FilterState;
use shelf_core::catalog::Catalog;
use shelf_core::model::{Category, Product, Sex, User};

pub fn arb_sex() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::M), Just(Sex::F)]
}

/// A random but referentially consistent catalog: every product points at
/// an existing category and every category at an existing user.
pub fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (1usize..=4, 1usize..=5)
        .prop_flat_map(|(n_users, n_categories)| {
            let sexes = prop::collection::vec(arb_sex(), n_users);
            let owners = prop::collection::vec(0..n_users, n_categories);
            let products =
                prop::collection::vec(("[A-Za-z][A-Za-z ]{0,11}", 0..n_categories), 0..=12);
            (sexes, owners, products)
        })
        .prop_map(|(sexes, owners, product_specs)| {
            let users: Vec<User> = sexes
                .into_iter()
                .enumerate()
                .map(|(i, sex)| User {
                    id: u32::try_from(i).expect("small index") + 1,
                    name: format!("user-{i}"),
                    sex,
                })
                .collect();
            let categories: Vec<Category> = owners
                .into_iter()
                .enumerate()
                .map(|(i, owner_idx)| Category {
                    id: u32::try_from(i).expect("small index") + 1,
                    title: format!("category-{i}"),
                    icon: "📦".to_string(),
                    owner_id: users[owner_idx].id,
                })
                .collect();
            let products: Vec<Product> = product_specs
                .into_iter()
                .enumerate()
                .map(|(i, (name, cat_idx))| Product {
                    id: u32::try_from(i).expect("small index") + 1,
                    name,
                    category_id: categories[cat_idx].id,
                })
                .collect();
            Catalog::build(products, categories, users).expect("generated refs are consistent")
        })
}

/// A catalog paired with a filter state drawn from it: the owner is one of
/// the catalog's users (or None), the selected categories a subset of the
/// catalog's categories.
pub fn arb_catalog_and_state() -> impl Strategy<Value = (Catalog, FilterState)> {
    arb_catalog().prop_flat_map(|catalog| {
        let n_users = catalog.users.len();
        let n_categories = catalog.categories.len();
        let owner = prop::option::of(0..n_users);
        let search = "[A-Za-z ]{0,6}";
        let selected = prop::collection::vec(0..n_categories, 0..=n_categories);
        (Just(catalog), owner, search, selected).prop_map(
            |(catalog, owner_idx, search, selected)| {
                let mut state = FilterState {
                    owner: owner_idx.map(|i| catalog.users[i].name.clone()),
                    search,
                    categories: Vec::new(),
                };
                for idx in selected {
                    state = state.toggle_category(&catalog.categories[idx]);
                }
                (catalog, state)
            },
        )
    })
}
