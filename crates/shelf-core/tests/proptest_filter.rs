use proptest::prelude::*;
use shelf_core::FilterState;

// Since generators.rs is a sibling file in tests/, we use #[path] to include it as a module.
#[path = "generators.rs"]
mod generators;
use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(1000))]

    #[test]
    fn apply_output_is_an_order_preserving_subset((catalog, state) in arb_catalog_and_state()) {
        let visible = state.apply(&catalog.products);
        // Subset: every visible product exists in the catalog.
        for product in &visible {
            prop_assert!(catalog.products.contains(product));
        }
        // Order: positions in the original catalog are strictly increasing.
        let positions: Vec<usize> = visible
            .iter()
            .map(|p| {
                catalog
                    .products
                    .iter()
                    .position(|q| q == p)
                    .expect("subset already checked")
            })
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn default_state_is_identity(catalog in arb_catalog()) {
        let visible = FilterState::default().apply(&catalog.products);
        prop_assert_eq!(visible, catalog.products);
    }

    #[test]
    fn apply_is_idempotent((catalog, state) in arb_catalog_and_state()) {
        let once = state.apply(&catalog.products);
        let twice = state.apply(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn matches_agrees_with_apply((catalog, state) in arb_catalog_and_state()) {
        let visible = state.apply(&catalog.products);
        let by_matches: Vec<_> = catalog
            .products
            .iter()
            .filter(|p| state.matches(p))
            .cloned()
            .collect();
        prop_assert_eq!(visible, by_matches);
    }

    #[test]
    fn toggle_twice_restores_the_selection_as_a_set(
        (catalog, state) in arb_catalog_and_state(),
        idx in 0usize..5,
    ) {
        let category = &catalog.categories[idx % catalog.categories.len()];
        let toggled = state.clone().toggle_category(category).toggle_category(category);
        let mut before: Vec<u32> = state.categories.iter().map(|c| c.id).collect();
        let mut after: Vec<u32> = toggled.categories.iter().map(|c| c.id).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn reset_always_yields_the_default_state((_catalog, state) in arb_catalog_and_state()) {
        prop_assert_eq!(state.reset(), FilterState::default());
    }
}
