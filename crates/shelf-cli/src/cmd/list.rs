//! `shelf list` — one-shot filtered catalog listing.

use crate::output::{self, OutputMode, Renderable};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use shelf_core::catalog::{Catalog, EnrichedProduct};
use shelf_core::{FilterState, fixture};
use std::io::{self, Write};

/// Message shown when the filter chain reduces the catalog to nothing.
/// An empty result is a normal outcome, not an error.
pub const NO_MATCH_MESSAGE: &str = "No products matching selected criteria";

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by owner display name.
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Case-insensitive substring search over product names.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by category title; repeat to select several.
    #[arg(short, long)]
    pub category: Vec<String>,
}

/// One row of the product table, in display form.
#[derive(Debug, Serialize)]
pub struct ProductRow {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub owner: String,
    pub sex: String,
}

impl From<&EnrichedProduct> for ProductRow {
    fn from(product: &EnrichedProduct) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category_label(),
            owner: product.user.name.clone(),
            sex: product.user.sex.to_string(),
        }
    }
}

impl Renderable for ProductRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:<4} {:<14} {:<20} {}",
            self.id, self.name, self.category, self.owner
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.id, self.name, self.category, self.owner
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "PRODUCT", "CATEGORY", "OWNER"]
    }
}

/// Build a [`FilterState`] from the CLI flags.
///
/// Category flags are resolved against the catalog by title
/// (case-insensitive); an unknown title is a usage error, since the
/// interactive UI can only ever toggle categories that exist.
fn filter_from_args(args: &ListArgs, catalog: &Catalog) -> Result<FilterState> {
    let mut state = FilterState::default()
        .select_owner(args.owner.clone())
        .set_search(args.search.as_deref().unwrap_or(""));
    for title in &args.category {
        let category = catalog
            .categories
            .iter()
            .find(|c| c.title.eq_ignore_ascii_case(title))
            .ok_or_else(|| {
                let valid: Vec<&str> = catalog
                    .categories
                    .iter()
                    .map(|c| c.title.as_str())
                    .collect();
                anyhow::anyhow!("unknown category '{title}' (valid: {})", valid.join(", "))
            })?;
        state = state.toggle_category(category);
    }
    Ok(state)
}

/// List the catalog with the given filters applied.
pub fn run_list(args: &ListArgs, mode: OutputMode) -> Result<()> {
    let catalog = fixture::load()?;
    let state = filter_from_args(args, &catalog)?;
    let visible = state.apply(&catalog.products);
    tracing::debug!(
        visible = visible.len(),
        total = catalog.products.len(),
        "list filtered"
    );

    if visible.is_empty() && !mode.is_json() {
        println!("{NO_MATCH_MESSAGE}");
        return Ok(());
    }

    let rows: Vec<ProductRow> = visible.iter().map(ProductRow::from).collect();
    output::render_list(&rows, mode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ListArgs,
    }

    #[test]
    fn list_args_defaults() {
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.owner.is_none());
        assert!(w.args.search.is_none());
        assert!(w.args.category.is_empty());
    }

    #[test]
    fn filter_from_args_resolves_categories_case_insensitively() {
        let catalog = fixture::load().expect("load");
        let w = Wrapper::parse_from(["test", "--category", "drinks"]);
        let state = filter_from_args(&w.args, &catalog).expect("resolve");
        assert_eq!(state.categories.len(), 1);
        assert_eq!(state.categories[0].title, "Drinks");
    }

    #[test]
    fn filter_from_args_rejects_unknown_category() {
        let catalog = fixture::load().expect("load");
        let w = Wrapper::parse_from(["test", "--category", "Nonsense"]);
        let err = filter_from_args(&w.args, &catalog).expect_err("must fail");
        let msg = err.to_string();
        assert!(msg.contains("Nonsense"));
        assert!(msg.contains("valid:"));
    }

    #[test]
    fn filter_from_args_strips_leading_search_whitespace() {
        let catalog = fixture::load().expect("load");
        let w = Wrapper::parse_from(["test", "--search", "  milk"]);
        let state = filter_from_args(&w.args, &catalog).expect("resolve");
        assert_eq!(state.search, "milk");
    }

    #[test]
    fn product_row_carries_display_fields() {
        let catalog = fixture::load().expect("load");
        let row = ProductRow::from(&catalog.products[0]);
        assert_eq!(row.name, "Milk");
        assert!(row.category.contains(" - "));
        assert!(!row.owner.is_empty());
    }

    #[test]
    fn product_row_table_headers() {
        assert_eq!(
            ProductRow::table_headers(),
            &["ID", "PRODUCT", "CATEGORY", "OWNER"]
        );
    }
}
