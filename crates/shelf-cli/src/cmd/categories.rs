//! `shelf categories` — list categories with their owners.

use crate::output::{self, OutputMode, Renderable};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use shelf_core::fixture;
use std::collections::HashMap;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct CategoriesArgs {}

#[derive(Debug, Serialize)]
struct CategoryRow {
    id: u32,
    title: String,
    icon: String,
    owner: String,
}

impl Renderable for CategoryRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{:<4} {} {:<14} {}",
            self.id, self.icon, self.title, self.owner
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.id, self.icon, self.title, self.owner
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "ICON", "TITLE", "OWNER"]
    }
}

/// List every category joined with its owner's name.
pub fn run_categories(_args: &CategoriesArgs, mode: OutputMode) -> Result<()> {
    // The joiner already guarantees every owner_id resolves.
    let catalog = fixture::load()?;
    let owner_names: HashMap<u32, &str> = catalog
        .users
        .iter()
        .map(|u| (u.id, u.name.as_str()))
        .collect();
    let rows: Vec<CategoryRow> = catalog
        .categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id,
            title: c.title.clone(),
            icon: c.icon.clone(),
            owner: owner_names
                .get(&c.owner_id)
                .copied()
                .unwrap_or_default()
                .to_string(),
        })
        .collect();
    output::render_list(&rows, mode)?;
    Ok(())
}
