//! `shelf owners` — list catalog owners.

use crate::output::{self, OutputMode, Renderable};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use shelf_core::fixture;
use shelf_core::model::User;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct OwnersArgs {}

#[derive(Debug, Serialize)]
struct OwnerRow {
    id: u32,
    name: String,
    sex: String,
}

impl From<&User> for OwnerRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            sex: user.sex.to_string(),
        }
    }
}

impl Renderable for OwnerRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{:<4} {:<14} {}", self.id, self.name, self.sex)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {}  {}", self.id, self.name, self.sex)
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "NAME", "SEX"]
    }
}

/// List every owner in the catalog.
pub fn run_owners(_args: &OwnersArgs, mode: OutputMode) -> Result<()> {
    let catalog = fixture::load()?;
    let rows: Vec<OwnerRow> = catalog.users.iter().map(OwnerRow::from).collect();
    output::render_list(&rows, mode)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_row_from_user() {
        let catalog = fixture::load().expect("load");
        let row = OwnerRow::from(&catalog.users[0]);
        assert_eq!(row.id, catalog.users[0].id);
        assert!(row.sex == "m" || row.sex == "f");
    }
}
