//! The `skillscope snapshot` subcommands.

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use skillscope_core::store::EvaluationStore;

use crate::store_file;

#[derive(Subcommand)]
pub enum SnapshotAction {
    /// Record a snapshot of all current scores
    Record {
        /// Calendar date (YYYY-MM-DD)
        date: String,

        /// Optional note
        #[arg(long, default_value = "")]
        memo: String,
    },

    /// Delete a snapshot
    Delete {
        /// Snapshot id
        id: i64,
    },

    /// List snapshots, newest date first
    List,
}

pub fn execute(store_path: &Path, action: SnapshotAction) -> Result<()> {
    let mut store = store_file::load(store_path)?;

    match action {
        SnapshotAction::Record { date, memo } => {
            let id = store.record_snapshot(&date, &memo)?;
            store_file::save(&store, store_path)?;
            println!("Recorded snapshot {id} ({date})");
        }
        SnapshotAction::Delete { id } => {
            store.delete_snapshot(id);
            store_file::save(&store, store_path)?;
            println!("Deleted snapshot {id}");
        }
        SnapshotAction::List => {
            if store.history().is_empty() {
                println!("No snapshots yet.");
            } else {
                println!("{}", list_table(&store));
            }
        }
    }
    Ok(())
}

pub fn list_table(store: &EvaluationStore) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Id", "Date", "Members", "Memo"]);
    for snapshot in store.history() {
        table.add_row(vec![
            Cell::new(snapshot.id),
            Cell::new(snapshot.date),
            Cell::new(snapshot.entries.len()),
            Cell::new(&snapshot.memo),
        ]);
    }
    table
}
