//! The `skillscope export` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;

use skillscope_core::document::{export_file_name, ExportFile};

use crate::store_file;

pub fn execute(store_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let store = store_file::load(store_path)?;
    let path = output
        .unwrap_or_else(|| PathBuf::from(export_file_name(Utc::now().date_naive())));

    ExportFile::from_store(&store).save_json(&path)?;
    println!("Exported to {}", path.display());
    Ok(())
}
