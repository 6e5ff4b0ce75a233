//! The `skillscope import` command.

use std::path::Path;

use anyhow::Result;

use skillscope_core::document::ExportFile;
use skillscope_core::store::EvaluationStore;

use crate::store_file;

pub fn execute(store_path: &Path, file: &Path) -> Result<()> {
    // Import into the current store when one exists; a fresh import works
    // without a prior init.
    let current = if store_path.exists() {
        store_file::load(store_path)?
    } else {
        EvaluationStore::new()
    };

    let export = ExportFile::load_json(file)?;
    let merged = export.apply_to(&current);
    store_file::save(&merged, store_path)?;

    println!(
        "Imported {} member(s) and {} snapshot(s) from {}",
        merged.members().len(),
        merged.history().len(),
        file.display()
    );
    Ok(())
}
