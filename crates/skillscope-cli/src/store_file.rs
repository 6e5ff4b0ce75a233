//! Local store file helpers shared by the commands.

use std::path::Path;

use anyhow::Result;

use skillscope_core::document::StoreDocument;
use skillscope_core::store::EvaluationStore;

/// Load the local store file.
pub fn load(path: &Path) -> Result<EvaluationStore> {
    anyhow::ensure!(
        path.exists(),
        "store file not found: {} (run `skillscope init` first)",
        path.display()
    );
    Ok(StoreDocument::load_json(path)?.into_store())
}

/// Write the store back to the local file.
pub fn save(store: &EvaluationStore, path: &Path) -> Result<()> {
    StoreDocument::from_store(store).save_json(path)
}
