//! The `skillscope ideal` command.

use std::path::Path;

use anyhow::Result;

use skillscope_core::competency::CompetencyKey;

use crate::store_file;

pub fn execute(store_path: &Path, competency: &str, level: u8) -> Result<()> {
    let key: CompetencyKey = competency
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut store = store_file::load(store_path)?;
    store.update_ideal(key, level)?;
    store_file::save(&store, store_path)?;

    println!("Set ideal {} to {level}", key.display_name());
    Ok(())
}
