//! The `skillscope rate` command.

use std::path::Path;

use anyhow::Result;

use skillscope_core::competency::CompetencyKey;
use skillscope_core::model::MemberId;

use crate::store_file;

pub fn execute(store_path: &Path, id: u32, competency: &str, level: u8) -> Result<()> {
    let key: CompetencyKey = competency
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut store = store_file::load(store_path)?;
    anyhow::ensure!(
        store.member(MemberId(id)).is_some(),
        "no member with id {id}"
    );
    store.update_score(MemberId(id), key, level)?;
    store_file::save(&store, store_path)?;

    println!("Set {} to {level} for member {id}", key.display_name());
    Ok(())
}
