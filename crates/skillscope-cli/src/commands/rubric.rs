//! The `skillscope rubric` command.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use skillscope_core::competency::{rubric, CompetencyKey};

pub fn execute(competency: Option<&str>) -> Result<()> {
    let keys: Vec<CompetencyKey> = match competency {
        Some(raw) => {
            let key = raw.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            vec![key]
        }
        None => CompetencyKey::ALL.to_vec(),
    };

    for key in keys {
        println!("{} ({key})", key.display_name());
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Level", "Description"]);
        for level in 1..=5 {
            table.add_row(vec![Cell::new(level), Cell::new(rubric(key, level)?)]);
        }
        println!("{table}\n");
    }
    Ok(())
}
