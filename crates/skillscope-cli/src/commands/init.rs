//! The `skillscope init` command.

use std::path::Path;

use anyhow::Result;

use skillscope_core::store::EvaluationStore;

use crate::store_file;

pub fn execute(store_path: &Path) -> Result<()> {
    // Create skillscope.toml
    if Path::new("skillscope.toml").exists() {
        println!("skillscope.toml already exists, skipping.");
    } else {
        std::fs::write("skillscope.toml", SAMPLE_CONFIG)?;
        println!("Created skillscope.toml");
    }

    // Create an empty store
    if store_path.exists() {
        println!("{} already exists, skipping.", store_path.display());
    } else {
        store_file::save(&EvaluationStore::new(), store_path)?;
        println!("Created {}", store_path.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: skillscope member add");
    println!("  2. Run: skillscope rate 1 planning 4");
    println!("  3. Run: skillscope show");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# skillscope configuration

# Seconds between autosave ticks in `skillscope session`.
autosave_interval_secs = 60

# Uncomment to sync the store to a hosted table.
# [backend]
# type = "rest"
# base_url = "https://your-project.example.com/rest/v1"
# api_key = "${SKILLSCOPE_API_KEY}"
# table = "evaluations"
"#;
