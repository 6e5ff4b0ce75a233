//! The `skillscope sync` subcommands.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;

use skillscope_backend::autosave::save_with_retry;
use skillscope_backend::config::{create_backend, load_config_from};
use skillscope_core::document::StoreDocument;

use crate::store_file;

#[derive(Subcommand)]
pub enum SyncAction {
    /// Upload the local store to the hosted table
    Push,

    /// Replace the local store with the hosted document
    Pull,
}

pub async fn execute(store_path: &Path, action: SyncAction, config_path: Option<&Path>) -> Result<()> {
    let config = load_config_from(config_path)?;
    let Some(backend_config) = &config.backend else {
        anyhow::bail!("no backend configured; add a [backend] section to skillscope.toml");
    };
    let backend = create_backend(backend_config)?;

    match action {
        SyncAction::Push => {
            let store = store_file::load(store_path)?;
            let document = StoreDocument::from_store(&store);
            save_with_retry(
                backend.as_ref(),
                &document,
                config.max_retries,
                Duration::from_millis(config.retry_delay_ms),
            )
            .await?;
            println!(
                "Pushed {} member(s) and {} snapshot(s)",
                document.employees.len(),
                document.evaluation_history.len()
            );
        }
        SyncAction::Pull => match backend.fetch().await? {
            Some(document) => {
                let store = document.into_store();
                store_file::save(&store, store_path)?;
                println!(
                    "Pulled {} member(s) and {} snapshot(s) into {}",
                    store.members().len(),
                    store.history().len(),
                    store_path.display()
                );
            }
            None => {
                println!("No remote document yet; nothing pulled.");
            }
        },
    }
    Ok(())
}
