//! The `skillscope session` command.
//!
//! An interactive editing loop holding the store in memory, with the
//! autosave task flushing dirty state to the configured backend in the
//! background. Edits never wait on the network; a failed save leaves the
//! dirty flag set and the next tick retries.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::io::AsyncBufReadExt;

use skillscope_backend::autosave::{save_with_retry, spawn_autosave};
use skillscope_backend::config::{create_backend, load_config_from, SkillscopeConfig};
use skillscope_backend::DocumentBackend;
use skillscope_core::competency::CompetencyKey;
use skillscope_core::document::StoreDocument;
use skillscope_core::model::MemberId;
use skillscope_core::store::EvaluationStore;
use skillscope_core::timeline::build_timeline;

use crate::store_file;

pub async fn execute(store_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config_from(config_path)?;

    let store = if store_path.exists() {
        store_file::load(store_path)?
    } else {
        EvaluationStore::new()
    };
    let store = Arc::new(Mutex::new(store));

    let backend: Option<Arc<dyn DocumentBackend>> = match &config.backend {
        Some(backend_config) => Some(Arc::from(create_backend(backend_config)?)),
        None => None,
    };
    let autosave = backend.clone().map(|b| {
        spawn_autosave(
            Arc::clone(&store),
            b,
            Duration::from_secs(config.autosave_interval_secs),
        )
    });

    println!("skillscope session — type `help` for commands, `quit` to exit.");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if line == "save" {
            save_now(&store, backend.as_deref(), &config, store_path).await;
            continue;
        }
        if let Err(e) = handle_line(&store, line) {
            eprintln!("error: {e:#}");
        }
    }

    if let Some(handle) = autosave {
        handle.abort();
    }
    save_now(&store, backend.as_deref(), &config, store_path).await;
    println!("Session ended.");
    Ok(())
}

/// Flush to the local file and, when configured, to the backend. Failures
/// are reported and leave the in-memory state and dirty flag intact.
async fn save_now(
    store: &Arc<Mutex<EvaluationStore>>,
    backend: Option<&dyn DocumentBackend>,
    config: &SkillscopeConfig,
    store_path: &Path,
) {
    let document = {
        let store = store.lock().unwrap();
        StoreDocument::from_store(&store)
    };

    if let Err(e) = document.save_json(store_path) {
        eprintln!("warning: local save failed: {e:#}");
        return;
    }

    match backend {
        Some(backend) => {
            let result = save_with_retry(
                backend,
                &document,
                config.max_retries,
                Duration::from_millis(config.retry_delay_ms),
            )
            .await;
            match result {
                Ok(()) => {
                    store.lock().unwrap().mark_saved(Utc::now());
                    println!("Saved.");
                }
                Err(e) => {
                    // Dirty stays set; autosave or a later `save` retries.
                    eprintln!("warning: backend save failed: {e:#}");
                }
            }
        }
        None => {
            store.lock().unwrap().mark_saved(Utc::now());
            println!("Saved.");
        }
    }
}

fn handle_line(store: &Arc<Mutex<EvaluationStore>>, line: &str) -> Result<()> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();
    let mut store = store.lock().unwrap();

    match command {
        "help" => print_help(),
        "add" => {
            let id = store.add_member();
            println!("Added member {id}");
        }
        "remove" => store.remove_member(parse_member_id(&args, 0)?),
        "rename" => {
            let id = parse_member_id(&args, 0)?;
            store.rename_member(id, &args[1..].join(" "));
        }
        "memo" => {
            let id = parse_member_id(&args, 0)?;
            store.update_memo(id, &args[1..].join(" "));
        }
        "rate" => {
            let id = parse_member_id(&args, 0)?;
            let key = parse_key(&args, 1)?;
            let level = parse_level(&args, 2)?;
            store.update_score(id, key, level)?;
        }
        "ideal" => {
            let key = parse_key(&args, 0)?;
            let level = parse_level(&args, 1)?;
            store.update_ideal(key, level)?;
        }
        "reorder" => {
            let id = parse_member_id(&args, 0)?;
            let index: usize = required(&args, 1, "index")?.parse()?;
            store.reorder(id, index);
        }
        "select" => store.toggle_selection(parse_member_id(&args, 0)?),
        "snapshot" => {
            let date = required(&args, 0, "date")?;
            let id = store.record_snapshot(date, &args[1..].join(" "))?;
            println!("Recorded snapshot {id}");
        }
        "delsnap" => {
            let id: i64 = required(&args, 0, "snapshot id")?.parse()?;
            store.delete_snapshot(id);
        }
        "show" => println!("{}", super::show::overview_table(&store)),
        "stats" => println!("{}", super::stats::stats_table(&store)?),
        "timeline" => {
            let id = parse_member_id(&args, 0)?;
            let points = build_timeline(id, store.history(), store.members())?;
            for point in points {
                println!("  {:<12} {:.1}", point.label(), point.average);
            }
        }
        "status" => {
            let state = if store.is_dirty() {
                "unsaved changes"
            } else {
                "clean"
            };
            let saved = store
                .last_saved_at()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "never".to_string());
            println!("{state}; last saved: {saved}");
        }
        other => anyhow::bail!("unknown command `{other}` (try `help`)"),
    }
    Ok(())
}

fn print_help() {
    println!(
        "\
Commands:
  add                        add a member with default scores
  remove <id>                remove a member
  rename <id> <name>         rename a member
  memo <id> <text>           replace a member's memo
  rate <id> <key> <level>    set one score (level 1-5)
  ideal <key> <level>        set one ideal-profile score
  reorder <id> <index>       move a member (0-based)
  select <id>                toggle chart inclusion
  snapshot <date> [memo]     record a history snapshot
  delsnap <id>               delete a snapshot
  show | stats | status      views
  timeline <id>              member average over time
  save                       save now
  quit                       save and exit"
    );
}

fn required<'a>(args: &[&'a str], index: usize, what: &str) -> Result<&'a str> {
    args.get(index)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("missing {what}"))
}

fn parse_member_id(args: &[&str], index: usize) -> Result<MemberId> {
    Ok(MemberId(required(args, index, "member id")?.parse()?))
}

fn parse_key(args: &[&str], index: usize) -> Result<CompetencyKey> {
    required(args, index, "competency key")?
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
}

fn parse_level(args: &[&str], index: usize) -> Result<u8> {
    Ok(required(args, index, "level")?.parse()?)
}
