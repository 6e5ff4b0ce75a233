//! The `skillscope stats` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use skillscope_core::aggregate::{team_stats, top_n, CompetencyStat, RankDirection};
use skillscope_core::store::EvaluationStore;

use crate::store_file;

pub fn execute(store_path: &Path, top: usize) -> Result<()> {
    let store = store_file::load(store_path)?;
    if store.members().is_empty() {
        println!("No members yet. Run `skillscope member add` to get started.");
        return Ok(());
    }

    let stats = team_stats(store.members())?;
    println!("{}", stats_table(&store)?);

    let list = |items: &[CompetencyStat]| {
        items
            .iter()
            .map(|s| format!("{} ({:.1})", s.name, s.average))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!(
        "\nTeam strengths:  {}",
        list(&top_n(&stats, top, RankDirection::Strengths))
    );
    println!(
        "Team weaknesses: {}",
        list(&top_n(&stats, top, RankDirection::Weaknesses))
    );
    Ok(())
}

pub fn stats_table(store: &EvaluationStore) -> Result<Table> {
    let stats = team_stats(store.members())?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Competency", "Avg", "Max", "Min"]);
    for stat in &stats {
        table.add_row(vec![
            Cell::new(&stat.name),
            Cell::new(format!("{:.1}", stat.average)),
            Cell::new(stat.max),
            Cell::new(stat.min),
        ]);
    }
    Ok(table)
}
