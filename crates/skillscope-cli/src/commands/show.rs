//! The `skillscope show` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use skillscope_core::aggregate::{
    average, composite_axes, rank_by_score, strengths, weaknesses,
};
use skillscope_core::competency::rubric;
use skillscope_core::model::{Member, MemberId};
use skillscope_core::store::EvaluationStore;

use crate::store_file;

pub fn execute(store_path: &Path, member: Option<u32>) -> Result<()> {
    let store = store_file::load(store_path)?;

    match member {
        Some(id) => {
            let Some(member) = store.member(MemberId(id)) else {
                anyhow::bail!("no member with id {id}");
            };
            print_member_detail(member);
        }
        None => {
            if store.members().is_empty() {
                println!("No members yet. Run `skillscope member add` to get started.");
                return Ok(());
            }
            println!("{}", overview_table(&store));
            if !store.team_memo().is_empty() {
                println!("\nTeam memo: {}", store.team_memo());
            }
        }
    }
    Ok(())
}

/// Team overview: one row per member with the derived columns.
pub fn overview_table(store: &EvaluationStore) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Id", "Sel", "Name", "Avg", "Tech", "Human", "Memo"]);

    for member in store.members() {
        let axes = composite_axes(&member.scores);
        let avg = average(&member.scores).map(|a| format!("{a:.1}")).unwrap_or_default();
        let selected = if store.is_selected(member.id) { "*" } else { "" };
        table.add_row(vec![
            Cell::new(member.id),
            Cell::new(selected),
            Cell::new(&member.name),
            Cell::new(avg),
            Cell::new(format!("{:.1}", axes.technical)),
            Cell::new(format!("{:.1}", axes.human)),
            Cell::new(truncate(&member.memo, 30)),
        ]);
    }
    table
}

fn print_member_detail(member: &Member) {
    println!("{} (id {}, {})\n", member.name, member.id, member.color);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Competency", "Level", "Rubric"]);
    for (key, level) in member.scores.iter() {
        let description = rubric(key, level).unwrap_or_default();
        table.add_row(vec![
            Cell::new(key.display_name()),
            Cell::new(level),
            Cell::new(description),
        ]);
    }
    println!("{table}");

    let ranked = rank_by_score(&member.scores);
    let list = |items: &[skillscope_core::aggregate::RankedCompetency]| {
        items
            .iter()
            .map(|r| format!("{} ({})", r.name, r.level))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("\nStrengths:  {}", list(&strengths(&ranked)));
    println!("Weaknesses: {}", list(&weaknesses(&ranked)));

    if let Ok(avg) = average(&member.scores) {
        let axes = composite_axes(&member.scores);
        println!(
            "Average: {avg:.1}  Technical: {:.1}  Human: {:.1}",
            axes.technical, axes.human
        );
    }
    if !member.memo.is_empty() {
        println!("Memo: {}", member.memo);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}…")
    }
}
