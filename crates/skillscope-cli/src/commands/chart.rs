//! The `skillscope chart` subcommands.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;

use skillscope_core::model::{Member, MemberId};
use skillscope_report::scatter::write_scatter;
use skillscope_report::svg::write_radar;

use crate::store_file;

#[derive(Subcommand)]
pub enum ChartAction {
    /// Radar chart of one member's competencies
    Radar {
        /// Member id
        id: u32,

        /// Output SVG path
        #[arg(long)]
        output: PathBuf,

        /// Skip the ideal-profile overlay
        #[arg(long)]
        no_ideal: bool,
    },

    /// Scatter chart of members by composite axes
    Scatter {
        /// Output SVG path
        #[arg(long)]
        output: PathBuf,

        /// Plot everyone, not just the selection
        #[arg(long)]
        all: bool,
    },
}

pub fn execute(store_path: &Path, action: ChartAction) -> Result<()> {
    let store = store_file::load(store_path)?;

    match action {
        ChartAction::Radar {
            id,
            output,
            no_ideal,
        } => {
            let Some(member) = store.member(MemberId(id)) else {
                anyhow::bail!("no member with id {id}");
            };
            let ideal = (!no_ideal).then(|| store.ideal());
            write_radar(member, ideal, &output)?;
            println!("Wrote radar chart to {}", output.display());
        }
        ChartAction::Scatter { output, all } => {
            let members: Vec<&Member> = store
                .members()
                .iter()
                .filter(|m| all || store.is_selected(m.id))
                .collect();
            write_scatter(&members, &output)?;
            println!(
                "Wrote scatter chart ({} member(s)) to {}",
                members.len(),
                output.display()
            );
        }
    }
    Ok(())
}
