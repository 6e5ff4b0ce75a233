//! skillscope CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod store_file;

#[derive(Parser)]
#[command(name = "skillscope", version, about = "Team skill evaluation tracker")]
struct Cli {
    /// Local store file
    #[arg(long, global = true, default_value = "skillscope.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and an empty store
    Init,

    /// Show the team overview, or one member in detail
    Show {
        /// Member id to show in detail
        #[arg(long)]
        member: Option<u32>,
    },

    /// Manage members
    Member {
        #[command(subcommand)]
        action: commands::member::MemberAction,
    },

    /// Set one competency score for a member
    Rate {
        /// Member id
        id: u32,
        /// Competency key (e.g. "dataAnalysis")
        competency: String,
        /// Level 1-5
        level: u8,
    },

    /// Set one competency score on the ideal profile
    Ideal {
        /// Competency key (e.g. "planning")
        competency: String,
        /// Level 1-5
        level: u8,
    },

    /// Print the five-level rubric for a competency
    Rubric {
        /// Competency key, or omit for all
        competency: Option<String>,
    },

    /// Manage history snapshots
    Snapshot {
        #[command(subcommand)]
        action: commands::snapshot::SnapshotAction,
    },

    /// Show a member's average over time
    Timeline {
        /// Member id
        id: u32,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show per-competency team statistics
    Stats {
        /// How many top strengths/weaknesses to list
        #[arg(long, default_value = "3")]
        top: usize,
    },

    /// Write the store to a portable JSON export file
    Export {
        /// Output path (default: ps-evaluation-<date>.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Merge a previously exported file into the store
    Import {
        /// Export file to read
        file: PathBuf,
    },

    /// Export charts as standalone SVG files
    Chart {
        #[command(subcommand)]
        action: commands::chart::ChartAction,
    },

    /// Push to or pull from the configured backend
    Sync {
        #[command(subcommand)]
        action: commands::sync::SyncAction,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Interactive editing session with autosave
    Session {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skillscope=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let store_path = cli.store;

    let result = match cli.command {
        Commands::Init => commands::init::execute(&store_path),
        Commands::Show { member } => commands::show::execute(&store_path, member),
        Commands::Member { action } => commands::member::execute(&store_path, action),
        Commands::Rate {
            id,
            competency,
            level,
        } => commands::rate::execute(&store_path, id, &competency, level),
        Commands::Ideal { competency, level } => {
            commands::ideal::execute(&store_path, &competency, level)
        }
        Commands::Rubric { competency } => commands::rubric::execute(competency.as_deref()),
        Commands::Snapshot { action } => commands::snapshot::execute(&store_path, action),
        Commands::Timeline { id, format } => {
            commands::timeline::execute(&store_path, id, &format)
        }
        Commands::Stats { top } => commands::stats::execute(&store_path, top),
        Commands::Export { output } => commands::export::execute(&store_path, output),
        Commands::Import { file } => commands::import::execute(&store_path, &file),
        Commands::Chart { action } => commands::chart::execute(&store_path, action),
        Commands::Sync { action, config } => {
            commands::sync::execute(&store_path, action, config.as_deref()).await
        }
        Commands::Session { config } => {
            commands::session::execute(&store_path, config.as_deref()).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
