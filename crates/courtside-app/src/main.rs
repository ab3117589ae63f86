// Courtside entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, so stdout stays clean for JSON)
// 2. Parse arguments and load config
// 3. Load the corpus snapshot
// 4. Build the requested surface and print it

use courtside_app::config::{self, OutputFormat};
use courtside_app::data;
use courtside_app::render;
use courtside_app::views::{BoxScoreView, LeaderboardView, PlayerProfile};
use courtside_core::{MatchId, PlayerId, SortCategory};

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "courtside", version)]
#[command(about = "Career stats, leaderboards and box scores for pickup basketball")]
struct Args {
    /// Path to the config file
    #[arg(long, default_value = "courtside.toml")]
    config: PathBuf,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank every rostered player
    Leaderboard {
        /// points, rebounds, assists, steals, blocks or pi
        #[arg(long)]
        sort: Option<SortCategory>,
    },
    /// Career averages and game log for one player
    Player {
        /// Player id
        id: String,
    },
    /// Box score for one match
    BoxScore {
        /// Match id
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;

    // 2. Arguments and config
    let args = Args::parse();
    let config = config::load_config(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;
    let format = args.format.unwrap_or(config.output.format);
    debug!(?format, "config loaded");

    // 3. Corpus snapshot
    let corpus = data::load_all(&config.data_paths).context("failed to load corpus")?;
    info!(
        "Loaded {} players, {} matches, {} stat lines",
        corpus.players.len(),
        corpus.matches.len(),
        corpus.stat_lines.len()
    );

    // 4. Surface
    let output = match args.command {
        Command::Leaderboard { sort } => {
            let category = sort.unwrap_or(config.leaderboard.default_sort);
            let view = LeaderboardView::build(&corpus, category);
            render::render_leaderboard(&view, format)?
        }
        Command::Player { id } => {
            let id = PlayerId::new(id).context("invalid player id")?;
            let profile = PlayerProfile::build(&corpus, &id)?;
            render::render_profile(&profile, format)?
        }
        Command::BoxScore { id } => {
            let id = MatchId::new(id).context("invalid match id")?;
            let view = BoxScoreView::build(&corpus, &id)?;
            render::render_box_score(&view, format)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Initialize tracing to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("courtside=info,courtside_app=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
