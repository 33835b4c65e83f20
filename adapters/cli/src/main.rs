#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line bot that plays Halite over standard input and output.

mod config;
mod protocol;

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::Parser;
use katamari_planner::{Planner, Strategy};
use katamari_system_analytics::Analytics;
use katamari_world::{Layer, LayerDump};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::protocol::{Connection, Handshake};

#[derive(Parser, Debug)]
#[command(author, version, about = "Halite bot that rolls its territory into the enemy", long_about = None)]
struct Args {
    /// Name announced to the game engine.
    #[arg(long, default_value = "katamari")]
    name: String,
    /// Strategy preset; overrides the configuration file.
    #[arg(long)]
    strategy: Option<Strategy>,
    /// TOML file with planner settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// File receiving the log; standard output carries the game protocol.
    #[arg(long, default_value = "katamari.log")]
    log_file: PathBuf,
}

/// Entry point for the Katamari command-line bot.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let mut config = config::load(args.config.as_deref())?;
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut connection = Connection::new(stdin.lock(), stdout.lock());

    let Handshake { session, grid } = connection
        .handshake()
        .context("failed to read the game start")?;
    info!(
        player = %session.player(),
        width = session.width(),
        height = session.height(),
        strategy = %config.strategy,
        "game started"
    );
    debug!("productions\n{}", LayerDump::new(&grid, Layer::Production));
    debug!("strength\n{}", LayerDump::new(&grid, Layer::Strength));

    let planner = Planner::new(session, config);
    connection
        .send_name(&args.name)
        .context("failed to announce the bot name")?;

    let mut analytics = Analytics::new();
    while let Some(grid) = connection.next_frame().context("failed to read a frame")? {
        let moves = match planner.plan_turn(&grid) {
            Ok(plan) => {
                let report =
                    analytics.record(&grid, session.player(), plan.frontier(), plan.moves());
                info!(
                    turn = report.turn,
                    territory = report.territory,
                    strength = report.total_strength,
                    border = report.border,
                    contacts = report.contacts,
                    moves = report.moves,
                    idle = report.idle,
                    "turn planned"
                );
                plan.into_moves()
            }
            Err(error) => {
                error!(%error, "planning failed, every cell stays this turn");
                Vec::new()
            }
        };

        connection
            .send_moves(&moves)
            .context("failed to send moves")?;
    }

    let summary = serde_json::to_string(&analytics.last_report())
        .context("failed to encode the final report")?;
    info!(
        turns = analytics.turns(),
        peak_territory = analytics.peak_territory(),
        last_report = %summary,
        "game over"
    );
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
