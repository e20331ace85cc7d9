//! mancala - heuristic experiments for Kalah
//!
//! Plays a batch of games between alpha-beta agents with randomly drawn
//! heuristics, depths and weights, then prints how each heuristic fared
//! from either seat.

use anyhow::{Context, Result};
use clap::Parser;
use mancala_core::experiment::{run_experiment, GameRecord, Summary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

mod cli;
mod report;

use crate::cli::Cli;

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn write_records(path: &Path, records: &[GameRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    init_tracing(&cli.log_level);
    info!(log_level = %cli.log_level, "Tracing initialized");

    let config = cli.experiment_config()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        games = config.games,
        seed,
        depth = %format!("{}..={}", config.min_depth, config.max_depth),
        weights = %format!("{}..={}", config.weight_min, config.weight_max),
        "Starting experiment"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let records = run_experiment(&config, &mut rng, |index, setup, record| {
        info!(
            game = index + 1,
            p1 = %record.p1,
            p2 = %record.p2,
            depth = setup.depth,
            score = %format!("{}-{}", record.p1_score, record.p2_score),
            result = ?record.result,
            "Game finished"
        );
        debug!(weights = ?setup.weights.as_array(), moves = record.moves, "Game details");
        if cli.show_boards {
            let board = record
                .final_board
                .to_ascii_string(&format!("P1 {}", record.p1), &format!("P2 {}", record.p2));
            info!("Final board:\n{board}");
        }
    })?;

    if let Some(path) = &cli.output {
        write_records(path, &records)?;
        info!(path = %path.display(), records = records.len(), "Results written");
    }

    print!("{}", report::render_summary(&Summary::from_records(&records)));
    Ok(())
}
