use anyhow::{anyhow, Context, Result};
use clap::Parser;
use mancala_core::experiment::ExperimentConfig;
use std::fs;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Plays randomized Kalah games between alpha-beta agents and reports how
/// each heuristic fared.
#[derive(Parser, Debug, Clone)]
#[command(name = "mancala")]
#[command(about = "Kalah heuristic experiments with alpha-beta agents")]
pub struct Cli {
    /// JSON experiment config; the flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of games to play
    #[arg(long)]
    pub games: Option<u32>,

    /// RNG seed; drawn from entropy when absent
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub min_depth: Option<u8>,

    #[arg(long)]
    pub max_depth: Option<u8>,

    #[arg(long)]
    pub weight_min: Option<u8>,

    #[arg(long)]
    pub weight_max: Option<u8>,

    /// Write one JSON record per game to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log the final board of every game
    #[arg(long, default_value_t = false)]
    pub show_boards: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Invalid log level: {}", self.log_level))?;
        Ok(())
    }

    /// Loads the config file (or the defaults) and applies flag overrides.
    pub fn experiment_config(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                ExperimentConfig::load_from_json(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => ExperimentConfig::default(),
        };

        if let Some(games) = self.games {
            config.games = games;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(depth) = self.min_depth {
            config.min_depth = depth;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(weight) = self.weight_min {
            config.weight_min = weight;
        }
        if let Some(weight) = self.weight_max {
            config.weight_max = weight;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mancala"]).unwrap();
        assert!(cli.validate().is_ok());
        assert!(!cli.show_boards);
        assert_eq!(cli.experiment_config().unwrap(), ExperimentConfig::default());
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::try_parse_from([
            "mancala",
            "--games",
            "12",
            "--seed",
            "5",
            "--max-depth",
            "4",
            "--weight-max",
            "3",
            "--show-boards",
        ])
        .unwrap();
        let config = cli.experiment_config().unwrap();
        assert_eq!(config.games, 12);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.weight_max, 3);
        assert_eq!(config.min_depth, 3);
        assert!(cli.show_boards);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let cli = Cli::try_parse_from(["mancala", "--min-depth", "5", "--max-depth", "2"]).unwrap();
        assert!(cli.experiment_config().is_err());

        let cli = Cli::try_parse_from(["mancala", "--log-level", "loud"]).unwrap();
        assert!(cli.validate().is_err());

        assert!(Cli::try_parse_from(["mancala", "--games", "-1"]).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::try_parse_from(["mancala", "--config", "/nonexistent/mancala.json"]).unwrap();
        assert!(cli.experiment_config().is_err());
    }
}
