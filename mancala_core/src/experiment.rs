//! Agent-versus-agent games and the randomized experiments built on them.

use crate::engine::config::{ConfigError, EngineConfig};
use crate::engine::eval::{Heuristic, Weights};
use crate::engine::search::AlphaBetaEngine;
use crate::engine::SearchError;
use crate::logic::board::{Side, StandardBoard};
use crate::logic::game::GameState;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub heuristic: Heuristic,
    pub depth: u8,
}

impl Agent {
    pub const fn new(heuristic: Heuristic, depth: u8) -> Self {
        Self { heuristic, depth }
    }

    pub const fn engine(self, weights: Weights) -> AlphaBetaEngine {
        AlphaBetaEngine::new(EngineConfig::new(self.depth, self.heuristic, weights))
    }
}

/// Everything needed to replay one game: a heuristic per row, plus the
/// depth and weights both agents search with. Top always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    pub top: Heuristic,
    pub bottom: Heuristic,
    pub depth: u8,
    pub weights: Weights,
}

impl GameSetup {
    pub const fn agent(&self, side: Side) -> Agent {
        match side {
            Side::Top => Agent::new(self.top, self.depth),
            Side::Bottom => Agent::new(self.bottom, self.depth),
        }
    }

    /// Draws a heuristic for each row, one depth and one weights vector.
    pub fn random<R: Rng + ?Sized>(config: &ExperimentConfig, rng: &mut R) -> Self {
        let depth = rng.gen_range(config.min_depth..=config.max_depth);
        let mut weight = || rng.gen_range(config.weight_min..=config.weight_max);
        let weights = Weights::new(weight(), weight(), weight(), weight());

        let top = Heuristic::ALL.choose(rng).copied().unwrap_or_default();
        let bottom = Heuristic::ALL.choose(rng).copied().unwrap_or_default();

        Self {
            top,
            bottom,
            depth,
            weights,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    P1,
    P2,
    Draw,
}

impl MatchResult {
    pub fn from_scores(p1: u16, p2: u16) -> Self {
        match p1.cmp(&p2) {
            Ordering::Greater => Self::P1,
            Ordering::Less => Self::P2,
            Ordering::Equal => Self::Draw,
        }
    }
}

/// One finished game. P1 plays the top row, P2 the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub p1: Heuristic,
    pub p2: Heuristic,
    pub depth: u8,
    pub weights: Weights,
    pub p1_score: u16,
    pub p2_score: u16,
    pub moves: usize,
    pub result: MatchResult,
    #[serde(skip)]
    pub final_board: StandardBoard,
}

/// Plays a full game from the opening position with `Top` to move. Each
/// agent searches as the maximizing side for its own row.
pub fn play_match(setup: &GameSetup) -> Result<GameRecord, SearchError> {
    let mut game = GameState::new();
    let mut top = setup.agent(Side::Top).engine(setup.weights);
    let mut bottom = setup.agent(Side::Bottom).engine(setup.weights);

    while !game.is_over() {
        let side = game.turn;
        let engine = match side {
            Side::Top => &mut top,
            Side::Bottom => &mut bottom,
        };
        let outcome = engine.search(&game.board, side, side)?;
        game.make_move(outcome.best_pit)?;
    }

    Ok(GameRecord {
        p1: setup.top,
        p2: setup.bottom,
        depth: setup.depth,
        weights: setup.weights,
        p1_score: game.board.top_score,
        p2_score: game.board.bottom_score,
        moves: game.history.len(),
        result: MatchResult::from_scores(game.board.top_score, game.board.bottom_score),
        final_board: game.board,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub games: u32,
    pub min_depth: u8,
    pub max_depth: u8,
    pub weight_min: u8,
    pub weight_max: u8,
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            games: 100,
            min_depth: 3,
            max_depth: 6,
            weight_min: 1,
            weight_max: 5,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::Zero("games"));
        }
        if self.min_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.min_depth > self.max_depth {
            return Err(ConfigError::InvalidRange {
                field: "depth",
                min: u32::from(self.min_depth),
                max: u32::from(self.max_depth),
            });
        }
        if self.weight_min > self.weight_max {
            return Err(ConfigError::InvalidRange {
                field: "weight",
                min: u32::from(self.weight_min),
                max: u32::from(self.weight_max),
            });
        }
        Ok(())
    }
}

/// Runs `config.games` random games, handing each record to `on_game` as
/// soon as it finishes.
pub fn run_experiment<R, F>(
    config: &ExperimentConfig,
    rng: &mut R,
    mut on_game: F,
) -> Result<Vec<GameRecord>, SearchError>
where
    R: Rng + ?Sized,
    F: FnMut(usize, &GameSetup, &GameRecord),
{
    let mut records = Vec::with_capacity(config.games as usize);
    for index in 0..config.games as usize {
        let setup = GameSetup::random(config, rng);
        let record = play_match(&setup)?;
        on_game(index, &setup, &record);
        records.push(record);
    }
    Ok(records)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Tally {
    fn add(&mut self, result: MatchResult, me: MatchResult) {
        self.games += 1;
        if result == MatchResult::Draw {
            self.draws += 1;
        } else if result == me {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    /// Win, loss and draw percentages; all zero for an empty tally.
    pub fn percentages(&self) -> (f64, f64, f64) {
        if self.games == 0 {
            return (0.0, 0.0, 0.0);
        }
        let total = f64::from(self.games);
        (
            f64::from(self.wins) * 100.0 / total,
            f64::from(self.losses) * 100.0 / total,
            f64::from(self.draws) * 100.0 / total,
        )
    }
}

/// Results of one seat (P1 or P2), split by the heuristic it played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeatSummary {
    pub by_heuristic: BTreeMap<Heuristic, Tally>,
    pub overall: Tally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub p1: SeatSummary,
    pub p2: SeatSummary,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary
                .p1
                .by_heuristic
                .entry(record.p1)
                .or_default()
                .add(record.result, MatchResult::P1);
            summary.p1.overall.add(record.result, MatchResult::P1);

            summary
                .p2
                .by_heuristic
                .entry(record.p2)
                .or_default()
                .add(record.result, MatchResult::P2);
            summary.p2.overall.add(record.result, MatchResult::P2);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(p1: Heuristic, p2: Heuristic, result: MatchResult) -> GameRecord {
        GameRecord {
            p1,
            p2,
            depth: 3,
            weights: Weights::default(),
            p1_score: 0,
            p2_score: 0,
            moves: 0,
            result,
            final_board: StandardBoard::new(),
        }
    }

    #[test]
    fn test_random_setup_in_range() {
        let config = ExperimentConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let setup = GameSetup::random(&config, &mut rng);
            assert!((3..=6).contains(&setup.depth));
            assert_eq!(setup.agent(Side::Top).depth, setup.agent(Side::Bottom).depth);
            assert!(setup.weights.as_array().iter().all(|w| (1..=5).contains(w)));
        }
    }

    #[test]
    fn test_random_setup_is_seeded() {
        let config = ExperimentConfig::default();
        let a = GameSetup::random(&config, &mut StdRng::seed_from_u64(42));
        let b = GameSetup::random(&config, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_play_match_conserves_stones() {
        let setup = GameSetup {
            top: Heuristic::Capture,
            bottom: Heuristic::StoreDifference,
            depth: 3,
            weights: Weights::new(2, 1, 3, 4),
        };
        let record = play_match(&setup).unwrap();
        assert_eq!(u32::from(record.p1_score) + u32::from(record.p2_score), 48);
        assert_eq!(record.final_board.top, [0; 6]);
        assert_eq!(record.final_board.bottom, [0; 6]);
        assert!(record.moves > 0);

        assert_eq!(record.result, MatchResult::from_scores(record.p1_score, record.p2_score));

        // Same setup, same game.
        assert_eq!(play_match(&setup).unwrap(), record);
    }

    #[test]
    fn test_top_always_opens() {
        let config = ExperimentConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..5 {
            let mut setup = GameSetup::random(&config, &mut rng);
            setup.depth = 2;
            let record = play_match(&setup).unwrap();

            // Replay by hand with top to move on the opening board.
            let mut game = GameState::new();
            assert_eq!(game.turn, Side::Top);
            let mut engines = [
                setup.agent(Side::Top).engine(setup.weights),
                setup.agent(Side::Bottom).engine(setup.weights),
            ];
            while !game.is_over() {
                let side = game.turn;
                let engine = match side {
                    Side::Top => &mut engines[0],
                    Side::Bottom => &mut engines[1],
                };
                let outcome = engine.search(&game.board, side, side).unwrap();
                game.make_move(outcome.best_pit).unwrap();
            }

            assert_eq!(game.history[0].side, Side::Top);
            assert_eq!(record.final_board, game.board);
            assert_eq!(record.moves, game.history.len());
        }
    }

    #[test]
    fn test_run_experiment() {
        let config = ExperimentConfig {
            games: 4,
            min_depth: 1,
            max_depth: 2,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = 0;
        let records = run_experiment(&config, &mut rng, |index, _, _| {
            assert_eq!(index, seen);
            seen += 1;
        })
        .unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(seen, 4);
    }

    #[test]
    fn test_config_validation() {
        assert!(ExperimentConfig::default().validate().is_ok());
        let config = ExperimentConfig::load_from_json(r#"{ "games": 10, "seed": 9 }"#).unwrap();
        assert_eq!(config.games, 10);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_depth, 6);

        assert!(matches!(
            ExperimentConfig::load_from_json(r#"{ "min_depth": 5, "max_depth": 4 }"#),
            Err(ConfigError::InvalidRange { field: "depth", .. })
        ));
        assert!(matches!(
            ExperimentConfig::load_from_json(r#"{ "weight_min": 6 }"#),
            Err(ConfigError::InvalidRange { field: "weight", .. })
        ));
        assert!(matches!(
            ExperimentConfig::load_from_json(r#"{ "min_depth": 0 }"#),
            Err(ConfigError::ZeroDepth)
        ));
        assert!(matches!(
            ExperimentConfig::load_from_json(r#"{ "games": 0 }"#),
            Err(ConfigError::Zero("games"))
        ));
    }

    #[test]
    fn test_result_from_scores() {
        assert_eq!(MatchResult::from_scores(25, 23), MatchResult::P1);
        assert_eq!(MatchResult::from_scores(20, 28), MatchResult::P2);
        assert_eq!(MatchResult::from_scores(24, 24), MatchResult::Draw);
        assert_eq!(serde_json::to_string(&MatchResult::Draw).unwrap(), "\"draw\"");
    }

    #[test]
    fn test_summary() {
        let records = [
            record(Heuristic::StoreDifference, Heuristic::Capture, MatchResult::P1),
            record(Heuristic::StoreDifference, Heuristic::SideStones, MatchResult::Draw),
            record(Heuristic::BonusTurn, Heuristic::Capture, MatchResult::P2),
        ];
        let summary = Summary::from_records(&records);

        let h1 = summary.p1.by_heuristic[&Heuristic::StoreDifference];
        assert_eq!((h1.games, h1.wins, h1.losses, h1.draws), (2, 1, 0, 1));
        let h4 = summary.p2.by_heuristic[&Heuristic::Capture];
        assert_eq!((h4.games, h4.wins, h4.losses, h4.draws), (2, 1, 1, 0));

        assert_eq!(summary.p1.overall.games, 3);
        let (win, loss, draw) = summary.p2.overall.percentages();
        assert!((win - 100.0 / 3.0).abs() < 1e-9);
        assert!((loss - 100.0 / 3.0).abs() < 1e-9);
        assert!((draw - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(Tally::default().percentages(), (0.0, 0.0, 0.0));
    }
}
