use crate::engine::config::ConfigError;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

pub const STANDARD_PITS: usize = 6;
pub const STANDARD_STONES: u16 = 4;

pub type StandardBoard = Board<STANDARD_PITS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::Top, Self::Bottom];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(ConfigError::UnknownSide(other.to_string())),
        }
    }
}

/// A Kalah position with `N` pits per row.
///
/// Sowing runs from low to high pit index; each side's store sits after its
/// pit `N - 1`. The pit facing `top[i]` is `bottom[N - 1 - i]`.
///
/// `bonus_turn` and `captured` only describe the move that produced this
/// board. The next move overwrites them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board<const N: usize> {
    #[serde(with = "BigArray")]
    pub top: [u16; N],
    #[serde(with = "BigArray")]
    pub bottom: [u16; N],
    pub top_score: u16,
    pub bottom_score: u16,
    #[serde(default)]
    pub bonus_turn: bool,
    #[serde(default)]
    pub captured: u16,
}

impl Default for Board<STANDARD_PITS> {
    fn default() -> Self {
        Self::new()
    }
}

impl Board<STANDARD_PITS> {
    /// Standard opening position: six pits of four stones per side.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_stones(STANDARD_STONES)
    }
}

impl<const N: usize> Board<N> {
    #[must_use]
    pub const fn with_stones(stones: u16) -> Self {
        Self::from_parts([stones; N], [stones; N], 0, 0)
    }

    #[must_use]
    pub const fn from_parts(top: [u16; N], bottom: [u16; N], top_score: u16, bottom_score: u16) -> Self {
        Self {
            top,
            bottom,
            top_score,
            bottom_score,
            bonus_turn: false,
            captured: 0,
        }
    }

    pub const fn row(&self, side: Side) -> &[u16; N] {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }

    pub fn row_mut(&mut self, side: Side) -> &mut [u16; N] {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        }
    }

    pub const fn store(&self, side: Side) -> u16 {
        match side {
            Side::Top => self.top_score,
            Side::Bottom => self.bottom_score,
        }
    }

    pub fn store_mut(&mut self, side: Side) -> &mut u16 {
        match side {
            Side::Top => &mut self.top_score,
            Side::Bottom => &mut self.bottom_score,
        }
    }

    pub fn pit(&self, side: Side, pit: usize) -> Option<u16> {
        self.row(side).get(pit).copied()
    }

    /// Stones still in `side`'s pits (store excluded).
    pub fn stones_on_side(&self, side: Side) -> u32 {
        self.row(side).iter().map(|&s| u32::from(s)).sum()
    }

    pub fn is_row_empty(&self, side: Side) -> bool {
        self.row(side).iter().all(|&s| s == 0)
    }

    /// Every stone on the board, stores included. Constant over a game.
    pub fn total_stones(&self) -> u32 {
        self.stones_on_side(Side::Top)
            + self.stones_on_side(Side::Bottom)
            + u32::from(self.top_score)
            + u32::from(self.bottom_score)
    }

    /// Renders the board with top's store on the left and bottom's on the
    /// right; pits are numbered from 1 in each player's sowing order.
    pub fn to_ascii_string(&self, top_label: &str, bottom_label: &str) -> String {
        let rule = "--+".repeat(N);
        let mut out = String::new();

        out.push_str("    ");
        for num in (1..=N).rev() {
            let _ = write!(out, "{num:3}");
        }
        out.push('\n');

        let _ = writeln!(out, "+---+{rule}---+");

        out.push('|');
        let _ = write!(out, "{top_label:>3.3}|");
        for stones in self.top.iter().rev() {
            let _ = write!(out, "{stones:2}|");
        }
        out.push_str("   | <- PLAYER 1\n");

        let _ = writeln!(out, "|{:3}+{rule}{:3}|", self.top_score, self.bottom_score);

        out.push_str("|   |");
        for stones in &self.bottom {
            let _ = write!(out, "{stones:2}|");
        }
        let _ = writeln!(out, "{bottom_label:>3.3}| PLAYER 2 ->");

        let _ = writeln!(out, "+---+{rule}---+");

        out.push_str("    ");
        for num in 1..=N {
            let _ = write!(out, "{num:3}");
        }
        out.push('\n');

        out
    }
}

impl<const N: usize> fmt::Display for Board<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii_string("P_1", "P_2"))
    }
}
