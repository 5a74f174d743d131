use serde::{Deserialize, Serialize};

use crate::constants::{
    BUG_FOOTPRINT, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, SCORE_BEE, SCORE_MALARIA,
    SCORE_MOSQUITO,
};
use crate::difficulty::Difficulty;

mod headless;
mod physics;
mod session;
mod spawn;

pub use headless::{frames_between, run_headless, HeadlessSummary};
pub use physics::step_bug;
pub use session::Session;
pub use spawn::pick_kind;

/// Session-unique handle for a live bug. Never reused within a session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BugId(pub u32);

/// Value tier of a bug: low (mosquito), high (malaria mosquito) or penalty (bee).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugKind {
    Mosquito,
    Malaria,
    Bee,
}

impl BugKind {
    pub const ALL: [BugKind; 3] = [Self::Mosquito, Self::Malaria, Self::Bee];

    pub const fn score(self) -> i32 {
        match self {
            Self::Mosquito => SCORE_MOSQUITO,
            Self::Malaria => SCORE_MALARIA,
            Self::Bee => SCORE_BEE,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Mosquito => 0,
            Self::Malaria => 1,
            Self::Bee => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mosquito => "mosquito",
            Self::Malaria => "malaria",
            Self::Bee => "bee",
        }
    }
}

impl core::fmt::Display for BugKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bug {
    pub id: BugId,
    pub kind: BugKind,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// Play area in pixels. Bug positions live in `[0, extent - BUG_FOOTPRINT]`
/// on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Board {
    pub width: f64,
    pub height: f64,
}

impl Board {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn max_x(&self) -> f64 {
        (self.width - BUG_FOOTPRINT).max(0.0)
    }

    pub fn max_y(&self) -> f64 {
        (self.height - BUG_FOOTPRINT).max(0.0)
    }

    pub fn contains(&self, bug: &Bug) -> bool {
        (0.0..=self.max_x()).contains(&bug.x) && (0.0..=self.max_y()).contains(&bug.y)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    NotStarted,
    Running,
    Ended,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub time_left: u32,
    pub bugs: Vec<Bug>,
}
