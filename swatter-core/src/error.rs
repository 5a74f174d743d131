use core::fmt;

use crate::sim::BugKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDifficultyError {
    value: String,
}

impl ParseDifficultyError {
    pub(crate) fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown difficulty: {} (expected easy|medium|hard)",
            self.value
        )
    }
}

impl std::error::Error for ParseDifficultyError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProfileError {
    NegativeWeight { kind: BugKind, weight: f64 },
    WeightsDoNotSumToOne { sum: f64 },
    InvalidSpeedRange { min: f64, max: f64 },
    ZeroSpawnInterval,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeWeight { kind, weight } => {
                write!(f, "weight for {kind} is negative: {weight}")
            }
            Self::WeightsDoNotSumToOne { sum } => {
                write!(f, "kind weights must sum to 1, got {sum}")
            }
            Self::InvalidSpeedRange { min, max } => {
                write!(f, "speed range must satisfy 0 < min <= max, got {min}..{max}")
            }
            Self::ZeroSpawnInterval => write!(f, "spawn interval must be non-zero"),
        }
    }
}

impl std::error::Error for ProfileError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionError {
    AlreadyStarted,
    NotEnded,
    FinalScoreTaken,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "session has already been started"),
            Self::NotEnded => write!(f, "session has not ended yet"),
            Self::FinalScoreTaken => write!(f, "final score was already handed off"),
        }
    }
}

impl std::error::Error for SessionError {}
