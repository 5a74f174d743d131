use core::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::constants::WEIGHT_SUM_EPSILON;
use crate::error::{ParseDifficultyError, ProfileError};
use crate::sim::BugKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Dense index in `0..3`, stable across releases.
    pub fn index(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }

    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Self::Easy => &EASY,
            Self::Medium => &MEDIUM,
            Self::Hard => &HARD,
        }
    }

    /// Lenient parse for player-facing selection: anything unrecognized
    /// falls back to the mildest tier.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError::new(value)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speed magnitude bounds, in board pixels per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

/// Probability of each bug kind. Must sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindWeights {
    pub mosquito: f64,
    pub malaria: f64,
    pub bee: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyProfile {
    pub speed: SpeedRange,
    pub spawn_interval_ms: u32,
    pub weights: KindWeights,
}

pub const EASY: DifficultyProfile = DifficultyProfile {
    speed: SpeedRange { min: 0.5, max: 1.0 },
    spawn_interval_ms: 2_000,
    weights: KindWeights {
        mosquito: 0.7,
        malaria: 0.2,
        bee: 0.1,
    },
};

pub const MEDIUM: DifficultyProfile = DifficultyProfile {
    speed: SpeedRange { min: 0.8, max: 1.5 },
    spawn_interval_ms: 1_500,
    weights: KindWeights {
        mosquito: 0.6,
        malaria: 0.25,
        bee: 0.15,
    },
};

pub const HARD: DifficultyProfile = DifficultyProfile {
    speed: SpeedRange { min: 1.0, max: 2.0 },
    spawn_interval_ms: 1_000,
    weights: KindWeights {
        mosquito: 0.5,
        malaria: 0.3,
        bee: 0.2,
    },
};

impl DifficultyProfile {
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.spawn_interval_ms))
    }

    /// Weight bands in selection order. The last band absorbs rounding.
    pub fn bands(&self) -> [(BugKind, f64); 3] {
        [
            (BugKind::Mosquito, self.weights.mosquito),
            (BugKind::Malaria, self.weights.malaria),
            (BugKind::Bee, self.weights.bee),
        ]
    }

    pub fn weight_of(&self, kind: BugKind) -> f64 {
        match kind {
            BugKind::Mosquito => self.weights.mosquito,
            BugKind::Malaria => self.weights.malaria,
            BugKind::Bee => self.weights.bee,
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut sum = 0.0;
        for (kind, weight) in self.bands() {
            if weight < 0.0 {
                return Err(ProfileError::NegativeWeight { kind, weight });
            }
            sum += weight;
        }
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ProfileError::WeightsDoNotSumToOne { sum });
        }

        let SpeedRange { min, max } = self.speed;
        if !(min > 0.0 && min <= max) {
            return Err(ProfileError::InvalidSpeedRange { min, max });
        }

        if self.spawn_interval_ms == 0 {
            return Err(ProfileError::ZeroSpawnInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_validate() {
        for difficulty in Difficulty::ALL {
            difficulty
                .profile()
                .validate()
                .unwrap_or_else(|err| panic!("{difficulty} profile invalid: {err}"));
        }
    }

    #[test]
    fn harder_tiers_spawn_faster_and_move_faster() {
        assert!(HARD.spawn_interval() < MEDIUM.spawn_interval());
        assert!(MEDIUM.spawn_interval() < EASY.spawn_interval());
        assert!(HARD.speed.max > EASY.speed.max);
    }

    #[test]
    fn strict_parse_rejects_unknown_tier() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.value(), "extreme");
        assert!(err.to_string().contains("expected easy|medium|hard"));
    }

    #[test]
    fn lenient_parse_falls_back_to_easy() {
        assert_eq!(Difficulty::parse_or_default("medium"), Difficulty::Medium);
        assert_eq!(Difficulty::parse_or_default("HARD"), Difficulty::Easy);
        assert_eq!(Difficulty::parse_or_default(""), Difficulty::Easy);
    }

    #[test]
    fn validate_flags_bad_weights() {
        let mut profile = EASY;
        profile.weights.bee = 0.3;
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::WeightsDoNotSumToOne { .. })
        ));

        profile.weights = KindWeights {
            mosquito: 1.2,
            malaria: 0.0,
            bee: -0.2,
        };
        assert_eq!(
            profile.validate(),
            Err(ProfileError::NegativeWeight {
                kind: BugKind::Bee,
                weight: -0.2
            })
        );
    }

    #[test]
    fn validate_flags_bad_speed_and_interval() {
        let mut profile = MEDIUM;
        profile.speed = SpeedRange { min: 2.0, max: 1.0 };
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidSpeedRange { .. })
        ));

        profile.speed = MEDIUM.speed;
        profile.spawn_interval_ms = 0;
        assert_eq!(profile.validate(), Err(ProfileError::ZeroSpawnInterval));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert!(serde_json::from_str::<Difficulty>("\"nightmare\"").is_err());
    }
}
