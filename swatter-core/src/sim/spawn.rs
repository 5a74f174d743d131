use core::f64::consts::TAU;

use super::{Board, Bug, BugId, BugKind};
use crate::difficulty::DifficultyProfile;
use crate::rng::SeededRng;

/// Maps a uniform draw in `[0, 1)` onto the profile's cumulative kind bands.
///
/// Bands are walked in fixed order (mosquito, malaria, bee). A draw at or
/// past the accumulated sum, which rounding can produce, lands in the last
/// band so every draw is classified.
pub fn pick_kind(profile: &DifficultyProfile, draw: f64) -> BugKind {
    let bands = profile.bands();
    let mut cumulative = 0.0;
    for (kind, weight) in bands {
        cumulative += weight;
        if draw < cumulative {
            return kind;
        }
    }
    bands[bands.len() - 1].0
}

pub(super) fn roll_bug(
    id: BugId,
    profile: &DifficultyProfile,
    board: Board,
    rng: &mut SeededRng,
) -> Bug {
    let kind = pick_kind(profile, rng.next_unit());
    let speed = rng.next_range_f64(profile.speed.min, profile.speed.max);
    let heading = rng.next_unit() * TAU;

    Bug {
        id,
        kind,
        x: rng.next_unit() * board.max_x(),
        y: rng.next_unit() * board.max_y(),
        vx: heading.cos() * speed,
        vy: heading.sin() * speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{Difficulty, KindWeights, EASY, HARD};

    #[test]
    fn band_edges_follow_cumulative_weights() {
        assert_eq!(pick_kind(&HARD, 0.0), BugKind::Mosquito);
        assert_eq!(pick_kind(&HARD, 0.499), BugKind::Mosquito);
        assert_eq!(pick_kind(&HARD, 0.5), BugKind::Malaria);
        assert_eq!(pick_kind(&HARD, 0.79), BugKind::Malaria);
        assert_eq!(pick_kind(&HARD, 0.81), BugKind::Bee);
        assert_eq!(pick_kind(&HARD, 0.999_999), BugKind::Bee);
    }

    #[test]
    fn draw_past_cumulative_sum_falls_into_last_band() {
        // 0.7 + 0.2 + 0.1 accumulates to just under 1.0 in f64.
        let sum: f64 = EASY.bands().iter().map(|(_, w)| w).sum();
        assert!(sum < 1.0);
        assert_eq!(pick_kind(&EASY, sum), BugKind::Bee);
        assert_eq!(pick_kind(&EASY, 1.0), BugKind::Bee);

        let mut short = EASY;
        short.weights = KindWeights {
            mosquito: 0.4,
            malaria: 0.4,
            bee: 0.1,
        };
        assert_eq!(pick_kind(&short, 0.95), BugKind::Bee);
    }

    #[test]
    fn zero_weight_band_is_never_chosen() {
        let mut profile = EASY;
        profile.weights = KindWeights {
            mosquito: 0.5,
            malaria: 0.0,
            bee: 0.5,
        };
        let mut rng = SeededRng::new(3);
        for _ in 0..5_000 {
            assert_ne!(pick_kind(&profile, rng.next_unit()), BugKind::Malaria);
        }
    }

    #[test]
    fn seeded_distribution_converges_to_weights() {
        const SAMPLES: usize = 40_000;
        for difficulty in Difficulty::ALL {
            let profile = difficulty.profile();
            let mut rng = SeededRng::new(0xC0FF_EE00 ^ difficulty.index() as u32);
            let mut counts = [0usize; 3];
            for _ in 0..SAMPLES {
                counts[pick_kind(profile, rng.next_unit()).index()] += 1;
            }
            for kind in BugKind::ALL {
                let observed = counts[kind.index()] as f64 / SAMPLES as f64;
                let expected = profile.weight_of(kind);
                assert!(
                    (observed - expected).abs() < 0.015,
                    "{difficulty}/{kind}: observed {observed}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn rolled_bug_is_inside_board_with_profile_speed() {
        let board = Board::new(640.0, 480.0);
        let mut rng = SeededRng::new(11);
        for n in 0..2_000 {
            let bug = roll_bug(BugId(n), &HARD, board, &mut rng);
            assert!(board.contains(&bug));
            let speed = bug.vx.hypot(bug.vy);
            assert!(
                speed >= HARD.speed.min - 1e-9 && speed <= HARD.speed.max + 1e-9,
                "speed {speed} outside profile range"
            );
        }
    }
}
