use swatter_core::constants::{FRAMES_PER_SECOND, SESSION_SECONDS};
use swatter_core::{run_headless, Board, BugKind, Difficulty, Session, SessionPhase};

fn greedy(session: &Session, frame: u32) -> Option<swatter_core::BugId> {
    if frame % 20 != 0 {
        return None;
    }
    session
        .bugs()
        .iter()
        .filter(|bug| bug.kind != BugKind::Bee)
        .max_by_key(|bug| bug.kind.score())
        .map(|bug| bug.id)
}

#[test]
fn hard_session_without_clicks_ends_empty_with_zero_score() {
    let mut session = Session::new(Difficulty::Hard, Board::default(), 0xDEAD_BEEF);
    let summary = run_headless(&mut session, FRAMES_PER_SECOND, |_, _| None);

    assert_eq!(session.phase(), SessionPhase::Ended);
    assert_eq!(session.time_left(), 0);
    assert!(session.bugs().is_empty());
    assert_eq!(summary.final_score, 0);
    assert_eq!(summary.spawned, SESSION_SECONDS);
    assert_eq!(session.take_final_score(), Ok(0));
}

#[test]
fn replay_is_deterministic_per_seed() {
    let play = |seed| {
        let mut session = Session::new(Difficulty::Medium, Board::new(1024.0, 600.0), seed);
        let summary = run_headless(&mut session, FRAMES_PER_SECOND, greedy);
        (summary, session.rng_state())
    };

    assert_eq!(play(0x0BAD_5EED), play(0x0BAD_5EED));
}

#[test]
fn greedy_player_never_touches_bees() {
    for difficulty in Difficulty::ALL {
        let mut session = Session::new(difficulty, Board::default(), 42);
        let summary = run_headless(&mut session, FRAMES_PER_SECOND, greedy);
        assert_eq!(summary.clicks_on(BugKind::Bee), 0, "{difficulty}");
        assert!(summary.final_score > 0, "{difficulty}");
    }
}

#[test]
fn lower_frame_rate_keeps_session_length() {
    let mut session = Session::new(Difficulty::Easy, Board::default(), 8);
    let summary = run_headless(&mut session, 30, |_, _| None);
    assert_eq!(summary.frames, SESSION_SECONDS * 30);
    assert_eq!(summary.spawned, SESSION_SECONDS / 2);
}
