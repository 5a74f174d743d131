use super::*;
use crate::constants::SESSION_SECONDS;
use crate::sim::BugKind;

fn running(difficulty: Difficulty) -> Session {
    let mut session = Session::new(difficulty, Board::default(), 0xDEAD_BEEF);
    session.start().expect("fresh session must start");
    session
}

fn plant(session: &mut Session, kind: BugKind) -> BugId {
    let id = BugId(session.next_id);
    session.next_id += 1;
    session.bugs.push(Bug {
        id,
        kind,
        x: 100.0,
        y: 100.0,
        vx: 1.0,
        vy: 1.0,
    });
    id
}

#[test]
fn new_session_waits_for_start() {
    let mut session = Session::new(Difficulty::Medium, Board::default(), 1);
    assert_eq!(session.phase(), SessionPhase::NotStarted);
    assert_eq!(session.time_left(), SESSION_SECONDS);
    assert_eq!(session.spawn_bug(), None);
    session.advance_frame();
    assert_eq!(session.tick_clock(), SessionPhase::NotStarted);
    assert_eq!(session.time_left(), SESSION_SECONDS);
    assert!(session.bugs().is_empty());
}

#[test]
fn start_resets_state_and_only_works_once() {
    let mut session = Session::new(Difficulty::Easy, Board::default(), 1);
    session.score = 42;
    session.time_left = 3;
    plant(&mut session, BugKind::Bee);

    session.start().unwrap();
    assert_eq!(session.phase(), SessionPhase::Running);
    assert_eq!(session.score(), 0);
    assert_eq!(session.time_left(), SESSION_SECONDS);
    assert!(session.bugs().is_empty());

    assert_eq!(session.start(), Err(SessionError::AlreadyStarted));
}

#[test]
fn countdown_reaches_zero_and_ends_session() {
    let mut session = running(Difficulty::Easy);
    for _ in 0..SESSION_SECONDS - 1 {
        assert_eq!(session.tick_clock(), SessionPhase::Running);
    }
    assert_eq!(session.time_left(), 1);
    plant(&mut session, BugKind::Mosquito);

    assert_eq!(session.tick_clock(), SessionPhase::Ended);
    assert_eq!(session.time_left(), 0);
    assert!(session.bugs().is_empty());

    assert_eq!(session.tick_clock(), SessionPhase::Ended);
    assert_eq!(session.time_left(), 0);
}

#[test]
fn penalty_click_at_zero_stays_at_zero() {
    let mut session = running(Difficulty::Hard);
    let bee = plant(&mut session, BugKind::Bee);
    assert_eq!(session.click(bee), Some(-5));
    assert_eq!(session.score(), 0);
}

#[test]
fn high_tier_click_at_zero_scores_three() {
    let mut session = running(Difficulty::Hard);
    let malaria = plant(&mut session, BugKind::Malaria);
    assert_eq!(session.click(malaria), Some(3));
    assert_eq!(session.score(), 3);
}

#[test]
fn penalty_only_drains_what_is_there() {
    let mut session = running(Difficulty::Medium);
    for _ in 0..3 {
        let id = plant(&mut session, BugKind::Mosquito);
        session.click(id);
    }
    assert_eq!(session.score(), 3);
    let malaria = plant(&mut session, BugKind::Malaria);
    session.click(malaria);
    assert_eq!(session.score(), 6);
    let bee = plant(&mut session, BugKind::Bee);
    session.click(bee);
    assert_eq!(session.score(), 1);
}

#[test]
fn second_click_on_same_bug_is_a_no_op() {
    let mut session = running(Difficulty::Easy);
    let id = plant(&mut session, BugKind::Malaria);
    let other = plant(&mut session, BugKind::Mosquito);

    assert_eq!(session.click(id), Some(3));
    assert_eq!(session.click(id), None);
    assert_eq!(session.score(), 3);
    assert_eq!(session.bugs().len(), 1);
    assert!(session.bug(other).is_some());
}

#[test]
fn clicks_outside_running_are_ignored() {
    let mut session = Session::new(Difficulty::Easy, Board::default(), 5);
    let early = plant(&mut session, BugKind::Malaria);
    assert_eq!(session.click(early), None);

    session.start().unwrap();
    let id = plant(&mut session, BugKind::Malaria);
    session.end();
    assert_eq!(session.click(id), None);
    assert_eq!(session.score(), 0);
}

#[test]
fn spawn_assigns_unique_ids_and_stays_in_bounds() {
    let mut session = running(Difficulty::Hard);
    let mut ids = Vec::new();
    for _ in 0..200 {
        ids.push(session.spawn_bug().expect("running session spawns"));
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
    assert_eq!(session.spawned(), 200);

    let board = session.board();
    for _ in 0..600 {
        session.advance_frame();
        assert!(session.bugs().iter().all(|bug| board.contains(bug)));
    }
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed| {
        let mut session = Session::new(Difficulty::Medium, Board::new(500.0, 400.0), seed);
        session.start().unwrap();
        for frame in 0..900 {
            session.advance_frame();
            if frame % 90 == 0 {
                session.spawn_bug();
            }
        }
        session.snapshot()
    };

    assert_eq!(run(77), run(77));
    assert_ne!(run(77), run(78));
}

#[test]
fn final_score_is_handed_out_exactly_once() {
    let mut session = running(Difficulty::Easy);
    let id = plant(&mut session, BugKind::Malaria);
    session.click(id);
    assert_eq!(session.take_final_score(), Err(SessionError::NotEnded));

    session.end();
    assert_eq!(session.take_final_score(), Ok(3));
    assert_eq!(
        session.take_final_score(),
        Err(SessionError::FinalScoreTaken)
    );
}

#[test]
fn ended_session_is_frozen() {
    let mut session = running(Difficulty::Hard);
    session.spawn_bug();
    session.end();
    assert_eq!(session.phase(), SessionPhase::Ended);
    assert!(session.bugs().is_empty());
    assert_eq!(session.spawn_bug(), None);
    assert_eq!(session.start(), Err(SessionError::AlreadyStarted));

    session.end();
    assert_eq!(session.phase(), SessionPhase::Ended);
}

#[test]
fn snapshot_serializes_for_rendering() {
    let mut session = running(Difficulty::Medium);
    session.spawn_bug();
    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["phase"], "running");
    assert_eq!(json["difficulty"], "medium");
    assert_eq!(json["time_left"], SESSION_SECONDS);
    assert_eq!(json["bugs"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["bugs"][0]["id"], 0);
}
