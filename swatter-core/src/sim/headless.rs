use serde::Serialize;

use super::{BugId, BugKind, Session, SessionPhase};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HeadlessSummary {
    pub final_score: u32,
    pub frames: u32,
    pub spawned: u32,
    pub clicks: u32,
    /// Successful clicks per kind, indexed by `BugKind::index`.
    pub clicks_by_kind: [u32; 3],
}

impl HeadlessSummary {
    pub fn clicks_on(&self, kind: BugKind) -> u32 {
        self.clicks_by_kind[kind.index()]
    }
}

/// Whole frames between two events `interval_ms` apart at the given frame rate.
/// Rounds to the nearest frame and never returns zero.
pub fn frames_between(interval_ms: u32, frames_per_unit: u32) -> u32 {
    let frames = (u64::from(interval_ms) * u64::from(frames_per_unit) + 500) / 1_000;
    frames.clamp(1, u64::from(u32::MAX)) as u32
}

/// Plays a session to the end on a fixed frame step.
///
/// Each frame advances movement, fires a spawn every profile interval, asks
/// `on_frame` for at most one click, then ticks the countdown once every
/// `frames_per_unit` frames. A `NotStarted` session is started first; an
/// already-ended one returns immediately.
pub fn run_headless<F>(
    session: &mut Session,
    frames_per_unit: u32,
    mut on_frame: F,
) -> HeadlessSummary
where
    F: FnMut(&Session, u32) -> Option<BugId>,
{
    let frames_per_unit = frames_per_unit.max(1);
    if session.phase() == SessionPhase::NotStarted {
        session.start().ok();
    }

    let spawn_every = frames_between(session.profile().spawn_interval_ms, frames_per_unit);
    let mut summary = HeadlessSummary::default();

    while session.is_running() {
        summary.frames += 1;
        let frame = summary.frames;

        session.advance_frame();
        if frame % spawn_every == 0 && session.spawn_bug().is_some() {
            summary.spawned += 1;
        }

        if let Some(id) = on_frame(&*session, frame) {
            let kind = session.bug(id).map(|bug| bug.kind);
            if let (Some(kind), Some(_)) = (kind, session.click(id)) {
                summary.clicks += 1;
                summary.clicks_by_kind[kind.index()] += 1;
            }
        }

        if frame % frames_per_unit == 0 {
            session.tick_clock();
        }
    }

    summary.final_score = session.score();
    summary
}
