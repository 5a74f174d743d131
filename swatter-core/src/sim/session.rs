use super::physics::step_bug;
use super::spawn::roll_bug;
use super::{Board, Bug, BugId, SessionPhase, SessionSnapshot};
use crate::constants::SESSION_SECONDS;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::error::SessionError;
use crate::rng::SeededRng;

#[cfg(test)]
mod tests;

/// One play-through: NotStarted -> Running -> Ended.
///
/// The session owns every live bug and the running score. Callers drive it
/// with three independent clocks (`advance_frame`, `spawn_bug`, `tick_clock`)
/// plus `click`; none of them does anything outside `Running`.
#[derive(Clone, Debug)]
pub struct Session {
    phase: SessionPhase,
    difficulty: Difficulty,
    board: Board,
    score: u32,
    time_left: u32,
    bugs: Vec<Bug>,
    next_id: u32,
    spawned: u32,
    rng: SeededRng,
    final_score_taken: bool,
}

impl Session {
    pub fn new(difficulty: Difficulty, board: Board, seed: u32) -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            difficulty,
            board,
            score: 0,
            time_left: SESSION_SECONDS,
            bugs: Vec::new(),
            next_id: 0,
            spawned: 0,
            rng: SeededRng::new(seed),
            final_score_taken: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn bugs(&self) -> &[Bug] {
        &self.bugs
    }

    pub fn bug(&self, id: BugId) -> Option<&Bug> {
        self.bugs.iter().find(|bug| bug.id == id)
    }

    /// Total bugs spawned since `start`.
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        self.phase = SessionPhase::Running;
        self.score = 0;
        self.time_left = SESSION_SECONDS;
        self.bugs.clear();
        self.spawned = 0;
        Ok(())
    }

    /// One elapsed time unit of the countdown. Reaching zero ends the session.
    pub fn tick_clock(&mut self) -> SessionPhase {
        if self.phase == SessionPhase::Running {
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                self.end();
            }
        }
        self.phase
    }

    /// Movement pass for one animation frame.
    pub fn advance_frame(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        let board = self.board;
        for bug in &mut self.bugs {
            step_bug(bug, board);
        }
    }

    pub fn spawn_bug(&mut self) -> Option<BugId> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let id = BugId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let bug = roll_bug(id, self.difficulty.profile(), self.board, &mut self.rng);
        self.bugs.push(bug);
        self.spawned += 1;
        Some(id)
    }

    /// Removes the bug and applies its value, flooring the score at zero.
    ///
    /// Returns the kind's score delta, or `None` when the click did nothing
    /// (wrong phase, or the bug is already gone).
    pub fn click(&mut self, id: BugId) -> Option<i32> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let index = self.bugs.iter().position(|bug| bug.id == id)?;
        let bug = self.bugs.remove(index);
        let delta = bug.kind.score();
        self.score = if delta >= 0 {
            self.score.saturating_add(delta.unsigned_abs())
        } else {
            self.score.saturating_sub(delta.unsigned_abs())
        };
        Some(delta)
    }

    /// Forces Running -> Ended and clears the board. No-op in other phases.
    pub fn end(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.phase = SessionPhase::Ended;
        self.bugs.clear();
    }

    /// Hands out the final score. Succeeds once, and only after the session ended.
    pub fn take_final_score(&mut self) -> Result<u32, SessionError> {
        if self.phase != SessionPhase::Ended {
            return Err(SessionError::NotEnded);
        }
        if self.final_score_taken {
            return Err(SessionError::FinalScoreTaken);
        }
        self.final_score_taken = true;
        Ok(self.score)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            score: self.score,
            time_left: self.time_left,
            bugs: self.bugs.clone(),
        }
    }
}
