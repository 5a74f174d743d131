pub mod constants;
pub mod difficulty;
pub mod error;
pub mod rng;
pub mod sim;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::{ParseDifficultyError, ProfileError, SessionError};
pub use sim::{
    run_headless, Board, Bug, BugId, BugKind, HeadlessSummary, Session, SessionPhase,
    SessionSnapshot,
};
