use std::{
    future::Future,
    pin::Pin,
    sync::{Mutex, PoisonError},
};

use anyhow::Result;
use serde::Serialize;
use swatter_core::Difficulty;

/// The hand-off from a finished session to the leaderboard. Serializes to the
/// `POST /api/score` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FinalScore {
    pub name: String,
    pub score: u32,
    pub difficulty: Difficulty,
}

pub type SubmitFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Receives a session's final score exactly once per session.
///
/// Implementations do not retry; a returned error is logged by the
/// controller and gameplay carries on.
pub trait ScoreSink: Send + Sync {
    fn submit<'a>(&'a self, score: &'a FinalScore) -> SubmitFuture<'a>;
}

/// Logs the score and drops it.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl ScoreSink for LogSink {
    fn submit<'a>(&'a self, score: &'a FinalScore) -> SubmitFuture<'a> {
        tracing::info!(
            name = %score.name,
            difficulty = %score.difficulty,
            score = score.score,
            "final score"
        );
        Box::pin(async { Ok(()) })
    }
}

/// Keeps every submitted score in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    submitted: Mutex<Vec<FinalScore>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<FinalScore> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ScoreSink for MemorySink {
    fn submit<'a>(&'a self, score: &'a FinalScore) -> SubmitFuture<'a> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(score.clone());
        Box::pin(async { Ok(()) })
    }
}
