
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
    time::{SystemTime, UNIX_EPOCH},
};

use serde::Serialize;
use swatter_core::Difficulty;

pub const LEADERBOARD_CAPACITY: usize = 100;
pub const PUBLIC_QUERY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: i64,
    /// Unix milliseconds at submission.
    pub timestamp: u64,
    /// Submission order; breaks ties between same-millisecond entries.
    #[serde(skip)]
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub accepted: bool,
    /// 1-based position after trimming; `None` when the entry did not make the cut.
    pub rank: Option<usize>,
}

/// In-memory per-difficulty leaderboards.
///
/// Each tier sits behind its own lock, so submissions to different tiers
/// never contend and sort + truncate is atomic within a tier. Nothing is
/// persisted; a restart starts from empty boards.
pub struct LeaderboardStore {
    tiers: [Mutex<Vec<RankingEntry>>; 3],
    capacity: usize,
    next_seq: AtomicU64,
}

impl LeaderboardStore {
    pub fn new() -> Self {
        Self::with_capacity(LEADERBOARD_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tiers: Default::default(),
            capacity,
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Sort + truncate never leaves a tier half-updated, so a poisoned lock
    // still guards a valid board.
    fn tier(&self, difficulty: Difficulty) -> MutexGuard<'_, Vec<RankingEntry>> {
        self.tiers[difficulty.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(
        &self,
        difficulty: Difficulty,
        name: impl Into<String>,
        score: i64,
    ) -> SubmitReceipt {
        self.submit_at(difficulty, name, score, now_unix_ms())
    }

    pub fn submit_at(
        &self,
        difficulty: Difficulty,
        name: impl Into<String>,
        score: i64,
        timestamp: u64,
    ) -> SubmitReceipt {
        let mut tier = self.tier(difficulty);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        tier.push(RankingEntry {
            name: name.into(),
            score,
            timestamp,
            seq,
        });

        tier.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.timestamp.cmp(&a.timestamp))
                .then_with(|| b.seq.cmp(&a.seq))
        });
        tier.truncate(self.capacity);

        let rank = tier
            .iter()
            .position(|entry| entry.seq == seq)
            .map(|index| index + 1);
        SubmitReceipt {
            accepted: true,
            rank,
        }
    }

    pub fn query(&self, difficulty: Difficulty, limit: usize) -> Vec<RankingEntry> {
        self.tier(difficulty).iter().take(limit).cloned().collect()
    }

    pub fn len(&self, difficulty: Difficulty) -> usize {
        self.tier(difficulty).len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        Difficulty::ALL
            .into_iter()
            .all(|difficulty| self.tier(difficulty).is_empty())
    }

    /// Empties all three tiers.
    pub fn reset(&self) -> bool {
        for difficulty in Difficulty::ALL {
            self.tier(difficulty).clear();
        }
        true
    }
}

impl Default for LeaderboardStore {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis().min(u128::from(u64::MAX)) as u64)
        .unwrap_or(0)
}
