use serde::{Deserialize, Serialize};
use swatter_core::Difficulty;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SubmitScoreRequest {
    pub(crate) name: String,
    pub(crate) score: i64,
    pub(crate) difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitScoreResponse {
    pub(crate) success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rank: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResetResponse {
    pub(crate) success: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct TierCounts {
    pub(crate) easy: usize,
    pub(crate) medium: usize,
    pub(crate) hard: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) service: &'static str,
    pub(crate) capacity: usize,
    pub(crate) entries: TierCounts,
}
