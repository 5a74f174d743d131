use std::{env, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use swatter_core::Difficulty;

use crate::sink::{FinalScore, ScoreSink, SubmitFuture};

pub const API_URL_ENV: &str = "SWATTER_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3001";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One row of `GET /api/rank/{difficulty}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RankedScore {
    pub name: String,
    pub score: i64,
    /// Unix milliseconds at submission.
    pub timestamp: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct SubmitResult {
    pub success: bool,
    #[serde(default)]
    pub rank: Option<usize>,
}

#[derive(Deserialize)]
struct ResetBody {
    success: bool,
}

/// HTTP client for the leaderboard API.
///
/// Submission and reset report failures to the caller. Ranking reads never
/// fail: any error is logged and the ranking comes back empty.
#[derive(Clone, Debug)]
pub struct LeaderboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl LeaderboardClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            bail!("leaderboard base URL is empty");
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// Reads the base URL from `SWATTER_API_URL`, falling back to the local
    /// default.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn submit_score(&self, score: &FinalScore) -> Result<SubmitResult> {
        let response = self
            .http
            .post(self.url("/api/score"))
            .json(score)
            .send()
            .await
            .with_context(|| format!("POST {}/api/score failed", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("POST /api/score returned {status}: {body}"));
        }
        response
            .json::<SubmitResult>()
            .await
            .context("invalid /api/score response body")
    }

    pub async fn fetch_rankings(&self, difficulty: Difficulty) -> Vec<RankedScore> {
        match self.try_fetch_rankings(difficulty).await {
            Ok(rankings) => rankings,
            Err(err) => {
                tracing::warn!(
                    difficulty = %difficulty,
                    "ranking fetch failed, showing empty list: {err:#}"
                );
                Vec::new()
            }
        }
    }

    async fn try_fetch_rankings(&self, difficulty: Difficulty) -> Result<Vec<RankedScore>> {
        let rankings = self
            .http
            .get(self.url(&format!("/api/rank/{difficulty}")))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<RankedScore>>()
            .await?;
        Ok(rankings)
    }

    pub async fn reset(&self) -> Result<bool> {
        let body = self
            .http
            .delete(self.url("/api/reset"))
            .send()
            .await
            .with_context(|| format!("DELETE {}/api/reset failed", self.base_url))?
            .error_for_status()?
            .json::<ResetBody>()
            .await
            .context("invalid /api/reset response body")?;
        Ok(body.success)
    }
}

impl ScoreSink for LeaderboardClient {
    fn submit<'a>(&'a self, score: &'a FinalScore) -> SubmitFuture<'a> {
        Box::pin(async move {
            let result = self.submit_score(score).await?;
            if !result.success {
                bail!("leaderboard rejected the score");
            }
            tracing::debug!(rank = ?result.rank, "leaderboard accepted score");
            Ok(())
        })
    }
}
