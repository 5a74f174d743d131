use actix_web::{
    http::StatusCode,
    web::{Data, Json, Path},
    HttpResponse, Responder,
};
use swatter_core::Difficulty;

use crate::response::json_error_with_code;
use crate::store::{RankingEntry, PUBLIC_QUERY_LIMIT};
use crate::types::{
    HealthResponse, ResetResponse, SubmitScoreRequest, SubmitScoreResponse, TierCounts,
};
use crate::AppState;

pub(crate) const NAME_MAX_CHARS: usize = 20;

/// Returns the trimmed name, or `(error_message, error_code)`.
pub(crate) fn validate_name(raw: &str) -> Result<String, (String, &'static str)> {
    let name = raw.trim();
    let chars = name.chars().count();
    if chars == 0 {
        return Err(("name must not be empty".to_string(), "invalid_name"));
    }
    if chars > NAME_MAX_CHARS {
        return Err((
            format!("name must be at most {NAME_MAX_CHARS} characters (got {chars})"),
            "invalid_name",
        ));
    }
    Ok(name.to_string())
}

pub(crate) async fn health(state: Data<AppState>) -> impl Responder {
    let leaderboard = &state.leaderboard;
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: "swatter-api",
        capacity: leaderboard.capacity(),
        entries: TierCounts {
            easy: leaderboard.len(Difficulty::Easy),
            medium: leaderboard.len(Difficulty::Medium),
            hard: leaderboard.len(Difficulty::Hard),
        },
    })
}

// The score is taken as reported; there is no plausibility check.
pub(crate) async fn submit_score(
    state: Data<AppState>,
    body: Json<SubmitScoreRequest>,
) -> impl Responder {
    let req = body.into_inner();
    let name = match validate_name(&req.name) {
        Ok(name) => name,
        Err((msg, code)) => return json_error_with_code(StatusCode::BAD_REQUEST, msg, Some(code)),
    };

    let receipt = state.leaderboard.submit(req.difficulty, name, req.score);
    tracing::info!(
        difficulty = %req.difficulty,
        score = req.score,
        rank = ?receipt.rank,
        "score submitted"
    );

    HttpResponse::Ok().json(SubmitScoreResponse {
        success: receipt.accepted,
        rank: receipt.rank,
    })
}

pub(crate) async fn get_rankings(state: Data<AppState>, path: Path<String>) -> impl Responder {
    let raw = path.into_inner();
    match raw.parse::<Difficulty>() {
        Ok(difficulty) => {
            HttpResponse::Ok().json(state.leaderboard.query(difficulty, PUBLIC_QUERY_LIMIT))
        }
        Err(err) => {
            tracing::debug!("{err}; returning empty ranking");
            HttpResponse::Ok().json(Vec::<RankingEntry>::new())
        }
    }
}

pub(crate) async fn reset(state: Data<AppState>) -> impl Responder {
    let success = state.leaderboard.reset();
    tracing::warn!("all leaderboards reset");
    HttpResponse::Ok().json(ResetResponse { success })
}
