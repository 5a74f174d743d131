use actix_web::{error::InternalError, http::StatusCode, web, HttpResponse};

pub(crate) fn json_error_with_code(
    status: StatusCode,
    message: impl Into<String>,
    error_code: Option<&str>,
) -> HttpResponse {
    let mut body = serde_json::json!({
        "success": false,
        "error": message.into(),
    });
    if let Some(code) = error_code {
        body["error_code"] = serde_json::Value::String(code.to_string());
    }
    HttpResponse::build(status).json(body)
}

/// JSON extractor config that reports malformed bodies (including an
/// unknown `difficulty`) in the same error shape as the handlers.
pub(crate) fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = json_error_with_code(
                StatusCode::BAD_REQUEST,
                format!("invalid request body: {err}"),
                Some("invalid_body"),
            );
            InternalError::from_response(err, response).into()
        })
}
