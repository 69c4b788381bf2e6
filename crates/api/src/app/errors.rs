use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shelfscan_core::DomainError;
use shelfscan_infra::FetchError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, err.code(), err.to_string())
}

pub fn fetch_error_to_response(err: FetchError) -> axum::response::Response {
    if err.is_caller_error() {
        let message = match err {
            FetchError::MissingLocation => "URL parameter is required".to_string(),
            other => other.to_string(),
        };
        return json_error(StatusCode::BAD_REQUEST, "invalid_parameter", message);
    }

    tracing::warn!(error = %err, "catalog data unavailable");
    json_error(StatusCode::BAD_GATEWAY, "data_unavailable", err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
