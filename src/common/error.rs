use axum::http::StatusCode;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

// https://github.com/tokio-rs/axum/blob/main/examples/anyhow-error-response/src/main.rs
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError(inner) = self;
        tracing::error!("request failed: {:#}", inner);
        tracing::debug!("stacktrace: {}", inner.backtrace());

        let body = Json(json!({
            "error": "Internal Server Error",
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// Lets handlers use `?` on anything that converts into `anyhow::Error` (sqlx errors included).
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}
