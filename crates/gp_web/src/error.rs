use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("A load cycle is already running")]
    Busy,

    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Busy => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<gp_core::Error> for ApiError {
    fn from(e: gp_core::Error) -> Self {
        match e {
            gp_core::Error::InvalidValue(msg) => ApiError::BadRequest(msg),
            gp_core::Error::Superseded(_) => ApiError::Busy,
            other => ApiError::Upstream(other.user_message()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
