use axum::{
    Json,
    extract::{
        State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

use crate::config::ErrorMode;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(DbErr),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            // SQLite reports primary-key clashes (code 1555) with the same text as
            // unique violations, but `sql_err` only recognises code 2067.
            _ if err.to_string().contains("UNIQUE constraint failed") => {
                Self::Conflict(err.to_string())
            },
            _ => Self::Internal(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Raw failure text attached to every error response, consumed by
/// [`legacy_errors`] when the service runs in [`ErrorMode::Legacy`].
#[derive(Clone, Debug)]
pub struct FailureText(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let raw = self.to_string();

        let message = match &self {
            AppError::Internal(err) => {
                tracing::error!(error = %err, "database operation failed");
                "internal server error".to_string()
            },
            other => {
                tracing::debug!(status = %status, error = %other, "request failed");
                raw.clone()
            },
        };

        let mut resp = (status, Json(json!({ "error": message }))).into_response();
        resp.extensions_mut().insert(FailureText(raw));
        resp
    }
}

/// Collapses every failed response into `404` with the raw error text as a
/// plain-text body. Leaves successful responses alone.
pub async fn legacy_errors(State(mode): State<ErrorMode>, mut resp: Response) -> Response {
    if mode != ErrorMode::Legacy {
        return resp;
    }
    match resp.extensions_mut().remove::<FailureText>() {
        Some(FailureText(text)) => (StatusCode::NOT_FOUND, text).into_response(),
        None => resp,
    }
}

pub type AppResult<T> = Result<T, AppError>;
