use crate::services::bug_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// A lightweight wrapper for request failures that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::not_found(err.to_string()),
            StoreError::Required { .. } | StoreError::InvalidChoice { .. } => {
                AppError::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            StoreError::Sqlx(inner) => {
                tracing::error!("storage failure: {}", inner);
                AppError::internal("internal server error")
            }
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        tracing::error!("template rendering failed: {:?}", err);
        AppError::internal("internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        assert_eq!(
            AppError::from(StoreError::NotFound(9)).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::InvalidChoice { field: "status" }).status,
            StatusCode::BAD_REQUEST
        );

        let internal = AppError::from(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!internal.message.contains("pool"));
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = AppError::from(StoreError::NotFound(7));
        assert_eq!(err.message, "bug 7 not found");
    }
}
