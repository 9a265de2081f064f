use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Failure taxonomy shared by every handler. Each variant carries the exact
/// message the client sees in the `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is missing or empty.
    #[error("{0}")]
    MissingFields(&'static str),

    /// Registration collided with an existing email or username.
    #[error("Email or Username already exists!")]
    DuplicateUser,

    /// Login email does not match any user.
    #[error("Invalid email or user does not exist!")]
    UserNotFound,

    /// Login password does not match the stored hash.
    #[error("Incorrect password!")]
    IncorrectPassword,

    /// The store failed: connectivity, query, or a constraint violation not
    /// caught by the application-level checks.
    #[error("Database error: {0}")]
    Store(sqlx::Error),

    /// Anything else that escaped the paths above.
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_) | ApiError::DuplicateUser => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::IncorrectPassword => StatusCode::UNAUTHORIZED,
            ApiError::Store(_) | ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            ApiError::Store(e) => {
                error!(error = %e, "store error");
            }
            ApiError::Unexpected(e) => {
                error!(error = %e, "unexpected error");
            }
            ApiError::IncorrectPassword => {
                warn!("login attempt with incorrect password");
            }
            ApiError::DuplicateUser => {
                warn!("registration collided with an existing user");
            }
            _ => {
                debug!(error = %self, "request rejected");
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // A concurrent duplicate registration slips past the check-then-insert
        // lookup; the unique indexes on users.email / users.username are what
        // actually hold, so report their violation as the same conflict.
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::DuplicateUser,
            _ => ApiError::Store(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::MissingFields("Email and Password are required!").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::DuplicateUser.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::IncorrectPassword.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Store(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Unexpected(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn response_body_is_error_object() {
        let response = ApiError::IncorrectPassword.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json, json!({ "error": "Incorrect password!" }));
    }

    #[test]
    fn store_errors_keep_their_detail() {
        let err = ApiError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, ApiError::Store(_)));
        assert!(err.to_string().starts_with("Database error: "));
    }

    #[derive(Debug)]
    struct FakeUniqueViolation;

    impl fmt::Display for FakeUniqueViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"users_email_key\"")
        }
    }

    impl StdError for FakeUniqueViolation {}

    impl sqlx::error::DatabaseError for FakeUniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"users_email_key\""
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some("23505".into())
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn unique_violation_maps_to_duplicate_user() {
        let err = ApiError::from(sqlx::Error::Database(Box::new(FakeUniqueViolation)));
        assert!(matches!(err, ApiError::DuplicateUser));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Email or Username already exists!");
    }
}
