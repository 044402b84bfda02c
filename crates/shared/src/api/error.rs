use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deadpool_sqlite::{InteractError, PoolError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error type for routes that have no failure modes of their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Nothing {}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum ServerError<T> {
    /// A route specific error carrying the status it should be reported with
    Inner { code: StatusCode, inner: T },
    /// Anything else. The message is logged but never sent to the client
    Other { message: String },
}

#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}

impl<T> ServerError<T> {
    pub fn code(&self) -> StatusCode {
        match self {
            ServerError::Inner { code, .. } => *code,
            ServerError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Inner { inner, .. } => write!(f, "{inner}"),
            ServerError::Other { message } => write!(f, "{message}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for ServerError<T> {}

impl<T: fmt::Display> IntoResponse for ServerError<T> {
    fn into_response(self) -> Response {
        let code = self.code();
        let error = match self {
            ServerError::Inner { inner, .. } => inner.to_string(),
            ServerError::Other { message } => {
                error!(%code, detail = %message, "Request failed");
                "Internal server error".to_string()
            },
        };
        (code, Json(ErrorResponse { error })).into_response()
    }
}

impl<T> From<rusqlite::Error> for ServerError<T> {
    fn from(err: rusqlite::Error) -> Self {
        other_error!("rusqlite error: {err:?}")
    }
}

impl<T> From<InteractError> for ServerError<T> {
    fn from(err: InteractError) -> Self {
        other_error!("deadpool interact error: {err:?}")
    }
}

impl<T> From<PoolError> for ServerError<T> {
    fn from(err: PoolError) -> Self {
        other_error!("deadpool pool error: {err:?}")
    }
}
