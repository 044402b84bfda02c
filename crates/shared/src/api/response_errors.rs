use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::error::ServerError;

/// Declares a route error enum where each variant carries the status code it
/// is reported with
macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[error($($msg:tt)*)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error($($msg)*)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = match &inner {
                    $( $name::$variant { .. } => $variant_code, )*
                };
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(CreateUserError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("username is required")]
    UsernameRequired,
});

response_error!(AddExerciseError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("description and duration are required")]
    MissingFields,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("duration must be an integer, got {value:?}")]
    InvalidDuration { value: String },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("date must be YYYY-MM-DD or an RFC 3339 timestamp, got {value:?}")]
    InvalidDate { value: String },
    #[code(StatusCode::NOT_FOUND)]
    #[error("unknown user id")]
    UserNotFound,
});

response_error!(FetchLogError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("unknown user id")]
    UserNotFound,
});
