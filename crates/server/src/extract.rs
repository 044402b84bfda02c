use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Form, Json,
};
use mime::Mime;
use serde::de::DeserializeOwned;
use shared::api::error::ErrorResponse;
use tracing::debug;

/// Request body that may be sent either as JSON or as an urlencoded form.
/// The landing page posts forms, API clients usually send JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Mime>().ok())
        .is_some_and(|m| {
            m.type_() == mime::APPLICATION
                && (m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
        })
}

fn reject<R: std::fmt::Display>(rejection: R) -> (StatusCode, Json<ErrorResponse>) {
    debug!(%rejection, "Rejected request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.to_string(),
        }),
    )
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(req.headers()) {
            let Json(value) = Json::<T>::from_request(req, state).await.map_err(reject)?;
            Ok(Payload(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(reject)?;
            Ok(Payload(value))
        }
    }
}
