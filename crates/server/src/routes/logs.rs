use axum::{
    extract::{Path, Query},
    Json,
};
use shared::{
    api::{
        error::ServerError,
        payloads::{LogQuery, LogResponse},
        response_errors::FetchLogError,
    },
    model::Exercise,
};
use tracing::instrument;

use super::lookup_user;
use crate::db::DatabaseConnection;

/// The query string is taken as raw pairs so repeated or odd keys can't
/// reject the request
#[instrument(skip(conn))]
pub async fn fetch_log(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<LogResponse>, ServerError<FetchLogError>> {
    let filter = LogQuery::from_pairs(pairs).filter();

    let response = conn
        .interact(move |conn| {
            let user = lookup_user(conn, &id)?.ok_or(FetchLogError::UserNotFound)?;
            let exercises = Exercise::fetch_log(conn, &user.username, &filter)?;
            Ok::<_, ServerError<FetchLogError>>(LogResponse::new(user, &filter, exercises))
        })
        .await??;

    Ok(Json(response))
}
