use axum::Json;
use shared::{
    api::{
        error::{Nothing, ServerError},
        payloads::CreateUserRequest,
        response_errors::CreateUserError,
    },
    model::User,
};
use tracing::{debug, instrument};

use crate::{db::DatabaseConnection, extract::Payload};

#[instrument(skip(conn))]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    Payload(req): Payload<CreateUserRequest>,
) -> Result<Json<User>, ServerError<CreateUserError>> {
    let username = req.validate()?;

    let user = conn
        .interact(move |conn| {
            let user = User::fetch_or_create(conn, username)?;
            Ok::<_, ServerError<CreateUserError>>(user)
        })
        .await??;

    debug!(id = %user.id, "Resolved user");
    Ok(Json(user))
}

#[instrument(skip(conn))]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<User>>, ServerError<Nothing>> {
    let users = conn
        .interact(|conn| Ok::<_, ServerError<Nothing>>(User::fetch_all(conn)?))
        .await??;

    Ok(Json(users))
}
