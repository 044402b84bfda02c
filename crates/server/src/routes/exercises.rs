use axum::{extract::Path, Json};
use chrono::Utc;
use shared::{
    api::{
        error::ServerError,
        payloads::{AddExerciseRequest, ExerciseResponse},
        response_errors::AddExerciseError,
    },
    model::Exercise,
};
use tracing::instrument;

use super::lookup_user;
use crate::{db::DatabaseConnection, extract::Payload};

/// Validates the body before looking the user up, so a bad body is a 400 even
/// for an unknown user
#[instrument(skip(conn))]
pub async fn add_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<String>,
    Payload(req): Payload<AddExerciseRequest>,
) -> Result<Json<ExerciseResponse>, ServerError<AddExerciseError>> {
    let exercise = req.validate(Utc::now())?;

    let response = conn
        .interact(move |conn| {
            let user = lookup_user(conn, &id)?.ok_or(AddExerciseError::UserNotFound)?;
            let exercise = Exercise::create(conn, exercise.into_exercise(&user))?;
            Ok::<_, ServerError<AddExerciseError>>(ExerciseResponse::new(&user, exercise))
        })
        .await??;

    Ok(Json(response))
}
