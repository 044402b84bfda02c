use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, FieldValue};
use crate::{
    api::response_errors::AddExerciseError,
    display_date,
    model::{Exercise, User},
    parse_date,
    types::Uuid,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<FieldValue>,
    #[serde(default)]
    pub date: Option<String>,
}

/// An exercise that passed validation but has not been attached to a user yet
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExercise {
    pub description: String,
    pub duration: i64,
    pub date: DateTime<Utc>,
}

impl ValidExercise {
    pub fn into_exercise(self, user: &User) -> Exercise {
        Exercise::new(user.username.clone(), self.description, self.duration, self.date)
    }
}

impl AddExerciseRequest {
    /// Checks presence first, then the duration, then the date. `now` is used
    /// when no date was given.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidExercise, AddExerciseError> {
        let description = non_blank(self.description);
        let duration = self.duration.and_then(FieldValue::non_blank);

        let (Some(description), Some(duration)) = (description, duration) else {
            return Err(AddExerciseError::MissingFields);
        };

        let duration = duration
            .as_i64()
            .ok_or_else(|| AddExerciseError::InvalidDuration { value: duration.to_string() })?;

        let date = match non_blank(self.date) {
            None => now,
            Some(value) => parse_date(&value).ok_or(AddExerciseError::InvalidDate { value })?,
        };

        Ok(ValidExercise {
            description,
            duration,
            date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResponse {
    /// The owning user's id, not the exercise's
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl ExerciseResponse {
    pub fn new(user: &User, exercise: Exercise) -> Self {
        Self {
            id: user.id,
            username: exercise.username,
            description: exercise.description,
            duration: exercise.duration,
            date: display_date(&exercise.date),
        }
    }
}
