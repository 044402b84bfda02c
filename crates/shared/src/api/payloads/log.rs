use serde::{Deserialize, Serialize};
use tracing::debug;

use super::non_blank;
use crate::{
    display_date,
    model::{Exercise, LogFilter, User},
    parse_date,
    types::Uuid,
};

/// sqlite binds limits as signed integers
const MAX_LIMIT: u64 = i64::MAX as u64;

/// Query string of the log route. Everything is optional and nothing in it
/// can fail the request: unparseable values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl LogQuery {
    /// Builds the query from raw key/value pairs. Only the first value of a
    /// repeated key is used and unknown keys are skipped
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "from" => &mut query.from,
                "to" => &mut query.to,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    pub fn filter(&self) -> LogFilter {
        LogFilter {
            from: Self::bound("from", &self.from),
            to: Self::bound("to", &self.to),
            limit: self.limit(),
        }
    }

    fn bound(name: &str, value: &Option<String>) -> Option<chrono::DateTime<chrono::Utc>> {
        let value = non_blank(value.clone())?;
        let date = parse_date(&value);
        if date.is_none() {
            debug!(bound = name, %value, "Ignoring unparseable log bound");
        }
        date
    }

    /// Only a positive integer limits the log. Limits past what sqlite can
    /// bind are clamped, which leaves the log unbounded in practice
    fn limit(&self) -> Option<u64> {
        self.limit
            .as_deref()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(|v| v.min(MAX_LIMIT))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: display_date(&exercise.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    /// Applied lower bound, omitted when the log wasn't bounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl LogResponse {
    pub fn new(user: User, filter: &LogFilter, exercises: Vec<Exercise>) -> Self {
        let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();
        Self {
            id: user.id,
            username: user.username,
            from: filter.from.as_ref().map(display_date),
            to: filter.to.as_ref().map(display_date),
            count: log.len(),
            log,
        }
    }
}
