use chrono::{DateTime, Utc};
use exemplar::Model;
use rusqlite::Connection;
use sea_query::{enum_def, Alias, Expr, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use serde::{Deserialize, Serialize};

use crate::types::Uuid;

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("exercise")]
#[enum_def]
pub struct Exercise {
    pub id: Uuid,
    /// Copy of the owner's username at the time the exercise was logged
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: DateTime<Utc>,
}

/// Restrictions applied when reading a user's log. Both date bounds are
/// inclusive and a `None` limit means every matching exercise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
}

impl Exercise {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::Username,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .to_owned()
    }

    pub fn new<U, D>(username: U, description: D, duration: i64, date: DateTime<Utc>) -> Self
    where
        U: Into<String>,
        D: Into<String>,
    {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            description: description.into(),
            duration,
            date,
        }
    }

    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Exercise, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt.query_row(&*values.as_params(), Exercise::from_row)?;
        Ok(res)
    }

    pub fn create(conn: &mut Connection, exercise: Exercise) -> Result<Exercise, rusqlite::Error> {
        let tx = conn.transaction()?;
        let exercise = {
            exercise.insert(&tx)?;
            Exercise::fetch_by_id(&tx, &exercise.id)?
        };
        tx.commit()?;

        Ok(exercise)
    }

    /// Builds the select for a user's log, oldest insert first
    pub fn log_query<T: AsRef<str>>(username: T, filter: &LogFilter) -> SelectStatement {
        let mut query = Self::select_star();
        query
            .and_where(Expr::col(ExerciseIden::Username).eq(username.as_ref()))
            .order_by(Alias::new("rowid"), Order::Asc);

        if let Some(from) = filter.from {
            query.and_where(Expr::col(ExerciseIden::Date).gte(from));
        }
        if let Some(to) = filter.to {
            query.and_where(Expr::col(ExerciseIden::Date).lte(to));
        }
        if let Some(limit) = filter.limit {
            query.limit(limit);
        }

        query
    }

    pub fn fetch_log<T: AsRef<str>>(
        conn: &Connection,
        username: T,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::log_query(username, filter).build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};
    use sea_query::SqliteQueryBuilder;

    use super::{Exercise, LogFilter};
    use crate::model::test_utils::test_connection;

    fn day(month: u32, day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, month, day, 0, 0, 0).unwrap()
    }

    fn seeded() -> rusqlite::Connection {
        let mut conn = test_connection();
        // Inserted out of date order so insertion order is observable
        for (date, description) in [(day(2, 1), "feb"), (day(1, 1), "jan"), (day(3, 1), "mar")] {
            Exercise::create(&mut conn, Exercise::new("ada", description, 30, date)).unwrap();
        }
        Exercise::create(&mut conn, Exercise::new("grace", "other", 10, day(2, 1))).unwrap();
        conn
    }

    fn descriptions(log: Vec<Exercise>) -> Vec<String> {
        log.into_iter().map(|e| e.description).collect()
    }

    #[test]
    fn test_create_round_trips_fields() {
        let mut conn = test_connection();
        let date = day(5, 5) + chrono::Duration::milliseconds(123);
        let exercise = Exercise::new("ada", "rowing", 45, date);
        let stored = Exercise::create(&mut conn, exercise.clone()).unwrap();
        assert_eq!(stored, exercise);
    }

    #[test]
    fn test_unfiltered_log_is_in_insert_order() {
        let conn = seeded();
        let log = Exercise::fetch_log(&conn, "ada", &LogFilter::default()).unwrap();
        assert_eq!(descriptions(log), ["feb", "jan", "mar"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let conn = seeded();

        let filter = LogFilter {
            from: Some(day(1, 15)),
            to: Some(day(2, 15)),
            limit: None,
        };
        let log = Exercise::fetch_log(&conn, "ada", &filter).unwrap();
        assert_eq!(descriptions(log), ["feb"]);

        let filter = LogFilter {
            from: Some(day(2, 1)),
            to: Some(day(3, 1)),
            limit: None,
        };
        let log = Exercise::fetch_log(&conn, "ada", &filter).unwrap();
        assert_eq!(descriptions(log), ["feb", "mar"]);
    }

    #[test]
    fn test_single_bounds() {
        let conn = seeded();

        let from_only = LogFilter { from: Some(day(2, 1)), ..Default::default() };
        let log = Exercise::fetch_log(&conn, "ada", &from_only).unwrap();
        assert_eq!(descriptions(log), ["feb", "mar"]);

        let to_only = LogFilter { to: Some(day(1, 31)), ..Default::default() };
        let log = Exercise::fetch_log(&conn, "ada", &to_only).unwrap();
        assert_eq!(descriptions(log), ["jan"]);
    }

    #[test]
    fn test_limit_keeps_earliest_inserted() {
        let conn = seeded();
        let filter = LogFilter { limit: Some(1), ..Default::default() };
        let log = Exercise::fetch_log(&conn, "ada", &filter).unwrap();
        assert_eq!(descriptions(log), ["feb"]);
    }

    #[test]
    fn test_largest_limit_binds() {
        let conn = seeded();
        let filter = LogFilter { limit: Some(i64::MAX as u64), ..Default::default() };
        let log = Exercise::fetch_log(&conn, "ada", &filter).unwrap();
        assert_eq!(descriptions(log), ["feb", "jan", "mar"]);
    }

    #[test]
    fn test_timestamps_within_a_day_respect_bounds() {
        let mut conn = test_connection();
        let noon = Utc.with_ymd_and_hms(2023, 2, 15, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        Exercise::create(&mut conn, Exercise::new("ada", "noon", 5, noon)).unwrap();

        let before = LogFilter { to: Some(day(2, 15)), ..Default::default() };
        assert!(Exercise::fetch_log(&conn, "ada", &before).unwrap().is_empty());

        let after = LogFilter { from: Some(day(2, 15)), ..Default::default() };
        assert_eq!(Exercise::fetch_log(&conn, "ada", &after).unwrap().len(), 1);
    }

    #[test]
    fn test_log_query_only_adds_requested_clauses() {
        let sql = Exercise::log_query("ada", &LogFilter::default()).to_string(SqliteQueryBuilder);
        assert!(sql.contains(r#""username" = 'ada'"#), "{sql}");
        assert!(!sql.contains(r#""date" >="#), "{sql}");
        assert!(!sql.contains(r#""date" <="#), "{sql}");
        assert!(!sql.contains("LIMIT"), "{sql}");

        let filter = LogFilter { from: Some(day(1, 1)), to: None, limit: Some(3) };
        let sql = Exercise::log_query("ada", &filter).to_string(SqliteQueryBuilder);
        assert!(sql.contains(r#""date" >="#), "{sql}");
        assert!(!sql.contains(r#""date" <="#), "{sql}");
        assert!(sql.contains("LIMIT 3"), "{sql}");
    }
}
