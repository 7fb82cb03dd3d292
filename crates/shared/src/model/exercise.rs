use chrono::{DateTime, Utc};
use exemplar::Model;
use rusqlite::{Connection, OptionalExtension};
use sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use serde::{Deserialize, Serialize};

use crate::model::StoreError;

/// One logged activity entry, owned by its user. Clients never address an
/// exercise directly; it only ever appears inside its user's log.
#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("exercise")]
#[check("../../../server/migrations/002-exercise/up.sql")]
#[enum_def]
pub struct Exercise {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub duration: i64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("exercise")]
#[check("../../../server/migrations/002-exercise/up.sql")]
pub struct NewExercise {
    pub user_id: i64,
    pub description: String,
    pub duration: i64,
    pub date: DateTime<Utc>,
}

impl Exercise {
    const COLUMNS: [ExerciseIden; 5] = [
        ExerciseIden::Id,
        ExerciseIden::UserId,
        ExerciseIden::Description,
        ExerciseIden::Duration,
        ExerciseIden::Date,
    ];

    fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<Exercise>, StoreError> {
        let (sql, values) = Query::select()
            .columns(Self::COLUMNS)
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt
            .query_row(&*values.as_params(), Exercise::from_row)
            .optional()?;
        Ok(exercise)
    }

    /// The user's full log in insertion order. Ascending id is creation order
    /// since ids are monotonic rowids.
    pub fn fetch_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Exercise>, StoreError> {
        let (sql, values) = Query::select()
            .columns(Self::COLUMNS)
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .order_by(ExerciseIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exercises)
    }

    pub fn append(conn: &mut Connection, new_exercise: NewExercise) -> Result<Exercise, StoreError> {
        let tx = conn.transaction()?;
        let exercise = {
            new_exercise.insert(&tx).map_err(StoreError::from_insert)?;
            Exercise::fetch_by_id(&tx, tx.last_insert_rowid())?
                .ok_or(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?
        };
        tx.commit()?;

        Ok(exercise)
    }
}
