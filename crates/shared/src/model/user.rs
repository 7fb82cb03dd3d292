use chrono::{DateTime, Utc};
use exemplar::Model;
use rusqlite::{Connection, OptionalExtension};
use sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use serde::{Deserialize, Serialize};

use crate::model::StoreError;

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("user")]
#[check("../../../server/migrations/001-user/up.sql")]
#[enum_def]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("user")]
#[check("../../../server/migrations/001-user/up.sql")]
pub struct NewUser {
    pub username: String,
}

impl NewUser {
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self { username: username.into() }
    }
}

impl User {
    const COLUMNS: [UserIden; 3] = [UserIden::Id, UserIden::Username, UserIden::CreatedDate];

    pub fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<User>, StoreError> {
        let (sql, values) = Query::select()
            .columns(Self::COLUMNS)
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt
            .query_row(&*values.as_params(), User::from_row)
            .optional()?;
        Ok(user)
    }

    /// All registered users in registration order
    pub fn list(conn: &Connection) -> Result<Vec<User>, StoreError> {
        let (sql, values) = Query::select()
            .columns(Self::COLUMNS)
            .from(UserIden::Table)
            .order_by(UserIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    pub fn create(conn: &mut Connection, new_user: NewUser) -> Result<User, StoreError> {
        let tx = conn.transaction()?;
        let user = {
            new_user.insert(&tx).map_err(StoreError::from_insert)?;
            User::fetch_by_id(&tx, tx.last_insert_rowid())?
                .ok_or(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?
        };
        tx.commit()?;

        Ok(user)
    }
}
