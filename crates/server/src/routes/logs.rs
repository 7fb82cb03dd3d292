use axum::{
    extract::{Path, Query},
    Json,
};
use shared::{
    api::{
        error::ApiError,
        payloads::{LogEntry, LogQuery, LogResponse},
    },
    log_filter::filter_log,
    model::{Exercise, User},
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn fetch_log(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
    Query(query): Query<LogQuery>,
) -> Result<Json<LogResponse>, ApiError> {
    let response = conn
        .interact(move |conn| {
            let user = User::fetch_by_id(conn, id)?.ok_or(ApiError::NotFound)?;
            let log = Exercise::fetch_for_user(conn, user.id)?;

            let filtered = filter_log(&log, &query);

            Ok::<_, ApiError>(LogResponse {
                id: user.id,
                username: user.username,
                count: filtered.len(),
                log: filtered.iter().map(LogEntry::from).collect(),
            })
        })
        .await??;

    Ok(Json(response))
}
