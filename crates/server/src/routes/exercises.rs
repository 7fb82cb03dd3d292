use axum::{
    extract::Path,
    http::StatusCode,
    Json,
};
use shared::{
    api::{
        error::ApiError,
        payloads::{ExerciseResponse, NewExercisePayload},
    },
    log_filter::format_date,
    model::{Exercise, NewExercise, User},
    validate::validate_exercise_input,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn add_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
    Json(payload): Json<NewExercisePayload>,
) -> Result<(StatusCode, Json<ExerciseResponse>), ApiError> {
    // Everything is validated before the store is touched
    let input = validate_exercise_input(
        payload.description.as_deref(),
        payload.duration.as_ref(),
        payload.date.as_deref(),
    )?;

    let response = conn
        .interact(move |conn| {
            let user = User::fetch_by_id(conn, id)?.ok_or(ApiError::NotFound)?;

            let exercise = Exercise::append(conn, NewExercise {
                user_id: user.id,
                description: input.description,
                duration: input.duration,
                date: input.date,
            })?;

            Ok::<_, ApiError>(ExerciseResponse {
                id: user.id,
                username: user.username,
                description: exercise.description,
                duration: exercise.duration,
                date: format_date(&exercise.date),
            })
        })
        .await??;

    Ok((StatusCode::CREATED, Json(response)))
}
