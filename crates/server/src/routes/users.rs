use axum::{http::StatusCode, Json};
use shared::{
    api::{
        error::ApiError,
        payloads::{RegistrationUser, UserResponse},
    },
    model::{NewUser, User},
    validate::validate_new_user,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    Json(payload): Json<RegistrationUser>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let username = validate_new_user(payload.username.as_deref())?;

    let user = conn
        .interact(move |conn| User::create(conn, NewUser::new(username)))
        .await??;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = conn.interact(|conn| User::list(conn)).await??;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
