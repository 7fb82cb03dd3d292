use std::sync::atomic::Ordering;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

use crate::AppState;

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;

mod health;
pub use health::*;

pub fn router(state: AppState) -> Router {
    let assets_dir = state.args.assets_dir.clone();

    Router::new()
        .route("/api/users", post(create_user).get(list_users))
        .route("/api/users/:id/exercises", post(add_exercise))
        .route("/api/users/:id/logs", get(fetch_log))
        .route("/api/health", get(health))
        .fallback_service(ServeDir::new(assets_dir))
        .layer(middleware::from_fn_with_state(state.clone(), count_request))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

// Diagnostic only; the count carries no correctness contract
async fn count_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request_number = state.request_counter.fetch_add(1, Ordering::Relaxed) + 1;
    debug!(request_number, "handling request");
    next.run(request).await
}
