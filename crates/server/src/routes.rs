pub mod students;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::StudentService;

use crate::openapi;

/// Shared handler state; the service is cheap to clone (one `Arc`).
#[derive(Clone)]
pub struct ServerState {
    pub students: StudentService,
}

impl ServerState {
    pub fn new(students: StudentService) -> Self { Self { students } }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router. Student routes are nested under
/// `base_path` unless it is empty.
pub fn build_router(state: ServerState, cors: CorsLayer, base_path: &str) -> Router {
    let students = Router::new()
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/:id",
            get(students::get).patch(students::update).delete(students::delete),
        );
    let students = if base_path.is_empty() {
        students
    } else {
        Router::new().nest(base_path, students)
    };

    Router::new()
        .route("/health", get(health))
        .merge(students)
        .merge(openapi::swagger_ui())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx 以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
