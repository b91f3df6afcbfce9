use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        patients::{create_patient, get_patient, reindex_patient, search_patients},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let patient_routes = Router::new()
        .route("/patients", get(search_patients).post(create_patient))
        .route("/patients/{id}", get(get_patient))
        .route("/patients/{id}/reindex", post(reindex_patient))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .merge(patient_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.request_timeout,
        ))
        .with_state(state)
}
