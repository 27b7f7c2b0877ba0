pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;
use crate::users::handlers as user_handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes/analyze", post(handlers::handle_analyze_resume))
        .route("/api/v1/resumes/score", post(handlers::handle_score_fields))
        .route("/api/v1/resumes/extract", post(handlers::handle_extract_fields))
        .route("/api/v1/resumes/skills", post(handlers::handle_scan_skills))
        .route(
            "/api/v1/resumes/keyword-match",
            post(handlers::handle_keyword_match),
        )
        .route(
            "/api/v1/resumes/keyword-match/upload",
            post(handlers::handle_keyword_match_upload),
        )
        // Career API
        .route("/api/v1/careers", get(handlers::handle_list_careers))
        .route(
            "/api/v1/careers/recommendations",
            post(handlers::handle_career_recommendations),
        )
        // Users
        .route(
            "/api/v1/users/register",
            post(user_handlers::handle_register),
        )
        .layer(upload_limit)
        .with_state(state)
}
