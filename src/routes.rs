// src/routes.rs
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub const INDEX: &str = "/polls/";
pub const DETAIL: &str = "/polls/{id}/";
pub const RESULTS: &str = "/polls/{id}/results/";
pub const VOTE: &str = "/polls/{id}/vote/";

pub fn index_url() -> String {
    INDEX.to_string()
}

pub fn detail_url(id: i64) -> String {
    format!("/polls/{id}/")
}

pub fn results_url(id: i64) -> String {
    format!("/polls/{id}/results/")
}

pub fn vote_url(id: i64) -> String {
    format!("/polls/{id}/vote/")
}

pub fn create_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(INDEX, get(handlers::index))
        .route(DETAIL, get(handlers::detail))
        .route(RESULTS, get(handlers::results))
        .route(VOTE, post(handlers::vote))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
