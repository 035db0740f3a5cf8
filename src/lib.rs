// src/lib.rs
//! A small polling site: questions with a publish date, choices that
//! collect votes, and index/detail/results pages served over HTTP.
//!
//! Questions dated in the future stay hidden from every page until their
//! `pub_date` passes. Storage goes through [`store::PollStore`], backed by
//! PostgreSQL in production ([`db::PgStore`]) and by
//! [`store::MemoryStore`] for tests and database-less runs.

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod templates;

pub use error::AppError;
pub use models::{Choice, ModelError, NewChoice, NewQuestion, Question};
pub use state::AppState;
pub use store::{MemoryStore, PollStore, StoreError};

/// Wires a store into the full router with templates loaded.
pub fn build_app(
    store: Arc<dyn PollStore>,
    index_limit: usize,
) -> Result<axum::Router, tera::Error> {
    let templates = templates::load()?;
    let state = AppState::new(store, templates, index_limit);
    Ok(routes::create_routes(state))
}
