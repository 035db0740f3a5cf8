// src/state.rs
use std::sync::Arc;

use tera::Tera;

use crate::store::PollStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub templates: Arc<Tera>,
    pub index_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>, templates: Tera, index_limit: usize) -> Self {
        Self {
            store,
            templates: Arc::new(templates),
            index_limit,
        }
    }
}
