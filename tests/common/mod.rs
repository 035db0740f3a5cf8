#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use tower::ServiceExt;

use polls::{Choice, MemoryStore, NewChoice, NewQuestion, PollStore, Question};

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_limit(5)
    }

    pub fn with_limit(index_limit: usize) -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = polls::build_app(store.clone(), index_limit).expect("templates load");
        Self { store, router }
    }

    /// Creates a question published `days` from now (negative for the past).
    pub async fn create_question(&self, question_text: &str, days: i64) -> Question {
        let pub_date = Utc::now() + Duration::days(days);
        self.store
            .create_question(NewQuestion::new(question_text, pub_date).unwrap())
            .await
            .unwrap()
    }

    pub async fn create_choice(&self, question: &Question, choice_text: &str) -> Choice {
        self.store
            .create_choice(NewChoice::new(question.id, choice_text).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> (StatusCode, String) {
        let (status, _, body) = self.post_form_with_location(uri, form).await;
        (status, body)
    }

    pub async fn post_form_with_location(
        &self,
        uri: &str,
        form: &str,
    ) -> (StatusCode, Option<String>, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Posts `body` as-is, with a content type only when one is given.
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
