// src/store.rs
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Choice, ModelError, NewChoice, NewQuestion, Question};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("invalid data: {0}")]
    Validation(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Persistence for questions and their choices.
///
/// Every read that feeds a public page takes `now` so callers decide the
/// visibility cut-off; a question is visible once `pub_date <= now`.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Visible questions, newest `pub_date` first, at most `limit` of them.
    async fn latest_questions(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError>;

    /// A single question, or `None` if it does not exist or is not yet published.
    async fn published_question(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, StoreError>;

    /// Choices of a question in creation order.
    async fn choices(&self, question_id: i64) -> Result<Vec<Choice>, StoreError>;

    /// Adds one vote to `choice_id` if it belongs to `question_id`.
    /// Returns the updated choice, or `None` when no such choice exists.
    async fn record_vote(
        &self,
        question_id: i64,
        choice_id: i64,
    ) -> Result<Option<Choice>, StoreError>;

    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    async fn create_choice(&self, choice: NewChoice) -> Result<Choice, StoreError>;

    /// Removes a question together with its choices. Returns whether it existed.
    async fn delete_question(&self, id: i64) -> Result<bool, StoreError>;
}

#[derive(Default)]
struct Tables {
    next_question_id: i64,
    next_choice_id: i64,
    questions: BTreeMap<i64, Question>,
    choices: BTreeMap<i64, Choice>,
}

/// Process-local store used by tests and `--memory` runs.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn latest_questions(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        let mut questions: Vec<Question> = tables
            .questions
            .values()
            .filter(|q| q.is_visible_at(now))
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        questions.truncate(limit);
        Ok(questions)
    }

    async fn published_question(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .get(&id)
            .filter(|q| q.is_visible_at(now))
            .cloned())
    }

    async fn choices(&self, question_id: i64) -> Result<Vec<Choice>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .choices
            .values()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn record_vote(
        &self,
        question_id: i64,
        choice_id: i64,
    ) -> Result<Option<Choice>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.choices.get_mut(&choice_id) {
            Some(choice) if choice.question_id == question_id => {
                choice.votes += 1;
                Ok(Some(choice.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_question_id += 1;
        let created = Question {
            id: tables.next_question_id,
            question_text: question.question_text,
            pub_date: question.pub_date,
        };
        tables.questions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn create_choice(&self, choice: NewChoice) -> Result<Choice, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(&choice.question_id) {
            return Err(StoreError::Validation(format!(
                "question {} does not exist",
                choice.question_id
            )));
        }
        tables.next_choice_id += 1;
        let created = Choice {
            id: tables.next_choice_id,
            question_id: choice.question_id,
            choice_text: choice.choice_text,
            votes: 0,
        };
        tables.choices.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let existed = tables.questions.remove(&id).is_some();
        if existed {
            tables.choices.retain(|_, c| c.question_id != id);
        }
        Ok(existed)
    }
}
