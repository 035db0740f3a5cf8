// src/models.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid data: {0}")]
    Validation(String),
}

/// A poll prompt. Only visible to the public once `pub_date` has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// True when `pub_date` falls within the day leading up to `now`, both ends inclusive.
    pub fn was_published_recently_at(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }

    pub fn was_published_recently(&self) -> bool {
        self.was_published_recently_at(Utc::now())
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i32,
}

/// Fields needed to create a question; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl NewQuestion {
    pub fn new(
        question_text: impl Into<String>,
        pub_date: DateTime<Utc>,
    ) -> Result<Self, ModelError> {
        let question_text = question_text.into();
        if question_text.trim().is_empty() {
            return Err(ModelError::Validation("question text must not be empty".into()));
        }
        Ok(Self {
            question_text,
            pub_date,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewChoice {
    pub question_id: i64,
    pub choice_text: String,
}

impl NewChoice {
    pub fn new(question_id: i64, choice_text: impl Into<String>) -> Result<Self, ModelError> {
        let choice_text = choice_text.into();
        if choice_text.trim().is_empty() {
            return Err(ModelError::Validation("choice text must not be empty".into()));
        }
        Ok(Self {
            question_id,
            choice_text,
        })
    }
}

/// Form body posted by the detail page.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}
