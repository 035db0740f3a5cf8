// src/db.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::models::{Choice, NewChoice, NewQuestion, Question};
use crate::store::{PollStore, StoreError};

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!(max_connections = config.max_connections, "database ready");

    Ok(pool)
}

/// PostgreSQL-backed store. Choice removal on question delete is left to
/// the `ON DELETE CASCADE` constraint.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollStore for PgStore {
    async fn latest_questions(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question_text, pub_date
            FROM questions
            WHERE pub_date <= $1
            ORDER BY pub_date DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn published_question(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<Question>, StoreError> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question_text, pub_date FROM questions WHERE id = $1 AND pub_date <= $2",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    async fn choices(&self, question_id: i64) -> Result<Vec<Choice>, StoreError> {
        let choices = sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, question_id, choice_text, votes
            FROM choices
            WHERE question_id = $1
            ORDER BY id
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(choices)
    }

    async fn record_vote(
        &self,
        question_id: i64,
        choice_id: i64,
    ) -> Result<Option<Choice>, StoreError> {
        let choice = sqlx::query_as::<_, Choice>(
            r#"
            UPDATE choices
            SET votes = votes + 1
            WHERE id = $1 AND question_id = $2
            RETURNING id, question_id, choice_text, votes
            "#,
        )
        .bind(choice_id)
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(choice)
    }

    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let created = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question_text, pub_date)
            VALUES ($1, $2)
            RETURNING id, question_text, pub_date
            "#,
        )
        .bind(&question.question_text)
        .bind(question.pub_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn create_choice(&self, choice: NewChoice) -> Result<Choice, StoreError> {
        let created = sqlx::query_as::<_, Choice>(
            r#"
            INSERT INTO choices (question_id, choice_text)
            VALUES ($1, $2)
            RETURNING id, question_id, choice_text, votes
            "#,
        )
        .bind(choice.question_id)
        .bind(&choice.choice_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
