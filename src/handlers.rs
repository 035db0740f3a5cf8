// src/handlers.rs
use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{Question, VoteForm};
use crate::routes;
use crate::state::AppState;
use crate::store::PollStore;
use crate::templates::{self, IndexPage, QuestionPage};

const NO_CHOICE_SELECTED: &str = "You didn't select a choice.";

/// Visible questions for the index page, newest first.
pub async fn latest_question_list(
    store: &dyn PollStore,
    now: DateTime<Utc>,
    limit: usize,
) -> Result<Vec<Question>, AppError> {
    Ok(store.latest_questions(now, limit).await?)
}

/// Looks up a question by its raw path segment. Unknown, malformed and
/// not-yet-published ids all resolve to `NotFound`.
pub async fn visible_question(
    store: &dyn PollStore,
    raw_id: &str,
    now: DateTime<Utc>,
) -> Result<Question, AppError> {
    let id: i64 = raw_id.parse().map_err(|_| AppError::NotFound)?;
    store
        .published_question(id, now)
        .await?
        .ok_or(AppError::NotFound)
}

async fn question_page(
    state: &AppState,
    raw_id: &str,
    error_message: Option<String>,
) -> Result<QuestionPage, AppError> {
    let question = visible_question(state.store.as_ref(), raw_id, Utc::now()).await?;
    let choices = state.store.choices(question.id).await?;
    Ok(QuestionPage {
        question,
        choices,
        error_message,
    })
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let latest_question_list =
        latest_question_list(state.store.as_ref(), Utc::now(), state.index_limit).await?;
    debug!(count = latest_question_list.len(), "rendering index");

    let page = IndexPage {
        latest_question_list,
    };
    Ok(Html(templates::render(&state.templates, templates::INDEX, &page)?))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let page = question_page(&state, &id, None).await?;
    Ok(Html(templates::render(&state.templates, templates::DETAIL, &page)?))
}

pub async fn results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let page = question_page(&state, &id, None).await?;
    Ok(Html(templates::render(&state.templates, templates::RESULTS, &page)?))
}

/// Records a vote and redirects to the results page. A missing or foreign
/// choice re-renders the detail page with an error instead.
///
/// The question is resolved before the form is looked at, so an unknown or
/// unpublished question is a 404 whatever the body holds. A body that does not
/// decode as a vote form counts as no choice.
pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> Result<Response, AppError> {
    let question = visible_question(state.store.as_ref(), &id, Utc::now()).await?;

    let raw_choice = match form {
        Ok(Form(form)) => form.choice,
        Err(rejection) => {
            debug!(question = question.id, %rejection, "unreadable vote form");
            None
        }
    };
    let choice_id = raw_choice.as_deref().and_then(|c| c.trim().parse::<i64>().ok());
    let voted = match choice_id {
        Some(choice_id) => state.store.record_vote(question.id, choice_id).await?,
        None => None,
    };

    match voted {
        Some(choice) => {
            info!(
                question = question.id,
                choice = choice.id,
                votes = choice.votes,
                "vote recorded"
            );
            Ok(Redirect::to(&routes::results_url(question.id)).into_response())
        }
        None => {
            debug!(question = question.id, ?raw_choice, "vote without a valid choice");
            let page = question_page(&state, &id, Some(NO_CHOICE_SELECTED.to_string())).await?;
            let html = templates::render(&state.templates, templates::DETAIL, &page)?;
            Ok(Html(html).into_response())
        }
    }
}
