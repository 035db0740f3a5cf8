// src/templates.rs
use serde::Serialize;
use tera::{Context, Tera};

use crate::models::{Choice, Question};

pub const INDEX: &str = "polls/index.html";
pub const DETAIL: &str = "polls/detail.html";
pub const RESULTS: &str = "polls/results.html";

/// Builds the template set from the files compiled into the binary.
pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (INDEX, include_str!("../templates/polls/index.html")),
        (DETAIL, include_str!("../templates/polls/detail.html")),
        (RESULTS, include_str!("../templates/polls/results.html")),
    ])?;
    Ok(tera)
}

#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub latest_question_list: Vec<Question>,
}

/// Shared by the detail and results pages.
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub question: Question,
    pub choices: Vec<Choice>,
    pub error_message: Option<String>,
}

pub fn render<T: Serialize>(tera: &Tera, name: &str, page: &T) -> Result<String, tera::Error> {
    let context = Context::from_serialize(page)?;
    tera.render(name, &context)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn question_text_is_escaped() {
        let tera = load().unwrap();
        let page = IndexPage {
            latest_question_list: vec![Question {
                id: 3,
                question_text: "<b>Who?</b>".into(),
                pub_date: Utc::now(),
            }],
        };
        let html = render(&tera, INDEX, &page).unwrap();
        assert!(html.contains("&lt;b&gt;Who?&lt;&#x2F;b&gt;"));
        assert!(html.contains("href=\"/polls/3/\""));
    }

    #[test]
    fn results_pluralize_votes() {
        let tera = load().unwrap();
        let question = Question {
            id: 1,
            question_text: "Best keeper?".into(),
            pub_date: Utc::now(),
        };
        let choice = |id, text: &str, votes| Choice {
            id,
            question_id: 1,
            choice_text: text.into(),
            votes,
        };
        let page = QuestionPage {
            question,
            choices: vec![choice(1, "Courtois", 1), choice(2, "Neuer", 2)],
            error_message: None,
        };
        let html = render(&tera, RESULTS, &page).unwrap();
        assert!(html.contains("Courtois -- 1 vote</li>"));
        assert!(html.contains("Neuer -- 2 votes</li>"));
        assert!(html.contains("Vote again?"));
    }
}
