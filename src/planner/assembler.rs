//! Turns ideas into editorial rows.

use chrono::{Duration as ChronoDuration, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::providers::QuestionSource;
use crate::types::{ContentIdea, EditorialRow, KeywordRecord, Priority};

/// Matched keywords shown per row
pub const MAX_MATCHED_KEYWORDS: usize = 10;
/// Related questions shown per row
pub const MAX_QUESTIONS: usize = 5;

const QUESTION_SEPARATOR: &str = " | ";

/// First suggested publish date
pub fn origin_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Publish date of row `index`: one week apart from the origin
pub fn suggested_date(index: usize) -> NaiveDate {
    origin_date() + ChronoDuration::weeks(index as i64)
}

/// Keywords related to `idea`, rendered `"<keyword> (<volume>)"`.
///
/// A record matches when its keyword contains, or is contained in, any target
/// keyword, ignoring case. Short keywords over-match; that is accepted.
pub fn matched_keywords(idea: &ContentIdea, keywords: &[KeywordRecord]) -> Vec<String> {
    let targets: Vec<String> = idea
        .target_keywords
        .iter()
        .map(|t| t.to_lowercase())
        .collect();

    keywords
        .iter()
        .filter(|kw| {
            let keyword = kw.keyword.to_lowercase();
            targets
                .iter()
                .any(|t| keyword.contains(t.as_str()) || t.contains(keyword.as_str()))
        })
        .take(MAX_MATCHED_KEYWORDS)
        .map(|kw| format!("{} ({})", kw.keyword, kw.volume))
        .collect()
}

/// Builds rows, asking `questions` once per idea with a pause after each call
pub struct PlanAssembler {
    questions: Arc<dyn QuestionSource>,
    pause: Duration,
}

impl PlanAssembler {
    pub fn new(questions: Arc<dyn QuestionSource>, pause: Duration) -> Self {
        Self { questions, pause }
    }

    /// One row per idea, in idea order. Degraded question lookups are
    /// returned alongside as warnings.
    pub async fn assemble(
        &self,
        keywords: &[KeywordRecord],
        ideas: &[ContentIdea],
    ) -> (Vec<EditorialRow>, Vec<String>) {
        let mut rows = Vec::with_capacity(ideas.len());
        let mut warnings = Vec::new();

        for (i, idea) in ideas.iter().enumerate() {
            let questions = match idea.target_keywords.first() {
                Some(query) => {
                    let fetched = self.questions.fetch(query).await;
                    if let Some(reason) = fetched.warning() {
                        warnings.push(reason.to_string());
                    }
                    if !self.pause.is_zero() {
                        tokio::time::sleep(self.pause).await;
                    }
                    fetched.into_inner()
                }
                None => Vec::new(),
            };

            let row = build_row(i, idea, keywords, &questions);
            debug!(index = i, title = %row.title, "row assembled");
            rows.push(row);
        }

        (rows, warnings)
    }
}

/// The row for idea `index`, given its related questions
pub fn build_row(
    index: usize,
    idea: &ContentIdea,
    keywords: &[KeywordRecord],
    questions: &[String],
) -> EditorialRow {
    let questions = questions
        .iter()
        .take(MAX_QUESTIONS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(QUESTION_SEPARATOR);

    EditorialRow {
        title: idea.title.clone(),
        description: idea.description.clone(),
        keywords: matched_keywords(idea, keywords).join(", "),
        questions,
        objective: idea.objective.clone(),
        priority: Priority::for_index(index),
        suggested_date: suggested_date(index).format("%Y-%m-%d").to_string(),
    }
}
