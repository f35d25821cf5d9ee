//! Article idea generation.
//!
//! The model-backed path asks the LLM for a JSON array of ideas. Whenever it
//! fails, comes back empty, or the caller opts out of it, the template
//! generator produces the plan instead. Either way exactly [`IDEA_COUNT`]
//! ideas come out.

use thiserror::Error;
use tracing::{info, warn};

use crate::llm::{LlmClient, LlmError};
use crate::types::{ContentIdea, KeywordRecord, SiteInfo};

/// Ideas per plan
pub const IDEA_COUNT: usize = 15;

/// Keywords embedded in the model prompt
const PROMPT_KEYWORDS: usize = 20;

/// Padding topics for the template generator, cycled by current idea count
pub const GENERIC_TOPICS: [&str; 5] = [
    "Industry Trends 2024",
    "FAQ",
    "Solution Comparison",
    "Success Case Study",
    "Common Mistakes to Avoid",
];

const OBJECTIVE_LIMIT: usize = 100;

/// Why the model-backed path produced nothing usable
#[derive(Debug, Error)]
pub enum IdeaError {
    #[error("language model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("no JSON array found in model reply")]
    NoJsonArray,

    #[error("model reply is not a valid idea list: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("model returned no ideas")]
    Empty,
}

/// Where a plan's ideas came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaSource {
    Model,
    Fallback { reason: String },
}

#[derive(Debug, Clone)]
pub struct IdeaOutcome {
    pub ideas: Vec<ContentIdea>,
    pub source: IdeaSource,
}

impl IdeaOutcome {
    pub fn used_fallback(&self) -> bool {
        matches!(self.source, IdeaSource::Fallback { .. })
    }
}

pub struct IdeaGenerator {
    llm: Option<LlmClient>,
    prefer_fallback: bool,
}

impl IdeaGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm: Some(llm),
            prefer_fallback: false,
        }
    }

    /// Generator that only uses templates
    pub fn templates_only() -> Self {
        Self {
            llm: None,
            prefer_fallback: true,
        }
    }

    pub fn prefer_fallback(mut self, prefer: bool) -> Self {
        self.prefer_fallback = prefer;
        self
    }

    /// Exactly [`IDEA_COUNT`] ideas, from the model when possible
    pub async fn generate(&self, site: &SiteInfo, keywords: &[KeywordRecord]) -> IdeaOutcome {
        let reason = match (&self.llm, self.prefer_fallback) {
            (_, true) => "template generator requested".to_string(),
            (None, false) => "no language model configured".to_string(),
            (Some(llm), false) => match generate_with_model(llm, site, keywords).await {
                Ok(ideas) => {
                    info!(
                        provider = llm.provider_name(),
                        count = ideas.len(),
                        "ideas generated by model"
                    );
                    return IdeaOutcome {
                        ideas: fill_to_count(ideas, site, keywords),
                        source: IdeaSource::Model,
                    };
                }
                Err(e) => {
                    warn!(
                        provider = llm.provider_name(),
                        error = %e,
                        "model idea generation failed, using templates"
                    );
                    e.to_string()
                }
            },
        };

        IdeaOutcome {
            ideas: fallback_ideas(site, keywords),
            source: IdeaSource::Fallback { reason },
        }
    }
}

/// Model-backed path. An empty idea list is an error.
pub async fn generate_with_model(
    llm: &LlmClient,
    site: &SiteInfo,
    keywords: &[KeywordRecord],
) -> Result<Vec<ContentIdea>, IdeaError> {
    let prompt = build_prompt(site, keywords);
    let reply = llm.complete_text(prompt).await?;
    parse_ideas(&reply)
}

pub fn build_prompt(site: &SiteInfo, keywords: &[KeywordRecord]) -> String {
    let keywords_text = keywords
        .iter()
        .take(PROMPT_KEYWORDS)
        .map(|k| k.keyword.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are an SEO expert and content marketer. Based on the following information:

Site: {name}
URL: {url}
Description: {about}
Goals: {goals}
Topics to avoid: {avoid}
Main keywords: {keywords}

Generate {count} SEO-optimized blog article ideas. For each idea provide:
1. Article title
2. Short description (2-3 lines)
3. Specific objective of the article
4. Target keywords (3-5 keywords)

Reply ONLY with a valid JSON array in this format:
[
    {{
        "title": "Article title",
        "description": "Article description",
        "objective": "Specific objective",
        "target_keywords": ["keyword1", "keyword2", "keyword3"]
    }}
]"#,
        name = site.name,
        url = site.url,
        about = site.about,
        goals = site.goals,
        avoid = site.avoid_topics,
        keywords = keywords_text,
        count = IDEA_COUNT,
    )
}

/// Extracts the idea array from a free-text reply
pub fn parse_ideas(reply: &str) -> Result<Vec<ContentIdea>, IdeaError> {
    let content = strip_code_fences(reply.trim());

    let start = content.find('[').ok_or(IdeaError::NoJsonArray)?;
    let end = content.rfind(']').ok_or(IdeaError::NoJsonArray)?;
    if end < start {
        return Err(IdeaError::NoJsonArray);
    }

    let ideas: Vec<ContentIdea> = serde_json::from_str(&content[start..=end])?;
    if ideas.is_empty() {
        return Err(IdeaError::Empty);
    }
    Ok(ideas)
}

fn strip_code_fences(content: &str) -> String {
    if content.starts_with("```json") {
        content.replace("```json", "").replace("```", "").trim().to_string()
    } else if content.starts_with("```") {
        content.replace("```", "").trim().to_string()
    } else {
        content.to_string()
    }
}

/// Truncates model output to [`IDEA_COUNT`], topping up short lists from the templates
fn fill_to_count(
    mut ideas: Vec<ContentIdea>,
    site: &SiteInfo,
    keywords: &[KeywordRecord],
) -> Vec<ContentIdea> {
    if ideas.len() < IDEA_COUNT {
        let have = ideas.len();
        ideas.extend(fallback_ideas(site, keywords).into_iter().skip(have));
    }
    ideas.truncate(IDEA_COUNT);
    ideas
}

/// Template generator: one guide per leading keyword, padded with generic topics
pub fn fallback_ideas(site: &SiteInfo, keywords: &[KeywordRecord]) -> Vec<ContentIdea> {
    let mut ideas: Vec<ContentIdea> = keywords
        .iter()
        .take(IDEA_COUNT)
        .map(|kw| ContentIdea {
            title: format!("Complete Guide to {}", title_case(&kw.keyword)),
            description: format!(
                "An in-depth article on {} for {}. It covers every main aspect to satisfy user searches.",
                kw.keyword, site.name
            ),
            objective: "Increase organic traffic and ranking for the target keyword".to_string(),
            target_keywords: vec![kw.keyword.clone()],
        })
        .collect();

    let padding_keywords: Vec<String> = keywords.iter().take(3).map(|k| k.keyword.clone()).collect();

    while ideas.len() < IDEA_COUNT {
        let topic = GENERIC_TOPICS[ideas.len() % GENERIC_TOPICS.len()];
        ideas.push(ContentIdea {
            title: format!("{} - {}", topic, site.name),
            description: format!("Article on {} for the {} sector", topic.to_lowercase(), site.name),
            objective: truncate_objective(&site.goals),
            target_keywords: padding_keywords.clone(),
        });
    }

    ideas
}

fn truncate_objective(goals: &str) -> String {
    if goals.chars().count() > OBJECTIVE_LIMIT {
        let head: String = goals.chars().take(OBJECTIVE_LIMIT).collect();
        format!("{}...", head)
    } else {
        goals.to_string()
    }
}

/// Uppercases the first letter of each alphabetic run, lowercases the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
