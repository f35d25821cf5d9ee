//! Serper search client, used for "People Also Ask" questions

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::SearchProviderConfig;
use crate::error::Result;
use crate::types::Fetched;

/// Source of search-engine related questions
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Related questions for `query`, in the order returned. Never fails: errors degrade.
    async fn fetch(&self, query: &str) -> Fetched<Vec<String>>;
}

#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
    num: u32,
}

/// The subset of a Serper response the planner reads
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "peopleAlsoAsk", default)]
    pub people_also_ask: Vec<PeopleAlsoAsk>,
}

#[derive(Debug, Deserialize)]
pub struct PeopleAlsoAsk {
    #[serde(default)]
    pub question: String,
}

impl SearchResponse {
    pub fn questions(self) -> Vec<String> {
        self.people_also_ask.into_iter().map(|p| p.question).collect()
    }
}

/// Serper API client
pub struct SerperClient {
    client: Client,
    api_key: SecretString,
    config: SearchProviderConfig,
}

impl SerperClient {
    pub fn new(config: SearchProviderConfig, api_key: SecretString) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    async fn request(&self, query: &str) -> std::result::Result<SearchResponse, String> {
        let body = SearchQuery {
            q: query,
            gl: &self.config.country,
            hl: &self.config.language,
            num: self.config.num_results,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("X-API-KEY", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Serper request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Serper error: {}", status));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| format!("Serper response unreadable: {}", e))
    }
}

#[async_trait]
impl QuestionSource for SerperClient {
    async fn fetch(&self, query: &str) -> Fetched<Vec<String>> {
        match self.request(query).await {
            Ok(response) => {
                let questions = response.questions();
                debug!(query, count = questions.len(), "related questions fetched");
                Fetched::Data(questions)
            }
            Err(reason) => {
                warn!(query, %reason, "question fetch degraded");
                Fetched::degraded(format!("{} (query: {})", reason, query))
            }
        }
    }
}
