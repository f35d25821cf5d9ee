//! SEMrush keyword client
//!
//! Reads the `domain_organic` report: a newline-delimited, semicolon-separated
//! table whose first line is a header.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::KeywordProviderConfig;
use crate::error::Result;
use crate::types::{Fetched, KeywordRecord};

/// Source of ranked keywords for a domain
#[async_trait]
pub trait KeywordSource: Send + Sync {
    /// Fetches up to `limit` keywords for `domain`. Never fails: errors degrade.
    async fn fetch(&self, domain: &str, limit: usize) -> Fetched<Vec<KeywordRecord>>;
}

/// SEMrush API client
pub struct SemrushClient {
    client: Client,
    api_key: SecretString,
    config: KeywordProviderConfig,
}

impl SemrushClient {
    pub fn new(config: KeywordProviderConfig, api_key: SecretString) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    async fn request(&self, domain: &str, limit: usize) -> std::result::Result<String, String> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("type", "domain_organic"),
                ("key", self.api_key.expose_secret()),
                ("display_limit", limit.as_str()),
                ("domain", domain),
                ("database", self.config.database.as_str()),
                ("export_columns", self.config.export_columns.as_str()),
            ])
            .send()
            .await
            .map_err(|e| format!("SEMrush request failed: {}", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("SEMrush error: {}", status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| format!("SEMrush body unreadable: {}", e.without_url()))?;

        // quota, auth and "nothing found" errors arrive as 200 with an ERROR line
        if let Some(message) = report_error(&body) {
            return Err(format!("SEMrush error: {}", message));
        }
        Ok(body)
    }
}

#[async_trait]
impl KeywordSource for SemrushClient {
    async fn fetch(&self, domain: &str, limit: usize) -> Fetched<Vec<KeywordRecord>> {
        match self.request(domain, limit).await {
            Ok(body) => {
                let records = parse_keyword_table(&body, domain);
                debug!(domain, count = records.len(), "keywords fetched");
                Fetched::Data(records)
            }
            Err(reason) => {
                warn!(domain, %reason, "keyword fetch degraded");
                Fetched::degraded(format!("{} ({})", reason, domain))
            }
        }
    }
}

/// The message of an `ERROR <code> :: <text>` report body, if it is one
pub fn report_error(body: &str) -> Option<&str> {
    let body = body.trim();
    if body.starts_with("ERROR") {
        Some(body.lines().next().unwrap_or(body).trim())
    } else {
        None
    }
}

/// Parses a report body. Rows with fewer than 4 fields are dropped.
pub fn parse_keyword_table(body: &str, source: &str) -> Vec<KeywordRecord> {
    body.trim()
        .split('\n')
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.trim_end_matches('\r').split(';').collect();
            if parts.len() >= 4 {
                Some(KeywordRecord::new(parts[0], parts[1], parts[2], parts[3], source))
            } else {
                None
            }
        })
        .collect()
}
