//! Data model shared by the planner stages.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of competitor URLs accepted per run
pub const MAX_COMPETITORS: usize = 3;

/// User-supplied description of the site a plan is built for
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteInfo {
    /// Site name
    pub name: String,
    /// Site URL (scheme optional)
    pub url: String,
    /// "About us" description
    pub about: String,
    /// Goals the articles should serve
    pub goals: String,
    /// Topics the articles must not cover
    #[serde(default)]
    pub avoid_topics: String,
}

/// One ranked search term with the provider's metrics.
///
/// Numeric fields stay text: the provider's formatting is carried verbatim
/// into the exported sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordRecord {
    pub keyword: String,
    pub position: String,
    pub volume: String,
    pub cpc: String,
    /// Domain the record was fetched for
    pub source: String,
}

impl KeywordRecord {
    pub fn new(
        keyword: impl Into<String>,
        position: impl Into<String>,
        volume: impl Into<String>,
        cpc: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            position: position.into(),
            volume: volume.into(),
            cpc: cpc.into(),
            source: source.into(),
        }
    }
}

/// One proposed article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentIdea {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub target_keywords: Vec<String>,
}

/// Editorial priority, assigned by row position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Priority of the row at `index` (0-based)
    pub fn for_index(index: usize) -> Self {
        match index {
            0..=4 => Priority::High,
            5..=9 => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One finalized, exportable plan entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditorialRow {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub questions: String,
    pub objective: String,
    pub priority: Priority,
    pub suggested_date: String,
}

impl EditorialRow {
    /// Column headers, in export order
    pub const HEADERS: [&'static str; 7] = [
        "Article Title",
        "Description",
        "Target Keywords",
        "People Also Ask",
        "Article Objective",
        "Priority",
        "Suggested Date",
    ];

    /// Cell values in the same order as [`EditorialRow::HEADERS`]
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.title,
            &self.description,
            &self.keywords,
            &self.questions,
            &self.objective,
            self.priority.label(),
            &self.suggested_date,
        ]
    }
}

/// Outcome of a call to an external provider.
///
/// Providers never fail a run: a transport or status error becomes
/// `Degraded` carrying the reason, and callers continue with empty data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Data(T),
    Degraded { reason: String },
}

impl<T> Fetched<T> {
    pub fn degraded(reason: impl Into<String>) -> Self {
        Fetched::Degraded {
            reason: reason.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Fetched::Degraded { .. })
    }

    /// Reason for degradation, if any
    pub fn warning(&self) -> Option<&str> {
        match self {
            Fetched::Data(_) => None,
            Fetched::Degraded { reason } => Some(reason),
        }
    }
}

impl<T: Default> Fetched<T> {
    /// The fetched value, or the empty value when degraded
    pub fn into_inner(self) -> T {
        match self {
            Fetched::Data(value) => value,
            Fetched::Degraded { .. } => T::default(),
        }
    }
}

/// Everything the form collects for one run
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    pub site: SiteInfo,
    pub competitors: Vec<String>,
}

impl PlanRequest {
    pub fn new(site: SiteInfo) -> Self {
        Self {
            site,
            competitors: Vec::new(),
        }
    }

    pub fn with_competitor(mut self, url: impl Into<String>) -> Self {
        self.competitors.push(url.into());
        self
    }

    /// Competitor entries with blanks dropped, trimmed, in the order given
    pub fn competitor_urls(&self) -> Vec<&str> {
        self.competitors
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Checks required fields before any outbound call is made
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("site name", &self.site.name),
            ("site URL", &self.site.url),
            ("about description", &self.site.about),
            ("goals", &self.site.goals),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::MissingField(field));
            }
        }

        let given = self.competitor_urls().len();
        if given > MAX_COMPETITORS {
            return Err(Error::TooManyCompetitors {
                given,
                max: MAX_COMPETITORS,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteInfo {
        SiteInfo {
            name: "Acme".to_string(),
            url: "https://acme.test".to_string(),
            about: "We sell anvils".to_string(),
            goals: "More leads".to_string(),
            avoid_topics: String::new(),
        }
    }

    #[test]
    fn test_priority_is_positional() {
        let labels: Vec<_> = (0..15).map(|i| Priority::for_index(i).label()).collect();
        assert_eq!(&labels[..5], &["High"; 5]);
        assert_eq!(&labels[5..10], &["Medium"; 5]);
        assert_eq!(&labels[10..], &["Low"; 5]);
    }

    #[test]
    fn test_request_requires_fields() {
        let mut request = PlanRequest::new(site());
        assert!(request.validate().is_ok());

        request.site.goals = "   ".to_string();
        match request.validate() {
            Err(Error::MissingField(field)) => assert_eq!(field, "goals"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_request_ignores_blank_competitors() {
        let request = PlanRequest::new(site())
            .with_competitor(" a.test ")
            .with_competitor("")
            .with_competitor("b.test");
        assert_eq!(request.competitor_urls(), vec!["a.test", "b.test"]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_fourth_competitor() {
        let request = PlanRequest::new(site())
            .with_competitor("a.test")
            .with_competitor("b.test")
            .with_competitor("c.test")
            .with_competitor("d.test");
        assert!(matches!(
            request.validate(),
            Err(Error::TooManyCompetitors { given: 4, max: 3 })
        ));
    }

    #[test]
    fn test_degraded_fetch_yields_empty() {
        let fetched: Fetched<Vec<String>> = Fetched::degraded("HTTP 403");
        assert_eq!(fetched.warning(), Some("HTTP 403"));
        assert!(fetched.into_inner().is_empty());
    }
}
