//! One editorial-plan run, from form submission to workbook bytes.

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::{Credentials, PlannerConfig};
use crate::error::{Error, Result};
use crate::llm::LlmClient;
use crate::planner::assembler::PlanAssembler;
use crate::planner::export;
use crate::planner::ideas::{IdeaGenerator, IdeaSource};
use crate::providers::{KeywordSource, QuestionSource, SemrushClient, SerperClient};
use crate::types::{EditorialRow, KeywordRecord, PlanRequest, Priority, SiteInfo};

/// Run progress, reported to the caller as each stage starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    MainKeywords,
    Competitors,
    Ideas,
    Assembling,
    Exporting,
    Done,
}

impl Stage {
    pub fn percent(&self) -> u8 {
        match self {
            Stage::MainKeywords => 20,
            Stage::Competitors => 40,
            Stage::Ideas => 60,
            Stage::Assembling => 80,
            Stage::Exporting => 90,
            Stage::Done => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::MainKeywords => "Analyzing main site keywords",
            Stage::Competitors => "Analyzing competitors",
            Stage::Ideas => "Generating content ideas",
            Stage::Assembling => "Building the editorial plan",
            Stage::Exporting => "Writing the spreadsheet",
            Stage::Done => "Editorial plan complete",
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct EditorialPlan {
    pub run_id: Uuid,
    pub site: SiteInfo,
    pub rows: Vec<EditorialRow>,
    /// Own keywords followed by each competitor's, in the order supplied
    pub keywords: Vec<KeywordRecord>,
    pub competitors_analyzed: usize,
    pub idea_source: IdeaSource,
    /// Non-fatal problems met along the way
    pub warnings: Vec<String>,
    pub generated_at: NaiveDateTime,
    /// `.xlsx` payload
    pub workbook: Vec<u8>,
    pub file_name: String,
}

impl EditorialPlan {
    pub fn articles(&self) -> usize {
        self.rows.len()
    }

    pub fn keywords_analyzed(&self) -> usize {
        self.keywords.len()
    }

    pub fn high_priority(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.priority == Priority::High)
            .count()
    }

    /// Writes the workbook into `dir` under [`EditorialPlan::file_name`]
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.workbook)?;
        info!(path = %path.display(), bytes = self.workbook.len(), "editorial plan saved");
        Ok(path)
    }
}

/// Session state for generating plans: configured clients and settings
pub struct EditorialPlanner {
    keywords: Arc<dyn KeywordSource>,
    questions: Arc<dyn QuestionSource>,
    ideas: IdeaGenerator,
    keyword_limit: usize,
    pause: Duration,
}

impl EditorialPlanner {
    /// Builds the production clients. Fails before any run if a key is missing.
    pub fn new(config: &PlannerConfig, credentials: &Credentials) -> Result<Self> {
        credentials.validate()?;
        let missing = || Error::Internal("credentials vanished after validation".to_string());

        let semrush_key = credentials.semrush.clone().ok_or_else(missing)?;
        let serper_key = credentials.serper.clone().ok_or_else(missing)?;
        let openai_key = credentials.openai.clone().ok_or_else(missing)?;

        let keywords = SemrushClient::new(config.keywords.clone(), semrush_key)?;
        let questions = SerperClient::new(config.search.clone(), serper_key)?;
        let llm = LlmClient::new(config.llm.clone().with_api_key(openai_key))?;

        Ok(Self::with_sources(
            config,
            Arc::new(keywords),
            Arc::new(questions),
            IdeaGenerator::new(llm),
        ))
    }

    /// Builds a planner around caller-supplied sources
    pub fn with_sources(
        config: &PlannerConfig,
        keywords: Arc<dyn KeywordSource>,
        questions: Arc<dyn QuestionSource>,
        ideas: IdeaGenerator,
    ) -> Self {
        let ideas = if config.plan.prefer_fallback {
            ideas.prefer_fallback(true)
        } else {
            ideas
        };

        Self {
            keywords,
            questions,
            ideas,
            keyword_limit: config.keywords.display_limit,
            pause: config.plan.request_pause(),
        }
    }

    /// Runs the whole pipeline. `progress` is called as each stage begins.
    pub async fn run<F>(&self, request: &PlanRequest, progress: F) -> Result<EditorialPlan>
    where
        F: FnMut(Stage),
    {
        request.validate()?;

        let run_id = Uuid::new_v4();
        let span = info_span!("plan_run", %run_id, site = %request.site.name);
        self.run_validated(run_id, request, progress)
            .instrument(span)
            .await
    }

    async fn run_validated<F>(
        &self,
        run_id: Uuid,
        request: &PlanRequest,
        mut progress: F,
    ) -> Result<EditorialPlan>
    where
        F: FnMut(Stage),
    {
        let site = &request.site;
        let mut warnings = Vec::new();

        progress(Stage::MainKeywords);
        let domain = extract_domain(&site.url);
        info!(%domain, "fetching main site keywords");
        let fetched = self.keywords.fetch(&domain, self.keyword_limit).await;
        if let Some(reason) = fetched.warning() {
            warnings.push(reason.to_string());
        }
        let mut keywords = fetched.into_inner();
        if keywords.is_empty() {
            let message = format!(
                "No keywords found for {}; using example keywords based on the site name",
                domain
            );
            warn!("{}", message);
            warnings.push(message);
            keywords = example_keywords(&site.name, &domain);
        }

        progress(Stage::Competitors);
        let competitors = request.competitor_urls();
        for competitor in &competitors {
            self.pause().await;
            let competitor_domain = extract_domain(competitor);
            info!(domain = %competitor_domain, "fetching competitor keywords");
            let fetched = self.keywords.fetch(&competitor_domain, self.keyword_limit).await;
            if let Some(reason) = fetched.warning() {
                warnings.push(reason.to_string());
            }
            keywords.extend(fetched.into_inner());
        }

        progress(Stage::Ideas);
        let outcome = self.ideas.generate(site, &keywords).await;
        if let IdeaSource::Fallback { reason } = &outcome.source {
            warnings.push(format!("Using the template idea generator: {}", reason));
        }

        progress(Stage::Assembling);
        let assembler = PlanAssembler::new(self.questions.clone(), self.pause);
        let (rows, question_warnings) = assembler.assemble(&keywords, &outcome.ideas).await;
        warnings.extend(question_warnings);

        progress(Stage::Exporting);
        let generated_at = Local::now().naive_local();
        let workbook = export::export_at(&rows, site, generated_at)?;
        let file_name = export::file_name(&site.name, generated_at.date());

        progress(Stage::Done);
        info!(
            rows = rows.len(),
            keywords = keywords.len(),
            warnings = warnings.len(),
            "editorial plan ready"
        );

        Ok(EditorialPlan {
            run_id,
            site: site.clone(),
            rows,
            keywords,
            competitors_analyzed: competitors.len(),
            idea_source: outcome.source,
            warnings,
            generated_at,
            workbook,
            file_name,
        })
    }

    async fn pause(&self) {
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
    }
}

/// Bare host of a site URL: scheme, leading `www.` and path removed
pub fn extract_domain(site_url: &str) -> String {
    let trimmed = site_url.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let host = match url::Url::parse(&with_scheme) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(_) => None,
    };

    let host = host.unwrap_or_else(|| {
        let rest = trimmed.split("://").last().unwrap_or(trimmed);
        rest.split('/').next().unwrap_or(rest).to_lowercase()
    });

    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

/// Stand-in keywords when the main domain has no ranking data
pub fn example_keywords(site_name: &str, domain: &str) -> Vec<KeywordRecord> {
    let name = site_name.trim().to_lowercase();
    vec![
        KeywordRecord::new(name.clone(), "1", "1000", "1.0", domain),
        KeywordRecord::new(format!("{} services", name), "5", "500", "1.5", domain),
        KeywordRecord::new(format!("{} contacts", name), "3", "200", "0.5", domain),
    ]
}
