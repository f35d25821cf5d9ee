use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::llm::LlmConfig;
use crate::logging::LogConfig;

/// Planner settings. API keys live in [`Credentials`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub keywords: KeywordProviderConfig,
    #[serde(default)]
    pub search: SearchProviderConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// SEMrush `domain_organic` report settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordProviderConfig {
    pub base_url: String,
    /// Regional keyword database
    pub database: String,
    /// Keywords requested per domain
    pub display_limit: usize,
    pub export_columns: String,
    pub timeout_seconds: u64,
}

impl Default for KeywordProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.semrush.com/".to_string(),
            database: "it".to_string(),
            display_limit: 50,
            export_columns: "Ph,Po,Nq,Cp,Ur,Tr,Tc,Co,Nr,Td".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Serper search settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchProviderConfig {
    pub base_url: String,
    /// Country code (`gl`)
    pub country: String,
    /// Interface language (`hl`)
    pub language: String,
    /// Results requested per query
    pub num_results: u32,
    pub timeout_seconds: u64,
}

impl Default for SearchProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://google.serper.dev/search".to_string(),
            country: "it".to_string(),
            language: "it".to_string(),
            num_results: 10,
            timeout_seconds: 30,
        }
    }
}

/// Run behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanConfig {
    /// Pause between successive provider calls (milliseconds)
    pub request_pause_ms: u64,
    /// Skip the model and use the template generator
    pub prefer_fallback: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            request_pause_ms: 1000,
            prefer_fallback: false,
        }
    }
}

impl PlanConfig {
    pub fn request_pause(&self) -> Duration {
        Duration::from_millis(self.request_pause_ms)
    }
}

/// API keys for the three providers, held in memory for one session only
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai: Option<SecretString>,
    pub semrush: Option<SecretString>,
    pub serper: Option<SecretString>,
}

impl Credentials {
    pub fn new(
        openai: Option<String>,
        semrush: Option<String>,
        serper: Option<String>,
    ) -> Self {
        let secret = |v: Option<String>| {
            v.filter(|k| !k.trim().is_empty())
                .map(|k| SecretString::new(k.into_boxed_str()))
        };
        Self {
            openai: secret(openai),
            semrush: secret(semrush),
            serper: secret(serper),
        }
    }

    /// Fails listing every missing key
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = [
            ("OpenAI", &self.openai),
            ("SEMrush", &self.semrush),
            ("Serper", &self.serper),
        ]
        .into_iter()
        .filter(|(_, key)| key.as_ref().map_or(true, |k| k.expose_secret().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingCredentials(missing))
        }
    }
}

const CONFIG_PATHS: [&str; 2] = ["planner.toml", "config/planner.toml"];

impl PlannerConfig {
    /// Loads defaults, then a TOML file, then `PLANNER__*` environment overrides.
    ///
    /// With no explicit path the first existing file of `planner.toml`,
    /// `config/planner.toml` is used, if any.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let default_config = PlannerConfig::default();
        settings = settings.add_source(config::Config::try_from(&default_config)?);

        let file: Option<PathBuf> = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::Config(format!(
                        "config file not found: {}",
                        p.display()
                    )));
                }
                Some(p.to_path_buf())
            }
            None => CONFIG_PATHS
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists()),
        };

        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "loading config file");
            settings = settings.add_source(config::File::from(file.as_path()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("PLANNER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: PlannerConfig = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the providers rely on
    pub fn validate(&self) -> Result<()> {
        if self.keywords.display_limit == 0 {
            return Err(Error::Config(
                "keywords.display_limit must be at least 1".to_string(),
            ));
        }
        for (name, base) in [
            ("keywords.base_url", &self.keywords.base_url),
            ("search.base_url", &self.search.base_url),
        ] {
            url::Url::parse(base)
                .map_err(|e| Error::Config(format!("{} is not a valid URL: {}", name, e)))?;
        }
        Ok(())
    }

    /// Renders a commented sample config file
    pub fn sample_toml() -> Result<String> {
        let body = toml::to_string_pretty(&PlannerConfig::default())
            .map_err(|e| Error::Internal(e.to_string()))?;

        Ok(format!(
            r#"# SEO editorial planner configuration
#
# Save as planner.toml (or config/planner.toml), or pass --config <path>.
# Every key can be overridden from the environment, e.g.
#   PLANNER__PLAN__REQUEST_PAUSE_MS=0
#   PLANNER__LLM__DEFAULT_MODEL=gpt-4o
#
# API keys never go in this file. Pass them with --openai-key, --semrush-key,
# --serper-key or the OPENAI_API_KEY, SEMRUSH_API_KEY, SERPER_API_KEY variables.

{}"#,
            body
        ))
    }

    /// Writes [`PlannerConfig::sample_toml`] to `path`
    pub fn write_sample(path: &Path) -> Result<()> {
        std::fs::write(path, Self::sample_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.keywords.display_limit, 50);
        assert_eq!(config.keywords.database, "it");
        assert_eq!(config.search.num_results, 10);
        assert_eq!(config.plan.request_pause(), Duration::from_secs(1));
        assert_eq!(config.llm.default_model, "gpt-4");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        std::fs::write(
            &path,
            r#"
[plan]
request_pause_ms = 0
prefer_fallback = true

[keywords]
display_limit = 20
"#,
        )
        .unwrap();

        let config = PlannerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.plan.request_pause_ms, 0);
        assert!(config.plan.prefer_fallback);
        assert_eq!(config.keywords.display_limit, 20);
        // untouched sections keep their defaults
        assert_eq!(config.keywords.database, "it");
        assert_eq!(config.search.base_url, "https://google.serper.dev/search");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlannerConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = PlannerConfig::default();
        config.search.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_report_every_missing_key() {
        let creds = Credentials::new(Some("sk".into()), None, Some("  ".into()));
        match creds.validate() {
            Err(Error::MissingCredentials(missing)) => {
                assert_eq!(missing, vec!["SEMrush", "Serper"]);
            }
            other => panic!("unexpected: {:?}", other),
        }

        let creds = Credentials::new(Some("a".into()), Some("b".into()), Some("c".into()));
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = PlannerConfig::sample_toml().unwrap();
        assert!(sample.contains("[plan]"));
        let parsed: PlannerConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.plan.request_pause_ms, 1000);
    }
}
