//! # seo-editorial-planner
//!
//! Builds an SEO editorial calendar for a website: ranked keywords for the site
//! and its competitors, article ideas drafted by a language model (or a
//! template generator when the model is unavailable), related search questions
//! per idea, and a two-sheet spreadsheet ready for download.

pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod planner;
pub mod providers;
pub mod types;

pub use config::{Credentials, PlannerConfig};
pub use error::{Error, Result};
pub use planner::{EditorialPlan, EditorialPlanner, Stage};
pub use types::{ContentIdea, EditorialRow, Fetched, KeywordRecord, PlanRequest, Priority, SiteInfo};
