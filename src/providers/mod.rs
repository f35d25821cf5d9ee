//! Clients for the external data providers.
//!
//! Both clients swallow their own failures and return
//! [`Fetched::Degraded`](crate::types::Fetched) so a run always continues.

pub mod keywords;
pub mod search;

pub use keywords::{parse_keyword_table, KeywordSource, SemrushClient};
pub use search::{QuestionSource, SerperClient};
