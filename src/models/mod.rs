// src/models/mod.rs

//! Domain models for the sweep pipeline.

mod category;
mod config;
mod query;

// Re-export all public types
pub use category::{CategoryResult, CategoryRule, NO_CATEGORY};
pub use config::{Config, CrawlerConfig, QueryConfig, ReportConfig, ReportFormat, RuleConfig};
pub use query::{Anchor, Query};

/// Output of a full sweep, handed to report delivery.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SweepReport {
    /// Queries the URLs were gathered from
    pub queries: Vec<Query>,
    /// Classified URLs, "No Category" last
    pub categories: Vec<CategoryResult>,
    /// Categories rendered in the configured format
    pub rendered: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
