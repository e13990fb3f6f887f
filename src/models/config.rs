//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CategoryRule, Query};

/// Placeholder substituted with the search term.
const TERM_PLACEHOLDER: &str = "{term}";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identifier searched for on every engine
    #[serde(default = "defaults::search_term")]
    pub search_term: String,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Report rendering settings
    #[serde(default)]
    pub report: ReportConfig,

    /// One query template per search engine, in sweep order
    #[serde(default = "defaults::queries")]
    pub queries: Vec<QueryConfig>,

    /// Ordered allow/deny rules
    #[serde(default = "defaults::rules")]
    pub rules: Vec<RuleConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, or return the default if the file does not exist.
    ///
    /// Any other failure, including a TOML syntax error, is returned.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(&path) {
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No config at {:?}. Using defaults.", path.as_ref());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Validate configuration values, compiling every pattern once.
    pub fn validate(&self) -> Result<()> {
        if self.search_term.trim().is_empty() {
            return Err(AppError::validation("search_term is empty"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_pages == 0 {
            return Err(AppError::validation("crawler.max_pages must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.queries.is_empty() {
            return Err(AppError::validation("No queries defined"));
        }

        let mut engines = HashSet::new();
        for query in &self.queries {
            if !engines.insert(query.engine.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate engine name: {}",
                    query.engine
                )));
            }
        }

        self.queries()?;
        self.category_rules()?;
        self.signature()?;
        Ok(())
    }

    /// Expand query templates into absolute URLs.
    pub fn queries(&self) -> Result<Vec<Query>> {
        let term = urlencoding::encode(&self.search_term);
        self.queries
            .iter()
            .map(|q| {
                let url = q.url.replace(TERM_PLACEHOLDER, &term);
                Url::parse(&url).map_err(|e| {
                    AppError::config(format!("Query URL for {} is invalid: {e}", q.engine))
                })?;
                Ok(Query::new(&q.engine, url))
            })
            .collect()
    }

    /// Compile the configured rules, expanding `{term}`.
    pub fn category_rules(&self) -> Result<Vec<CategoryRule>> {
        let escaped = regex::escape(&self.search_term);
        self.rules
            .iter()
            .map(|r| {
                CategoryRule::new(
                    r.name.replace(TERM_PLACEHOLDER, &self.search_term),
                    &r.pattern.replace(TERM_PLACEHOLDER, &escaped),
                    r.allowed,
                    &r.description,
                )
            })
            .collect()
    }

    /// Compile the No-Category signature pattern.
    pub fn signature(&self) -> Result<Regex> {
        Regex::new(&self.report.signature_pattern)
            .map_err(|e| AppError::pattern("report.signature_pattern", e))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_term: defaults::search_term(),
            crawler: CrawlerConfig::default(),
            report: ReportConfig::default(),
            queries: defaults::queries(),
            rules: defaults::rules(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Upper bound of the random pause between requests, in microseconds
    #[serde(default = "defaults::jitter_micros")]
    pub jitter_micros: u64,

    /// Maximum number of follow-up pages per query
    #[serde(default = "defaults::max_pages")]
    pub max_pages: usize,

    /// Maximum engines swept at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Response cache directory; caching is off when unset
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Age after which cached responses are refetched; never when unset
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            jitter_micros: defaults::jitter_micros(),
            max_pages: defaults::max_pages(),
            max_concurrent: defaults::max_concurrent(),
            cache_dir: None,
            cache_ttl_secs: None,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// Directory receiving `report.<ext>` and `queries.<ext>`
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// Pattern seeding the "No Category" bucket
    #[serde(default = "defaults::signature_pattern")]
    pub signature_pattern: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            output_dir: defaults::output_dir(),
            signature_pattern: defaults::signature_pattern(),
        }
    }
}

/// Rendered report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl ReportFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// A query template for one engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub engine: String,

    /// Search URL; `{term}` is replaced by the encoded search term
    pub url: String,
}

/// A category rule as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,

    /// Regular expression; `{term}` is replaced by the escaped search term
    pub pattern: String,

    pub allowed: bool,

    #[serde(default)]
    pub description: String,
}

mod defaults {
    use std::path::PathBuf;

    use super::{QueryConfig, RuleConfig};

    pub fn search_term() -> String {
        "example".into()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; linkhound/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn jitter_micros() -> u64 {
        30
    }
    pub fn max_pages() -> usize {
        100
    }
    pub fn max_concurrent() -> usize {
        3
    }

    // Report defaults
    pub fn output_dir() -> PathBuf {
        PathBuf::from("reports")
    }
    pub fn signature_pattern() -> String {
        r"sendgrid\.net/".into()
    }

    pub fn queries() -> Vec<QueryConfig> {
        vec![
            QueryConfig {
                engine: "Google".to_string(),
                url: "https://www.google.com/search?q=site%3A{term}&start=".to_string(),
            },
            QueryConfig {
                engine: "Bing".to_string(),
                url: "https://www.bing.com/search?q=site%3A{term}&start=".to_string(),
            },
            QueryConfig {
                engine: "DuckDuckGo".to_string(),
                url: "https://www.duckduckgo.com/html/?q=site%3A{term}".to_string(),
            },
        ]
    }

    pub fn rules() -> Vec<RuleConfig> {
        vec![
            RuleConfig {
                name: "{term}".to_string(),
                pattern: "{term}".to_string(),
                allowed: true,
                description: "links mentioning the search term".to_string(),
            },
            RuleConfig {
                name: "webcache".to_string(),
                pattern: "webcache".to_string(),
                allowed: false,
                description: "search engine cache copies".to_string(),
            },
        ]
    }
}
