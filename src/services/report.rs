//! Report rendering.

use std::fmt::Write as _;

use crate::error::Result;
use crate::models::{CategoryResult, Query, ReportFormat};

const QUERY_SUMMARY_HEADER: &str =
    "Attached to this email are results from crawling these search engines:";

/// Renders classification results and the query summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    format: ReportFormat,
}

impl ReportRenderer {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// One section per category, in the given order. Empty categories
    /// still get a header.
    pub fn render(&self, categories: &[CategoryResult]) -> Result<String> {
        let mut out = String::new();
        match self.format {
            ReportFormat::Html => {
                for category in categories {
                    let _ = writeln!(out, "<HR>");
                    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&category.name));
                    for url in &category.urls {
                        let _ = writeln!(out, "\t<p>{}</p>", escape_html(url));
                    }
                }
            }
            ReportFormat::Text => {
                for (i, category) in categories.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    let _ = writeln!(out, "== {} ==", category.name);
                    if !category.description.is_empty() {
                        let _ = writeln!(out, "{}", category.description);
                    }
                    for url in &category.urls {
                        let _ = writeln!(out, "{url}");
                    }
                }
            }
            ReportFormat::Json => out = serde_json::to_string_pretty(categories)?,
        }
        Ok(out)
    }

    /// Summary of the queries a report was built from.
    pub fn render_queries(&self, queries: &[Query]) -> Result<String> {
        let mut out = String::new();
        match self.format {
            ReportFormat::Html => {
                let _ = writeln!(out, "{QUERY_SUMMARY_HEADER}");
                for q in queries {
                    let _ = writeln!(
                        out,
                        "\t<p>{}: {}</p>",
                        escape_html(&q.engine),
                        escape_html(&q.url)
                    );
                }
            }
            ReportFormat::Text => {
                let _ = writeln!(out, "{QUERY_SUMMARY_HEADER}");
                for q in queries {
                    let _ = writeln!(out, "{}: {}", q.engine, q.url);
                }
            }
            ReportFormat::Json => out = serde_json::to_string_pretty(queries)?,
        }
        Ok(out)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
