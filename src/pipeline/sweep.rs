// src/pipeline/sweep.rs

//! Full sweep: discovery followed by filtering.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::{Config, SweepReport};
use crate::services::{Classifier, ReportRenderer};

use super::discover::run_discovery;
use super::filter::run_filter;

/// Run the whole pipeline for every configured query.
pub async fn run_sweep(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Result<SweepReport> {
    config.validate()?;

    let queries = config.queries()?;
    let classifier = Classifier::with_signature(config.category_rules()?, config.signature()?);
    let renderer = ReportRenderer::new(config.report.format);

    log::info!("Step 1/2: Discovering links for '{}'", config.search_term);
    let discovery = run_discovery(fetcher, &config.crawler, &queries).await;
    log::info!(
        "Discovered {} raw URLs from {} engines ({} failed)",
        discovery.urls.len(),
        discovery.engine_total,
        discovery.engine_failures
    );

    log::info!("Step 2/2: Filtering links");
    let filtered = run_filter(&discovery.urls, &classifier, &renderer)?;

    Ok(SweepReport {
        queries,
        categories: filtered.categories,
        rendered: filtered.rendered,
        generated_at: Utc::now(),
    })
}

/// Write `report.<ext>` and `queries.<ext>` into `dir`.
///
/// Returns the paths written, report first.
pub async fn save_report(
    report: &SweepReport,
    renderer: &ReportRenderer,
    dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    tokio::fs::create_dir_all(dir).await?;
    let ext = renderer.format().extension();

    let report_path = dir.join(format!("report.{ext}"));
    tokio::fs::write(&report_path, &report.rendered).await?;

    let queries_path = dir.join(format!("queries.{ext}"));
    tokio::fs::write(&queries_path, renderer.render_queries(&report.queries)?).await?;

    Ok((report_path, queries_path))
}
