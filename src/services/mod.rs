//! Service layer for the sweep pipeline.
//!
//! This module contains the business logic for:
//! - Result pagination (`Paginator`)
//! - Link collection (`LinkCollector`)
//! - URL normalization (`normalizer`)
//! - Rule-based classification (`Classifier`)
//! - Report rendering (`ReportRenderer`)

mod classifier;
mod collector;
pub mod normalizer;
mod paginator;
mod report;

pub use classifier::{Classifier, DEFAULT_SIGNATURE};
pub use collector::LinkCollector;
pub use normalizer::normalize;
pub use paginator::Paginator;
pub use report::ReportRenderer;
