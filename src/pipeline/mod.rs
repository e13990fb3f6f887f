//! Pipeline entry points.
//!
//! - `run_discovery`: Paginate every query and collect raw links
//! - `run_filter`: Normalize, classify and render collected links
//! - `run_sweep`: Both stages, producing a `SweepReport`

pub mod discover;
pub mod filter;
pub mod sweep;

pub use discover::{DiscoveryOutcome, run_discovery, sweep_engine};
pub use filter::{FilterOutcome, run_filter};
pub use sweep::{run_sweep, save_report};
