//! Run configuration: the site list and every crawl/merge knob, built once
//! and handed to the orchestrator.

pub mod builder;
mod types;

pub use builder::HarvestConfigBuilder;
pub use types::{DEFAULT_ALLOWED_TEXT_PATTERN, HarvestConfig, SiteSpec};
