//! Post-crawl corpus assembly: normalization, value filtering and merging.

pub mod merger;
pub mod normalizer;
pub mod value_filter;

pub use merger::{MergeSummary, Merger};
pub use normalizer::TextNormalizer;
pub use value_filter::ValueFilter;
