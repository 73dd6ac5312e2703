//! Configuration builder and file-loading behavior.

use corpuscrawl::{DEFAULT_ALLOWED_TEXT_PATTERN, HarvestConfig};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn builder_applies_defaults() {
    let config = HarvestConfig::builder()
        .storage_dir("/tmp/harvest")
        .site("Example", "https://example.test")
        .build()
        .expect("valid config");

    assert_eq!(config.max_concurrency(), 8);
    assert_eq!(config.page_limit_per_site(), 1_000);
    assert_eq!(config.request_delay(), Duration::from_millis(500));
    assert_eq!(config.min_word_count(), 30);
    assert_eq!(config.allowed_text_pattern(), DEFAULT_ALLOWED_TEXT_PATTERN);
    assert!(config.headless());
}

#[test]
fn derived_paths_live_under_the_storage_dir() {
    let config = HarvestConfig::builder()
        .storage_dir("/data/harvest")
        .build()
        .expect("valid config");

    assert_eq!(
        config.raw_pages_dir(),
        std::path::Path::new("/data/harvest/raw_pages")
    );
    assert_eq!(
        config.checkpoint_path(),
        std::path::Path::new("/data/harvest/checkpoint.json")
    );
    assert_eq!(
        config.corpus_path(),
        std::path::Path::new("/data/harvest/corpus.txt")
    );
}

#[test]
fn duplicate_site_names_are_rejected() {
    let result = HarvestConfig::builder()
        .storage_dir("/tmp/harvest")
        .site("Example", "https://a.test")
        .site("Example", "https://b.test")
        .build();
    assert!(result.is_err());
}

#[test]
fn zero_concurrency_is_rejected() {
    let result = HarvestConfig::builder()
        .storage_dir("/tmp/harvest")
        .max_concurrency(0)
        .build();
    assert!(result.is_err());
}

#[test]
fn invalid_text_pattern_is_rejected() {
    let result = HarvestConfig::builder()
        .storage_dir("/tmp/harvest")
        .allowed_text_pattern("[unclosed")
        .build();
    assert!(result.is_err());
}

#[test]
fn config_loads_from_a_json_file_with_defaults() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("harvest.json");
    std::fs::write(
        &path,
        r#"{
            "storage_dir": "/data/harvest",
            "sites": [
                {"name": "Wikipedia Ar", "seed_url": "https://ar.wikipedia.test"},
                {"name": "News", "seed_url": "https://news.test"}
            ],
            "max_concurrency": 2
        }"#,
    )
    .expect("config written");

    let config = HarvestConfig::from_file(&path).expect("config loads");
    assert_eq!(config.sites().len(), 2);
    assert_eq!(config.sites()[0].name, "Wikipedia Ar");
    assert_eq!(config.max_concurrency(), 2);
    // Unspecified knobs fall back to their defaults.
    assert_eq!(config.page_limit_per_site(), 1_000);
    assert!(config.headless());
}

#[test]
fn file_with_duplicate_sites_fails_validation() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("harvest.json");
    std::fs::write(
        &path,
        r#"{
            "storage_dir": "/data/harvest",
            "sites": [
                {"name": "Same", "seed_url": "https://a.test"},
                {"name": "Same", "seed_url": "https://b.test"}
            ]
        }"#,
    )
    .expect("config written");

    assert!(HarvestConfig::from_file(&path).is_err());
}
