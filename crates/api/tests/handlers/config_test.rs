use std::collections::HashMap;

use jamroom_api::config::ApiConfig;
use jamroom_core::offset::StorageOffset;
use pretty_assertions::assert_eq;
use tracing::Level;

fn config_from(pairs: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    ApiConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[("DATABASE_URL", "postgres://localhost/jamroom")]).unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.storage_offset(), StorageOffset::default());
    assert_eq!(config.slot_cache_ttl_seconds, 30);
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/jamroom"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://localhost:3001, https://rooms.example.com,"),
        ("STORAGE_OFFSET_MINUTES", "0"),
        ("SLOT_CACHE_TTL_SECONDS", "5"),
    ])
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:3001".to_string(),
            "https://rooms.example.com".to_string(),
        ])
    );
    assert_eq!(config.storage_offset(), StorageOffset::from_minutes(0));
    assert_eq!(config.slot_cache_ttl().as_secs(), 5);
}

#[test]
fn test_missing_database_url_fails() {
    assert!(config_from(&[]).is_err());
}

#[test]
fn test_invalid_values_fail() {
    assert!(config_from(&[("DATABASE_URL", "postgres://x"), ("API_PORT", "http")]).is_err());
    assert!(
        config_from(&[("DATABASE_URL", "postgres://x"), ("STORAGE_OFFSET_MINUTES", "5.5h")])
            .is_err()
    );
    assert!(config_from(&[
        ("DATABASE_URL", "postgres://x"),
        ("STORAGE_OFFSET_MINUTES", "9223372036854775807"),
    ])
    .is_err());
}
