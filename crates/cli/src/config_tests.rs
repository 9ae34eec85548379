// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::io::Write;

const ENV_VARS: [&str; 10] = [
    "CHEDASH_CONFIG",
    "CHEDASH_URL",
    "CHEDASH_TOKEN",
    "CHEDASH_API_CONTEXT",
    "CHEDASH_WEBSOCKET_CONTEXT",
    "CHEDASH_REGISTRY_URLS",
    "CHEDASH_STATE_DIR",
    "CHEDASH_SETTLE_MS",
    "CHEDASH_START_TIMEOUT_MS",
    "CHEDASH_RECONNECT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_fill_empty_layer() {
    let config = Config::resolve(ConfigLayer {
        state_dir: Some(PathBuf::from("/tmp/state")),
        ..ConfigLayer::default()
    })
    .unwrap();

    assert_eq!(config.url, None);
    assert_eq!(config.api_context, "/api");
    assert_eq!(config.websocket_context, "/api/websocket");
    assert_eq!(config.registry_urls, "");
    assert_eq!(config.loader, LoaderConfig::default());
    assert_eq!(config.reconnect, ReconnectPolicy::Never);
}

#[test]
fn later_layer_wins_field_by_field() {
    let file = ConfigLayer {
        url: Some("https://file.example.com".to_string()),
        token: Some("file-token".to_string()),
        settle_ms: Some(100),
        ..ConfigLayer::default()
    };
    let env = ConfigLayer {
        url: Some("https://env.example.com".to_string()),
        start_timeout_ms: Some(60_000),
        ..ConfigLayer::default()
    };

    let config = Config::resolve(file.merge(env)).unwrap();

    assert_eq!(config.url.as_deref(), Some("https://env.example.com"));
    assert_eq!(config.token.as_deref(), Some("file-token"));
    assert_eq!(config.loader.settle_delay, Duration::from_millis(100));
    assert_eq!(config.loader.start_timeout, Some(Duration::from_secs(60)));
}

#[test]
fn reconnect_policy_is_parsed() {
    let config = Config::resolve(ConfigLayer {
        reconnect: Some("backoff:500:4000".to_string()),
        ..ConfigLayer::default()
    })
    .unwrap();

    assert_eq!(
        config.reconnect,
        ReconnectPolicy::Backoff {
            initial: Duration::from_millis(500),
            max: Duration::from_millis(4000),
        }
    );
}

#[test]
fn bad_reconnect_policy_is_rejected() {
    let err = Config::resolve(ConfigLayer {
        reconnect: Some("sometimes".to_string()),
        ..ConfigLayer::default()
    })
    .unwrap_err();

    assert!(matches!(err, ConfigError::Reconnect(_)));
}

#[test]
fn toml_layer_is_read() {
    let file = write_config(
        r#"
url = "https://che.example.com/dashboard/"
registry_urls = "https://a.example.com/ https://b.example.com/"
settle_ms = 0
"#,
    );

    let layer = ConfigLayer::read(file.path(), true).unwrap();

    assert_eq!(layer.url.as_deref(), Some("https://che.example.com/dashboard/"));
    assert_eq!(
        layer.registry_urls.as_deref(),
        Some("https://a.example.com/ https://b.example.com/")
    );
    assert_eq!(layer.settle_ms, Some(0));
}

#[test]
fn unknown_toml_keys_are_rejected() {
    let file = write_config("colour = \"blue\"\n");

    let err = ConfigLayer::read(file.path(), true).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_optional_file_is_empty_layer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert_eq!(ConfigLayer::read(&path, false).unwrap(), ConfigLayer::default());
    assert!(matches!(
        ConfigLayer::read(&path, true),
        Err(ConfigError::Read { .. })
    ));
}

#[test]
#[serial]
fn environment_overrides_config_file() {
    clear_env();
    let file = write_config("url = \"https://file.example.com\"\ntoken = \"file-token\"\n");
    std::env::set_var("CHEDASH_CONFIG", file.path());
    std::env::set_var("CHEDASH_URL", "https://env.example.com");
    std::env::set_var("CHEDASH_STATE_DIR", "/tmp/chedash-state");
    std::env::set_var("CHEDASH_SETTLE_MS", "250");

    let config = Config::load().unwrap();
    clear_env();

    assert_eq!(config.url.as_deref(), Some("https://env.example.com"));
    assert_eq!(config.token.as_deref(), Some("file-token"));
    assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/chedash-state")));
    assert_eq!(config.loader.settle_delay, Duration::from_millis(250));
}

#[test]
#[serial]
fn empty_environment_values_are_ignored() {
    clear_env();
    std::env::set_var("CHEDASH_TOKEN", "");

    let layer = ConfigLayer::from_env();
    clear_env();

    assert_eq!(layer.token, None);
}
