//! Tests for client configuration loading.

use pong_turns::ClientConfig;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_full_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
server_url = "http://scores.local:8080"
player = "anna"
hit_delay_ms = 0
outcome_delay_ms = 100
format_change_delay_ms = 2000
prefer_async = true
"#
    )
    .expect("write config");

    let config = ClientConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config.server_url(), "http://scores.local:8080");
    assert_eq!(config.player(), "anna");
    assert!(config.prefer_async());

    let delays = config.delays();
    assert_eq!(delays.hit, Duration::ZERO);
    assert_eq!(delays.outcome, Duration::from_millis(100));
    assert_eq!(delays.format_change, Duration::from_millis(2000));
}

#[test]
fn test_missing_keys_take_defaults() {
    let config = ClientConfig::from_toml(r#"player = "bruno""#).expect("valid config");
    assert_eq!(config.player(), "bruno");
    assert_eq!(config.server_url(), ClientConfig::default().server_url());
    assert_eq!(config.delays(), pong_turns::SubmitDelays::default());
    assert!(!config.prefer_async());
}

#[test]
fn test_empty_player_is_rejected() {
    let error = ClientConfig::from_toml(r#"player = "  ""#).expect_err("empty player");
    assert!(error.message.contains("player"));
}

#[test]
fn test_malformed_toml_is_rejected() {
    assert!(ClientConfig::from_toml("player = ").is_err());
}

#[test]
fn test_missing_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = ClientConfig::from_file(dir.path().join("absent.toml")).expect_err("missing file");
    assert!(error.message.contains("Failed to read config file"));
}

#[test]
fn test_overrides_replace_non_empty_values() {
    let config = ClientConfig::default().with_overrides(Some("http://other:5000".to_string()), Some(String::new()));
    assert_eq!(config.server_url(), "http://other:5000");
    assert_eq!(config.player(), ClientConfig::default().player());
}
