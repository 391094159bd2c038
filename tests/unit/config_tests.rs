//! Unit tests for tracker configuration parsing and credential fallback.

use jiralog::config::{TrackerConfig, KEY_ENV_VAR};
use jiralog::AppError;

fn sample_toml() -> &'static str {
    r#"
Username = "dev@example.com"
Key = "secret-token"
Baseurl = "https://tracker.example.com/rest/api/2/"
Prefix = "BLAH"
"#
}

#[test]
fn parses_valid_config() {
    let config = TrackerConfig::from_toml_str(sample_toml()).expect("config parses");

    assert_eq!(config.username, "dev@example.com");
    assert_eq!(config.key, "secret-token");
    assert_eq!(config.prefix, "BLAH");
    assert_eq!(config.utcoffset, "+05:30");
}

#[test]
fn trailing_slash_is_trimmed_from_baseurl() {
    let config = TrackerConfig::from_toml_str(sample_toml()).expect("config parses");
    assert_eq!(config.baseurl, "https://tracker.example.com/rest/api/2");
    assert_eq!(
        config.worklog_url("BLAH-7"),
        "https://tracker.example.com/rest/api/2/issue/BLAH-7/worklog"
    );
}

#[test]
fn default_zone_is_plus_five_thirty() {
    let config = TrackerConfig::from_toml_str(sample_toml()).expect("config parses");
    assert_eq!(config.zone().local_minus_utc(), 5 * 3600 + 30 * 60);
}

#[test]
fn unparsable_offset_falls_back_to_utc() {
    let toml = format!("{}Utcoffset = \"Mars/Olympus\"\n", sample_toml());
    let config = TrackerConfig::from_toml_str(&toml).expect("config parses");
    assert_eq!(config.zone().local_minus_utc(), 0);
}

#[test]
fn explicit_offset_is_used() {
    let toml = format!("{}Utcoffset = \"-03:00\"\n", sample_toml());
    let config = TrackerConfig::from_toml_str(&toml).expect("config parses");
    assert_eq!(config.zone().local_minus_utc(), -3 * 3600);
}

#[test]
fn missing_required_key_is_config_error() {
    let toml = r#"
Username = "dev@example.com"
Key = "secret-token"
Prefix = "BLAH"
"#;
    let err = TrackerConfig::from_toml_str(toml).expect_err("Baseurl is required");
    assert!(matches!(err, AppError::Config(_)), "{err:?}");
}

#[test]
fn malformed_toml_is_config_error() {
    let err = TrackerConfig::from_toml_str("Username = ").expect_err("invalid toml");
    assert!(err.to_string().starts_with("config:"), "{err}");
}

#[test]
fn empty_prefix_is_rejected() {
    let toml = r#"
Username = "dev@example.com"
Key = "secret-token"
Baseurl = "https://tracker.example.com"
Prefix = "  "
"#;
    let err = TrackerConfig::from_toml_str(toml).expect_err("empty prefix");
    assert!(err.to_string().contains("Prefix"), "{err}");
}

#[test]
fn missing_file_is_config_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let err = TrackerConfig::load_from_path(temp.path().join("absent.toml"))
        .expect_err("missing file");
    assert!(err.to_string().contains("failed to read config"), "{err}");
}

#[test]
fn loads_from_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("config.toml");
    std::fs::write(&path, sample_toml()).expect("write config");

    let config = TrackerConfig::load_from_path(&path).expect("config loads");
    assert_eq!(config.prefix, "BLAH");
}

/// NOTE: mutates process-global env vars and must run serially.
#[test]
#[serial_test::serial]
#[allow(unsafe_code)]
fn missing_key_falls_back_to_env_var() {
    let toml = r#"
Username = "dev@example.com"
Baseurl = "https://tracker.example.com"
Prefix = "BLAH"
"#;

    unsafe {
        std::env::set_var(KEY_ENV_VAR, "from-env");
    }
    let result = TrackerConfig::from_toml_str(toml);
    unsafe {
        std::env::remove_var(KEY_ENV_VAR);
    }

    assert_eq!(result.expect("config parses").key, "from-env");
}

#[test]
#[serial_test::serial]
#[allow(unsafe_code)]
fn missing_key_without_env_var_is_config_error() {
    let toml = r#"
Username = "dev@example.com"
Key = ""
Baseurl = "https://tracker.example.com"
Prefix = "BLAH"
"#;

    unsafe {
        std::env::remove_var(KEY_ENV_VAR);
    }
    let err = TrackerConfig::from_toml_str(toml).expect_err("no credential");
    assert!(err.to_string().contains(KEY_ENV_VAR), "{err}");
}

#[test]
#[serial_test::serial]
#[allow(unsafe_code)]
fn key_in_file_wins_over_env_var() {
    unsafe {
        std::env::set_var(KEY_ENV_VAR, "from-env");
    }
    let result = TrackerConfig::from_toml_str(sample_toml());
    unsafe {
        std::env::remove_var(KEY_ENV_VAR);
    }

    assert_eq!(result.expect("config parses").key, "secret-token");
}
