//! Integration tests for configuration layering.

use clap::Parser;
use msgcast::{cli::Cli, config::Config};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// A helper function to run a test with a temporary config file.
fn with_config_file<F>(toml_content: &str, test_fn: F)
where
    F: FnOnce(PathBuf),
{
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", toml_content).unwrap();
    let path = file.path().to_path_buf();
    test_fn(path);
}

#[test]
fn load_full_valid_config() {
    let toml_content = r#"
        log_level = "debug"
        [compose]
        timestamp = false
        signature = "Customer Care"
        [delivery]
        emails = ["a@b.com", "c@d.org"]
        sms = ["555"]
        popup = false
    "#;

    with_config_file(toml_content, |path| {
        let cli = Cli::try_parse_from([
            "msgcast",
            "--message",
            "hello",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let config = Config::load(&cli).unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(!config.compose.timestamp);
        assert_eq!(config.compose.signature.as_deref(), Some("Customer Care"));
        assert_eq!(config.delivery.emails, vec!["a@b.com", "c@d.org"]);
        assert_eq!(config.delivery.sms, vec!["555"]);
        assert!(!config.delivery.popup);
    });
}

#[test]
fn defaults_apply_when_file_is_missing() {
    let cli = Cli::try_parse_from([
        "msgcast",
        "--message",
        "hello",
        "--config",
        "/nonexistent/msgcast.toml",
    ])
    .unwrap();
    let config = Config::load(&cli).unwrap();

    assert_eq!(config.log_level, "info");
    assert!(config.compose.timestamp);
    assert_eq!(config.compose.signature, None);
    assert!(config.delivery.emails.is_empty());
    assert!(config.delivery.popup);
}

#[test]
fn cli_arguments_override_the_file() {
    let toml_content = r#"
        [compose]
        signature = "File Signature"
        [delivery]
        emails = ["file@example.com"]
    "#;

    with_config_file(toml_content, |path| {
        let cli = Cli::try_parse_from([
            "msgcast",
            "--message",
            "hello",
            "--config",
            path.to_str().unwrap(),
            "--signature",
            "CLI Signature",
            "--no-timestamp",
            "--email",
            "cli@example.com",
            "--sms",
            "555",
        ])
        .unwrap();
        let config = Config::load(&cli).unwrap();

        assert_eq!(config.compose.signature.as_deref(), Some("CLI Signature"));
        assert!(!config.compose.timestamp);
        assert_eq!(config.delivery.emails, vec!["cli@example.com"]);
        assert_eq!(config.delivery.sms, vec!["555"]);
    });
}
