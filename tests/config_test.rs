//! Integration tests for Settings config loading with layered merge semantics.
//!
//! These tests pass explicit file paths, so a real global config on the
//! machine does not influence them.

use std::fs;

use bintree::config::{Settings, SettingsError};
use bintree::{RenderStyle, TrailingPolicy, TruncationPolicy};
use tempfile::TempDir;

#[test]
fn given_no_config_files_when_load_then_defaults() {
    let settings = Settings::load_from(None, None).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("bintree.toml");
    fs::write(&local, "truncation = \"lenient\"\nstyle = \"unicode\"\n").unwrap();

    let settings = Settings::load_from(None, Some(&local)).expect("load settings");

    assert_eq!(settings.truncation, TruncationPolicy::Lenient);
    assert_eq!(settings.style, RenderStyle::Unicode);
    assert_eq!(settings.trailing, TrailingPolicy::Reject, "unset field keeps default");
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let local = dir.path().join("local.toml");
    fs::write(&global, "trailing = \"ignore\"\nstyle = \"unicode\"\n").unwrap();
    fs::write(&local, "style = \"ascii\"\n").unwrap();

    let settings = Settings::load_from(Some(&global), Some(&local)).expect("load settings");

    assert_eq!(settings.trailing, TrailingPolicy::Ignore);
    assert_eq!(settings.style, RenderStyle::Ascii);
    assert_eq!(settings.truncation, TruncationPolicy::Strict);
}

#[test]
fn given_missing_global_config_when_load_then_skipped() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("does-not-exist.toml");
    let settings = Settings::load_from(Some(&global), None).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_missing_explicit_config_when_load_then_read_error() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("does-not-exist.toml");
    let result = Settings::load_from(None, Some(&local));
    assert!(matches!(result, Err(SettingsError::Read { .. })));
}

#[test]
fn given_unknown_policy_value_when_load_then_parse_error() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("bad.toml");
    fs::write(&local, "truncation = \"sometimes\"\n").unwrap();

    let result = Settings::load_from(None, Some(&local));
    assert!(matches!(result, Err(SettingsError::Parse { .. })));
}
