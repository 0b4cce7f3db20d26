//! `BINTREE_*` environment overrides.
//!
//! The process environment is shared by every test in a binary, so this file
//! holds a single test that sets, checks and restores the variables in order.

use std::env;
use std::fs;

use bintree::config::{Settings, SettingsError};
use bintree::{RenderStyle, TrailingPolicy, TruncationPolicy};
use tempfile::TempDir;

const VARS: [&str; 3] = ["BINTREE_TRUNCATION", "BINTREE_TRAILING", "BINTREE_STYLE"];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn given_env_overrides_when_load_then_env_wins_over_files_and_bad_values_error() {
    clear_vars();
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("bintree.toml");
    fs::write(
        &local,
        "truncation = \"strict\"\ntrailing = \"reject\"\nstyle = \"ascii\"\n",
    )
    .unwrap();

    // Env beats the local file
    env::set_var("BINTREE_TRUNCATION", "lenient");
    env::set_var("BINTREE_STYLE", "Unicode");
    let settings = Settings::load_from(None, Some(&local));
    clear_vars();
    let settings = settings.expect("load settings");
    assert_eq!(settings.truncation, TruncationPolicy::Lenient);
    assert_eq!(settings.style, RenderStyle::Unicode);
    assert_eq!(settings.trailing, TrailingPolicy::Reject, "no override, file value kept");

    // Env alone, no files
    env::set_var("BINTREE_TRAILING", "ignore");
    let settings = Settings::load_from(None, None);
    clear_vars();
    assert_eq!(settings.expect("load settings").trailing, TrailingPolicy::Ignore);

    // Unknown value is reported, not silently dropped
    env::set_var("BINTREE_TRAILING", "sometimes");
    let result = Settings::load_from(None, Some(&local));
    clear_vars();
    match result {
        Err(SettingsError::Environment(message)) => assert!(message.contains("sometimes")),
        other => panic!("expected Environment error, got {other:?}"),
    }

    // Variables gone, file values back
    let settings = Settings::load_from(None, Some(&local)).expect("load settings");
    assert_eq!(settings, Settings::default());
}
