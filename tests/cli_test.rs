//! Command dispatch through the library entry point

use std::fs;

use bintree::cli::{execute_command, Cli, CliError};
use bintree::exitcode;
use bintree::util::testing;
use bintree::{BuildError, TruncationPolicy};
use clap::Parser;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("bintree").chain(args.iter().copied())).unwrap()
}

#[test]
fn given_valid_tree_file_when_running_commands_then_succeed() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tree.txt");
    fs::write(&file, "AB$$C$$\n").unwrap();
    let file = file.to_str().unwrap();

    for args in [
        vec!["show", file],
        vec!["show", file, "--style", "unicode"],
        vec!["traverse", file],
        vec!["traverse", file, "--order", "in"],
        vec!["height", file],
        vec!["info", file],
        vec!["encode", file],
    ] {
        let cli = parse(&args);
        assert!(execute_command(&cli).is_ok(), "failed: {args:?}");
    }
}

#[test]
fn given_output_path_when_encoding_then_writes_canonical_form() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tree.txt");
    let out = dir.path().join("out.txt");
    fs::write(&file, "AB$$C").unwrap();

    let cli = parse(&[
        "--truncation",
        "lenient",
        "encode",
        file.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    execute_command(&cli).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "AB$$C$$");
}

#[test]
fn given_missing_file_when_showing_then_noinput_exit_code() {
    let cli = parse(&["show", "/nonexistent/tree.txt"]);
    let err = execute_command(&cli).unwrap_err();
    assert!(matches!(
        err,
        CliError::Build(BuildError::SourceUnavailable { .. })
    ));
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_truncated_file_when_strict_then_dataerr_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tree.txt");
    fs::write(&file, "AB$").unwrap();

    let cli = parse(&["--truncation", "strict", "height", file.to_str().unwrap()]);
    let err = execute_command(&cli).unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_config_file_and_flag_when_resolving_then_flag_wins() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bintree.toml");
    fs::write(&config, "truncation = \"lenient\"\n").unwrap();

    let cli = parse(&[
        "--config",
        config.to_str().unwrap(),
        "--truncation",
        "strict",
        "config",
    ]);
    let settings = bintree::cli::commands::resolve_settings(&cli).unwrap();
    assert_eq!(settings.truncation, TruncationPolicy::Strict);
}
