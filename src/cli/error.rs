//! CLI-level errors (wraps domain and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::BuildError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("config error: {0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Build(e) => match e {
                BuildError::SourceUnavailable { .. } => crate::exitcode::NOINPUT,
                BuildError::Read(_) => crate::exitcode::IOERR,
                BuildError::TruncatedSource { .. }
                | BuildError::InvalidEncoding { .. }
                | BuildError::TrailingData { .. } => crate::exitcode::DATAERR,
            },
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } => crate::exitcode::IOERR,
        }
    }
}

/// Exit code for a failed argument parse.
///
/// `--help` and `--version` come through clap as errors printed to stdout;
/// those are successful runs.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        crate::exitcode::USAGE
    } else {
        crate::exitcode::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use clap::Parser;

    use crate::cli::Cli;

    #[test]
    fn test_unknown_subcommand_is_usage_error() {
        let err = Cli::try_parse_from(["bintree", "bogus"]).unwrap_err();
        assert_eq!(parse_exit_code(&err), crate::exitcode::USAGE);
    }

    #[test]
    fn test_missing_file_argument_is_usage_error() {
        let err = Cli::try_parse_from(["bintree", "show"]).unwrap_err();
        assert_eq!(parse_exit_code(&err), crate::exitcode::USAGE);
    }

    #[test]
    fn test_help_and_version_exit_ok() {
        let help = Cli::try_parse_from(["bintree", "--help"]).unwrap_err();
        assert_eq!(parse_exit_code(&help), crate::exitcode::OK);

        let version = Cli::try_parse_from(["bintree", "--version"]).unwrap_err();
        assert_eq!(parse_exit_code(&version), crate::exitcode::OK);
    }

    #[test]
    fn test_exit_codes_follow_sysexits() {
        let missing = CliError::from(BuildError::SourceUnavailable {
            path: PathBuf::from("/nonexistent/tree.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let truncated = CliError::from(BuildError::TruncatedSource {
            consumed: 2,
            pending: 1,
        });
        assert_eq!(truncated.exit_code(), crate::exitcode::DATAERR);

        let trailing = CliError::from(BuildError::TrailingData {
            position: 3,
            symbol: 'B',
        });
        assert_eq!(trailing.exit_code(), crate::exitcode::DATAERR);

        let encoding = CliError::from(BuildError::InvalidEncoding { position: 0 });
        assert_eq!(encoding.exit_code(), crate::exitcode::DATAERR);

        let read = CliError::from(BuildError::Read(std::io::Error::from(
            std::io::ErrorKind::UnexpectedEof,
        )));
        assert_eq!(read.exit_code(), crate::exitcode::IOERR);

        let settings = CliError::from(SettingsError::Environment("bad".into()));
        assert_eq!(settings.exit_code(), crate::exitcode::CONFIG);
    }
}
