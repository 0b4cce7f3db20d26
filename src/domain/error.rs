//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while decoding a serialized tree.
///
/// Every other tree operation is total, so this is the only failure type
/// the domain layer produces.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("cannot open tree source {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read tree source: {0}")]
    Read(#[from] std::io::Error),

    #[error("source ended after {consumed} symbols with {pending} subtree(s) still open")]
    TruncatedSource { consumed: usize, pending: usize },

    #[error("invalid UTF-8 at symbol {position}")]
    InvalidEncoding { position: usize },

    #[error("unexpected symbol {symbol:?} at position {position} after complete tree")]
    TrailingData { position: usize, symbol: char },
}

impl BuildError {
    /// True when the input was readable but does not describe a tree.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            BuildError::TruncatedSource { .. }
                | BuildError::InvalidEncoding { .. }
                | BuildError::TrailingData { .. }
        )
    }
}

/// Result type for tree construction.
pub type BuildResult<T> = Result<T, BuildError>;
