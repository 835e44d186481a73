//! Error types shared by the library and the CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a single input or the whole run.
#[derive(Debug, Error)]
pub enum DocGenError {
    /// An input could not be opened or read. The caller may skip it and go
    /// on with the remaining inputs; the model keeps what it already has.
    #[error("cannot read {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output destination could not be created or written. Fatal.
    #[error("cannot write {}: {source}", path.display())]
    System {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A grammar element was missing from a comment block.
///
/// Reported and recovered from locally; never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: expected {expected}, found \"{found}\"")]
pub struct SyntaxError {
    pub expected: &'static str,
    pub found: String,
    pub line: usize,
}
