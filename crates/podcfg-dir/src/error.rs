//! Error types for podcfg-dir

use std::path::PathBuf;

/// Result type for podcfg-dir operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by schema types and domain parsers.
///
/// The walker does not know the concrete error types of the domain sets it
/// drives, so it keeps them as the source of its own variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while registering parsers or walking directories
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("expected {path:?} to be a directory")]
    NotADirectory { path: PathBuf },

    #[error("failed to get configuration kind and version from {path:?}: {source}")]
    KindAndVersion {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error(
        "the configuration directory {dir:?} expects to have configuration files of kinds {}, but {file:?} has kind of {kind:?}",
        quoted(.allowed)
    )]
    KindNotAllowed {
        dir: PathBuf,
        file: String,
        allowed: Vec<String>,
        kind: String,
    },

    #[error("no parser available for configuration of kind {kind:?}")]
    NoParserForKind { kind: String },

    #[error("no parser available for configuration of kind {kind:?} and version {version:?}")]
    NoParserForVersion { kind: String, version: String },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("empty kind string for version {version:?} when registering a config parser")]
    EmptyKind { version: String },

    #[error("empty version string for kind {kind:?} when registering a config parser")]
    EmptyVersion { kind: String },

    #[error("parser for kind {kind:?} and version {version:?} already exists")]
    DuplicateParser { kind: String, version: String },

    #[error("trying to register empty config subdirectory for kinds {kinds:?}")]
    EmptySubdirectory { kinds: Vec<String> },

    #[error("kinds cannot be empty when registering config subdirectory {subdir:?}")]
    NoKinds { subdir: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn quoted(kinds: &[String]) -> String {
    kinds
        .iter()
        .map(|k| format!("{k:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
