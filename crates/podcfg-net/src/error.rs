//! Error types for podcfg-net

use std::path::PathBuf;

/// Result type for podcfg-net operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or resolving network configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Walking the configuration directories failed
    #[error(transparent)]
    Walk(#[from] podcfg_dir::Error),

    #[error("malformed network configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no valid directories to get the configuration from")]
    NoRoots,

    #[error("network configuration is missing a priority field")]
    MissingPriority,

    #[error("invalid network priority {priority}, expected a value between 0 and 99")]
    InvalidPriority { priority: i64 },

    #[error("network configuration is missing a name field or it is empty")]
    MissingName,

    #[error(
        "conflicting network names in \"name\" ({name}) and \"cniConf.name\" ({cni_name}) fields"
    )]
    ConflictingNames { name: String, cni_name: String },

    #[error("network {name:?} was already defined in {}", dir.display())]
    DuplicateNetwork { name: String, dir: PathBuf },

    #[error("network plugin dirs were already set in the config directory {}", dir.display())]
    PluginDirsAlreadySet { dir: PathBuf },

    #[error(
        "discarding of previous network plugin directories was already set in the config directory {}",
        dir.display()
    )]
    DiscardAlreadySet { dir: PathBuf },

    #[error("network plugin path nr {position} ({path}) is not absolute")]
    PluginPathNotAbsolute { position: usize, path: String },
}
