//! Error types for podcfg

/// Result type for podcfg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving the effective configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Stage0(#[from] podcfg_stage0::Error),

    #[error(transparent)]
    Net(#[from] podcfg_net::Error),
}
