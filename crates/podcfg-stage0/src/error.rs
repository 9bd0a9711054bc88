//! Error types for podcfg-stage0

/// Result type for podcfg-stage0 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or resolving stage0 configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Walking the configuration directories failed
    #[error(transparent)]
    Walk(#[from] podcfg_dir::Error),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no domains specified")]
    NoDomains,

    #[error("no auth type specified")]
    NoAuthType,

    #[error("unknown auth type: {auth_type:?}")]
    UnknownAuthType { auth_type: String },

    #[error("user not specified")]
    UserNotSpecified,

    #[error("password not specified")]
    PasswordNotSpecified,

    #[error("no oauth bearer token specified")]
    NoToken,

    #[error("auth for domain {domain:?} is already specified")]
    DuplicateDomain { domain: String },

    #[error("no registries specified")]
    NoRegistries,

    #[error("credentials for docker registry {registry:?} are already specified")]
    DuplicateRegistry { registry: String },

    #[error("{what} is already specified")]
    AlreadySpecified { what: &'static str },

    #[error("{what} must be an absolute path, got {path:?}")]
    NotAbsolute { what: &'static str, path: String },

    #[error("invalid stage1 configuration: default stage1 image version specified, but name is missing")]
    Stage1VersionWithoutName,

    #[error("invalid stage1 configuration: default stage1 image name specified, but version is missing")]
    Stage1NameWithoutVersion,

    #[error("invalid stage1 configuration: default stage1 image location is an invalid URL: {source}")]
    InvalidLocationUrl {
        #[source]
        source: url::ParseError,
    },

    #[error(
        "invalid stage1 configuration: default stage1 image location {location:?} is either a relative path or a URL without scheme"
    )]
    LocationWithoutScheme { location: String },

    #[error(
        "invalid stage1 configuration: default stage1 image location URL has invalid scheme {scheme:?}, allowed schemes are {allowed}"
    )]
    InvalidLocationScheme { scheme: String, allowed: String },
}
