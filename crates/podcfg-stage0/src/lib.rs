//! Stage0 configuration domains.
//!
//! Resolves registry credentials (`auth`, `dockerAuth`), relocatable
//! directories (`paths`) and the default stage1 image (`stage1`) from the
//! `stage0` configuration directory of every toplevel root:
//!
//! ```text
//! <root>/stage0/
//!   auth.d/    auth, dockerAuth
//!   paths.d/   paths
//!   stage1.d/  stage1
//! ```
//!
//! # Example
//!
//! ```no_run
//! let config = podcfg_stage0::get_config_from(&["/usr/lib/podcfg", "/etc/podcfg"])?;
//! if let Some(dir) = &config.paths.data_dir {
//!     println!("data directory: {}", dir.display());
//! }
//! # Ok::<(), podcfg_stage0::Error>(())
//! ```

pub mod auth;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod paths;
pub mod schema;
pub mod setup;
pub mod stage1;
pub mod types;

pub use credentials::{AUTH_HEADER, BasicCredentials, Credentials, resolve_auth_per_host};
pub use envelope::Document;
pub use error::{Error, Result};
pub use setup::{CDB, Stage0Parser, Stage0Parsers, config_directory, get_config_from};
pub use types::{Config, ConfigurablePaths, Stage1Data, Stage1Image};
