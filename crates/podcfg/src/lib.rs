//! Layered configuration resolver.
//!
//! Configuration is read from an ordered list of toplevel roots, e.g. vendor
//! defaults in `/usr/lib/podcfg` followed by administrator overrides in
//! `/etc/podcfg`. Later roots override earlier ones, following per-domain
//! rules.
//!
//! ```no_run
//! use podcfg::{ConfigRoots, get_config_from};
//!
//! let roots = ConfigRoots::from_env().ordered();
//! let config = get_config_from(&roots)?;
//! for net in &config.net.networks {
//!     println!("{} -> {}", net.name(), net.runtime.conf_path.display());
//! }
//! # Ok::<(), podcfg::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod roots;

pub use config::{EffectiveConfig, get_config_from, get_pod_config};
pub use error::{Error, Result};
pub use roots::ConfigRoots;

pub use podcfg_net as net;
pub use podcfg_stage0 as stage0;
