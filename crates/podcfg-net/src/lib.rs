//! Network configuration domains.
//!
//! Two generations of on-disk layout are supported:
//!
//! ```text
//! <root>/stage1/net.d/*.json     network/v1   (current)
//! <root>/stage1/paths.d/*.json   paths/v1     (current, plugin dirs)
//! <root>/net.d/*.conf            bare CNI     (legacy, frozen)
//! ```
//!
//! [`get_config_from`] reads the current layout and only falls back to the
//! legacy one when no current file exists under any root.
//! [`get_pod_config`] reads a pod's own legacy layout.

pub mod error;
pub mod export;
pub mod legacy;
pub mod network;
pub mod plugin_dirs;
pub mod setup;
pub mod types;

pub use error::{Error, Result};
pub use export::Document;
pub use legacy::LegacyConf;
pub use setup::{CDB, Config, LEGACY_CDB, Schema, get_config_from, get_pod_config};
pub use types::{ActiveNet, NetConf, NetInfo, Networks};
