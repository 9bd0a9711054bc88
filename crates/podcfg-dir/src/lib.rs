//! Layered configuration directory walker.
//!
//! Configuration is read from several toplevel directories, for example a
//! vendor directory in `/usr/lib/podcfg`, an admin directory in
//! `/etc/podcfg` and a user directory in `~/.config/podcfg`. Each module of
//! the engine keeps its configuration in a configuration directory with a
//! fixed basename (cdb) inside every toplevel directory, split further into
//! subdirectories that hold small versioned files.
//!
//! This crate provides the shared machinery: schema types ([`ConfigType`]),
//! the registry and walker ([`Directory`]), file identification
//! ([`PathIndex`]) and per-root accumulator storage ([`PerRoot`]). Domain
//! crates register their kinds and versions and implement [`Parser`].

pub mod config_type;
pub mod directory;
pub mod error;
pub mod path_index;
pub mod per_root;

pub use config_type::{ConfigType, EnvelopeError, EnvelopeHeader, JsonEnvelope, KindVersion};
pub use directory::{Directory, Parser, ParserSetup, SubdirSetup};
pub use error::{BoxError, Error, Result};
pub use path_index::PathIndex;
pub use per_root::PerRoot;
