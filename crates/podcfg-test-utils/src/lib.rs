//! Shared test utilities for the podcfg workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`roots`]: [`TestRoots`] builder laying out toplevel configuration roots

pub mod roots;

pub use roots::TestRoots;
