//! Directory setup and the dual-schema orchestrator

use crate::legacy::{LegacyConf, OLD_CONF, merge_old_confs, parse_old_conf};
use crate::network::{KIND_NETWORK, merge_networks, parse_network_v1};
use crate::plugin_dirs::{KIND_PATHS, PluginDirs, merge_plugin_dirs, parse_paths_v1};
use crate::types::Networks;
use crate::{Error, Result};
use podcfg_dir::{
    BoxError, Directory, JsonEnvelope, Parser, ParserSetup, PathIndex, PerRoot, SubdirSetup,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Basename of the current network configuration directory.
pub const CDB: &str = "stage1";

/// The legacy tree lives directly under each toplevel root.
pub const LEGACY_CDB: &str = "";

const VERSION_V1: &str = "v1";

/// Schema generation an effective network config was resolved from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    #[default]
    Current,
    Legacy,
}

/// The effective network configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub plugin_dirs: Vec<PathBuf>,
    pub networks: Networks,
    pub schema: Schema,
}

/// Handlers of the current network schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetParser {
    NetworkV1,
    PathsV1,
}

/// Per-root accumulators of the current network schema
#[derive(Debug, Default)]
pub struct NetParsers {
    networks: PerRoot<Networks>,
    plugin_dirs: PerRoot<PluginDirs>,
}

impl Parser for NetParsers {
    type Tag = NetParser;

    fn parse(
        &mut self,
        tag: NetParser,
        idx: &PathIndex,
        raw: &[u8],
    ) -> std::result::Result<(), BoxError> {
        let result = match tag {
            NetParser::NetworkV1 => parse_network_v1(self.networks.get_mut(idx.index), idx, raw),
            NetParser::PathsV1 => parse_paths_v1(self.plugin_dirs.get_mut(idx.index), idx, raw),
        };
        result.map_err(Into::into)
    }
}

impl NetParsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any file of the current schema was parsed, in any domain.
    pub fn visited(&self) -> bool {
        self.networks.visited() || self.plugin_dirs.visited()
    }

    pub fn merge(&self) -> Config {
        Config {
            plugin_dirs: merge_plugin_dirs(&self.plugin_dirs),
            networks: merge_networks(&self.networks),
            schema: Schema::Current,
        }
    }
}

/// Handler of the legacy schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyParser {
    OldConf,
}

/// Per-root accumulators of the legacy schema
#[derive(Debug, Default)]
pub struct LegacyParsers {
    networks: PerRoot<Networks>,
}

impl Parser for LegacyParsers {
    type Tag = LegacyParser;

    fn parse(
        &mut self,
        tag: LegacyParser,
        idx: &PathIndex,
        raw: &[u8],
    ) -> std::result::Result<(), BoxError> {
        match tag {
            LegacyParser::OldConf => {
                parse_old_conf(self.networks.get_mut(idx.index), idx, raw).map_err(Into::into)
            }
        }
    }
}

impl LegacyParsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> bool {
        self.networks.visited()
    }

    pub fn merge(&self) -> Config {
        Config {
            plugin_dirs: Vec::new(),
            networks: merge_old_confs(&self.networks),
            schema: Schema::Legacy,
        }
    }
}

/// Build the current network configuration directory.
pub fn config_directory() -> Result<Directory<JsonEnvelope, NetParser>> {
    let mut dir = Directory::new(CDB, JsonEnvelope);
    dir.register_parsers(&[
        ParserSetup::new(KIND_NETWORK, VERSION_V1, NetParser::NetworkV1),
        ParserSetup::new(KIND_PATHS, VERSION_V1, NetParser::PathsV1),
    ])?;
    dir.register_subdirectories(&[
        SubdirSetup::new("net.d", [KIND_NETWORK]),
        SubdirSetup::new("paths.d", [KIND_PATHS]),
    ])?;
    Ok(dir)
}

/// Build the legacy network configuration directory. Frozen.
pub fn legacy_directory() -> Result<Directory<LegacyConf, LegacyParser>> {
    let mut dir = Directory::new(LEGACY_CDB, LegacyConf);
    dir.register_parser(OLD_CONF, OLD_CONF, LegacyParser::OldConf)?;
    dir.register_subdirectory("net.d", &[OLD_CONF])?;
    Ok(dir)
}

/// Resolve the network configuration from the given toplevel roots.
///
/// Empty roots are ignored. If any file of the current schema exists under
/// any root, the current schema is authoritative and the legacy tree is
/// not read at all; otherwise the legacy tree is used.
pub fn get_config_from<R: AsRef<Path>>(roots: &[R]) -> Result<Config> {
    let roots: Vec<&Path> = roots
        .iter()
        .map(AsRef::as_ref)
        .filter(|root| !root.as_os_str().is_empty())
        .collect();
    if roots.is_empty() {
        return Err(Error::NoRoots);
    }

    let mut current = NetParsers::new();
    config_directory()?.walk_directories(&roots, &mut current)?;
    if current.visited() {
        tracing::debug!("using the current network configuration schema");
        return Ok(current.merge());
    }

    tracing::debug!("no current network configuration found, falling back to the legacy schema");
    resolve_legacy(&roots)
}

/// Resolve the network configuration of a single pod from its root.
///
/// Pods only carry the legacy layout.
pub fn get_pod_config(pod_root: impl AsRef<Path>) -> Result<Config> {
    resolve_legacy(&[pod_root.as_ref()])
}

fn resolve_legacy(roots: &[&Path]) -> Result<Config> {
    let mut legacy = LegacyParsers::new();
    legacy_directory()?.walk_directories(roots, &mut legacy)?;
    let config = legacy.merge();
    tracing::debug!(networks = config.networks.len(), "resolved legacy network configuration");
    Ok(config)
}
