//! Effective network configuration types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// A CNI network configuration with the extensions the engine understands.
///
/// Fields the engine does not interpret are kept in `extra` so the
/// configuration can be handed to the plugin unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NetConf {
    #[serde(rename = "cniVersion", default, skip_serializing_if = "String::is_empty")]
    pub cni_version: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub net_type: String,
    #[serde(rename = "ipMasq", default)]
    pub ip_masq: bool,
    #[serde(default)]
    pub mtu: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipam: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Runtime identity of a network.
///
/// Only `net_name` and `conf_path` are known at configuration time; the rest
/// is filled in by network setup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetInfo {
    pub net_name: String,
    pub conf_path: PathBuf,
    pub plugin_path: PathBuf,
    pub if_name: String,
    pub ip: Option<IpAddr>,
    pub host_ip: Option<IpAddr>,
    pub mask: Option<IpAddr>,
}

impl NetInfo {
    pub fn new(net_name: impl Into<String>, conf_path: impl Into<PathBuf>) -> Self {
        Self {
            net_name: net_name.into(),
            conf_path: conf_path.into(),
            ..Self::default()
        }
    }

    /// Base name of the runtime configuration file.
    pub fn conf_basename(&self) -> String {
        self.conf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A network together with its decoded configuration and runtime identity
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveNet {
    pub conf_bytes: Vec<u8>,
    /// `None` only for a stub that changes the runtime identity of a
    /// network declared in an earlier root
    pub conf: Option<NetConf>,
    pub runtime: NetInfo,
}

impl ActiveNet {
    pub fn name(&self) -> &str {
        &self.runtime.net_name
    }

    pub fn net_type(&self) -> Option<&str> {
        self.conf.as_ref().map(|c| c.net_type.as_str())
    }

    pub fn ip_masq(&self) -> bool {
        self.conf.as_ref().is_some_and(|c| c.ip_masq)
    }
}

/// Networks in their effective order, indexed by name.
///
/// The order and the index are only changed together, so a name always
/// resolves to the entry at its position in [`Networks::ordered`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Networks {
    ordered: Vec<ActiveNet>,
    by_name: HashMap<String, usize>,
}

impl Networks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn ordered(&self) -> &[ActiveNet] {
        &self.ordered
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActiveNet> {
        self.ordered.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ActiveNet> {
        self.by_name.get(name).map(|&i| &self.ordered[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Insert a network, replacing one with the same name in place.
    ///
    /// Returns the replaced network, if any.
    pub fn insert(&mut self, net: ActiveNet) -> Option<ActiveNet> {
        match self.by_name.get(net.name()) {
            Some(&i) => Some(std::mem::replace(&mut self.ordered[i], net)),
            None => {
                self.by_name.insert(net.name().to_string(), self.ordered.len());
                self.ordered.push(net);
                None
            }
        }
    }

    /// Replace only the runtime identity of the named network.
    ///
    /// Returns `false` when no network has that name. The new runtime must
    /// carry the same network name.
    pub fn update_runtime(&mut self, name: &str, runtime: NetInfo) -> bool {
        debug_assert_eq!(name, runtime.net_name);
        match self.by_name.get(name) {
            Some(&i) => {
                self.ordered[i].runtime = runtime;
                true
            }
            None => false,
        }
    }

    /// Keep only the networks for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&ActiveNet) -> bool) {
        self.ordered.retain(keep);
        self.reindex();
    }

    /// Stable sort by the base name of each runtime configuration file.
    pub fn sort_by_conf_basename(&mut self) {
        self.ordered.sort_by_cached_key(|net| net.runtime.conf_basename());
        self.reindex();
    }

    /// Rewrite every runtime configuration path; `rewrite` gets the position
    /// and the current path.
    pub(crate) fn rewrite_conf_paths(&mut self, mut rewrite: impl FnMut(usize, &Path) -> PathBuf) {
        for (i, net) in self.ordered.iter_mut().enumerate() {
            net.runtime.conf_path = rewrite(i, &net.runtime.conf_path);
        }
    }

    fn reindex(&mut self) {
        self.by_name = self
            .ordered
            .iter()
            .enumerate()
            .map(|(i, net)| (net.name().to_string(), i))
            .collect();
    }
}

impl<'a> IntoIterator for &'a Networks {
    type Item = &'a ActiveNet;
    type IntoIter = std::slice::Iter<'a, ActiveNet>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}
