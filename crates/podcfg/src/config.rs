//! The effective configuration over all domains

use crate::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::path::Path;

/// Everything resolved from one ordered list of roots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveConfig {
    pub stage0: podcfg_stage0::Config,
    pub net: podcfg_net::Config,
}

/// Resolve every domain from the given toplevel roots; later roots win.
///
/// Empty roots are ignored, and at least one non-empty root is required.
pub fn get_config_from<R: AsRef<Path>>(roots: &[R]) -> Result<EffectiveConfig> {
    let roots: Vec<&Path> = roots
        .iter()
        .map(AsRef::as_ref)
        .filter(|root| !root.as_os_str().is_empty())
        .collect();
    let net = podcfg_net::get_config_from(&roots)?;
    let stage0 = podcfg_stage0::get_config_from(&roots)?;
    tracing::debug!(roots = roots.len(), schema = ?net.schema, "resolved effective configuration");
    Ok(EffectiveConfig { stage0, net })
}

/// Resolve the network configuration of a single pod.
pub fn get_pod_config(pod_root: impl AsRef<Path>) -> Result<podcfg_net::Config> {
    Ok(podcfg_net::get_pod_config(pod_root)?)
}

/// Serializes as
/// `{"stage0": [...], "network": {"schema": "...", "documents": [...]}}`.
impl Serialize for EffectiveConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let stage0: Vec<Value> = self
            .stage0
            .to_documents()
            .into_iter()
            .map(|d| d.value)
            .collect();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("stage0", &stage0)?;
        map.serialize_entry("network", &NetworkView(&self.net))?;
        map.end()
    }
}

struct NetworkView<'a>(&'a podcfg_net::Config);

impl Serialize for NetworkView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let documents: Vec<Value> = self.0.to_documents().into_iter().map(|d| d.value).collect();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("schema", &self.0.schema)?;
        map.serialize_entry("documents", &documents)?;
        map.end()
    }
}
