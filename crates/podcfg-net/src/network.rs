//! `network/v1`: networks of the current schema
//!
//! ```json
//! { "rktKind": "network", "rktVersion": "v1",
//!   "priority": 10, "name": "default",
//!   "cniConf": { "type": "ptp", "ipMasq": true } }
//! ```
//!
//! A file without `cniConf` is a stub: it only changes the runtime
//! identity (priority, file name) of a network declared in an earlier root.

use crate::types::{ActiveNet, NetConf, NetInfo, Networks};
use crate::{Error, Result};
use podcfg_dir::{EnvelopeHeader, PathIndex, PerRoot};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

pub const KIND_NETWORK: &str = "network";

/// Highest priority a network may declare
pub const MAX_PRIORITY: i64 = 99;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NetworkV1 {
    #[serde(flatten)]
    pub header: EnvelopeHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "cniConf", default, skip_serializing_if = "Option::is_none")]
    pub cni_conf: Option<Map<String, Value>>,
}

pub(crate) fn parse_network_v1(acc: &mut Networks, idx: &PathIndex, raw: &[u8]) -> Result<()> {
    let network: NetworkV1 = serde_json::from_slice(raw)?;
    let priority = validate_network_v1(&network)?;
    if acc.contains(&network.name) {
        return Err(Error::DuplicateNetwork {
            name: network.name,
            dir: idx.path.clone(),
        });
    }
    let net = active_net(network, priority, &idx.filename)?;
    tracing::debug!(network = net.name(), conf_path = %net.runtime.conf_path.display(), "declared network");
    acc.insert(net);
    Ok(())
}

fn validate_network_v1(network: &NetworkV1) -> Result<i64> {
    let priority = network.priority.ok_or(Error::MissingPriority)?;
    if !(0..=MAX_PRIORITY).contains(&priority) {
        return Err(Error::InvalidPriority { priority });
    }
    if network.name.is_empty() {
        return Err(Error::MissingName);
    }
    if let Some(cni_name) = network.cni_conf.as_ref().and_then(|c| c.get("name")) {
        if cni_name.as_str() != Some(network.name.as_str()) {
            return Err(Error::ConflictingNames {
                name: network.name.clone(),
                cni_name: cni_name.to_string(),
            });
        }
        tracing::warn!(
            network = %network.name,
            "no need to specify a name in the cniConf section, likely a leftover from a conversion"
        );
    }
    Ok(priority)
}

fn active_net(network: NetworkV1, priority: i64, filename: &str) -> Result<ActiveNet> {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let runtime = NetInfo::new(network.name.clone(), format!("{priority:02}-{stem}.conf"));
    let (conf, conf_bytes) = match network.cni_conf {
        Some(mut cni_conf) => {
            cni_conf.insert("name".to_string(), Value::String(network.name));
            let raw = serde_json::to_vec(&cni_conf)?;
            let conf: NetConf = serde_json::from_slice(&raw)?;
            (Some(conf), raw)
        }
        None => (None, Vec::new()),
    };
    Ok(ActiveNet {
        conf_bytes,
        conf,
        runtime,
    })
}

/// Fold per-root networks in root order.
///
/// A later declaration with a configuration replaces the whole network; a
/// stub replaces only its runtime identity. Networks left without a
/// configuration are dropped and the rest is sorted by runtime file name.
pub fn merge_networks(acc: &PerRoot<Networks>) -> Networks {
    let mut merged = Networks::new();
    for networks in acc {
        for net in networks {
            if net.conf.is_none() && merged.contains(net.name()) {
                tracing::debug!(network = net.name(), "stub overrides runtime identity");
                merged.update_runtime(net.name(), net.runtime.clone());
            } else {
                merged.insert(net.clone());
            }
        }
    }
    merged.retain(|net| {
        let keep = net.conf.is_some();
        if !keep {
            tracing::debug!(network = net.name(), "dropping network without configuration");
        }
        keep
    });
    merged.sort_by_conf_basename();
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::path::PathBuf;

    fn idx(filename: &str) -> PathIndex {
        PathIndex {
            index: 0,
            path: PathBuf::from("/etc/podcfg/stage1"),
            subdirectory: "net.d".to_string(),
            filename: filename.to_string(),
        }
    }

    fn parse(acc: &mut Networks, filename: &str, raw: &str) -> Result<()> {
        parse_network_v1(acc, &idx(filename), raw.as_bytes())
    }

    #[test]
    fn conf_path_uses_priority_and_file_stem() {
        let mut acc = Networks::new();
        parse(
            &mut acc,
            "default.json",
            r#"{"rktKind":"network","rktVersion":"v1","priority":5,"name":"default","cniConf":{"type":"ptp"}}"#,
        )
        .unwrap();

        let net = acc.get("default").unwrap();
        assert_eq!(net.runtime.conf_path, PathBuf::from("05-default.conf"));
        assert_eq!(net.net_type(), Some("ptp"));
        assert_eq!(net.conf.as_ref().unwrap().name, "default");
        let bytes: Value = serde_json::from_slice(&net.conf_bytes).unwrap();
        assert_eq!(bytes, serde_json::json!({"name": "default", "type": "ptp"}));
    }

    #[rstest]
    #[case::missing_priority(r#"{"name":"n"}"#)]
    #[case::priority_too_high(r#"{"priority":100,"name":"n"}"#)]
    #[case::negative_priority(r#"{"priority":-1,"name":"n"}"#)]
    #[case::missing_name(r#"{"priority":10}"#)]
    #[case::empty_name(r#"{"priority":10,"name":""}"#)]
    #[case::conflicting_names(r#"{"priority":10,"name":"n","cniConf":{"name":"m"}}"#)]
    #[case::non_string_cni_name(r#"{"priority":10,"name":"n","cniConf":{"name":1}}"#)]
    fn invalid_networks_are_rejected(#[case] raw: &str) {
        let mut acc = Networks::new();
        assert!(parse(&mut acc, "n.json", raw).is_err());
        assert!(acc.is_empty());
    }

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(99)]
    fn priority_bounds_are_inclusive(#[case] priority: i64) {
        let mut acc = Networks::new();
        let raw = format!(r#"{{"priority":{priority},"name":"n"}}"#);
        parse(&mut acc, "n.json", &raw).unwrap();
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn matching_cni_name_is_accepted() {
        let mut acc = Networks::new();
        parse(&mut acc, "n.json", r#"{"priority":1,"name":"n","cniConf":{"name":"n"}}"#).unwrap();
        assert!(acc.contains("n"));
    }

    #[test]
    fn duplicate_name_in_one_root_is_rejected() {
        let mut acc = Networks::new();
        parse(&mut acc, "a.json", r#"{"priority":1,"name":"n"}"#).unwrap();
        let err = parse(&mut acc, "b.json", r#"{"priority":2,"name":"n"}"#).unwrap_err();
        assert!(matches!(err, Error::DuplicateNetwork { .. }));
    }

    fn conf_net(name: &str, conf_path: &str, net_type: &str) -> ActiveNet {
        ActiveNet {
            conf_bytes: Vec::new(),
            conf: Some(NetConf {
                name: name.to_string(),
                net_type: net_type.to_string(),
                ..NetConf::default()
            }),
            runtime: NetInfo::new(name, conf_path),
        }
    }

    fn stub(name: &str, conf_path: &str) -> ActiveNet {
        ActiveNet {
            conf_bytes: Vec::new(),
            conf: None,
            runtime: NetInfo::new(name, conf_path),
        }
    }

    #[test]
    fn later_full_declaration_replaces_network() {
        let mut acc: PerRoot<Networks> = PerRoot::new();
        acc.get_mut(0).insert(conf_net("foo", "10-foo.conf", "bridge"));
        acc.get_mut(1).insert(conf_net("foo", "10-foo.conf", "ptp"));

        let merged = merge_networks(&acc);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("foo").unwrap().net_type(), Some("ptp"));
    }

    #[test]
    fn stub_replaces_runtime_only() {
        let mut acc: PerRoot<Networks> = PerRoot::new();
        acc.get_mut(0).insert(conf_net("foo", "10-foo.conf", "bridge"));
        acc.get_mut(0).insert(conf_net("bar", "20-bar.conf", "ptp"));
        acc.get_mut(1).insert(stub("foo", "30-foo.conf"));

        let merged = merge_networks(&acc);

        let names: Vec<&str> = merged.iter().map(ActiveNet::name).collect();
        assert_eq!(names, vec!["bar", "foo"]);
        let foo = merged.get("foo").unwrap();
        assert_eq!(foo.net_type(), Some("bridge"));
        assert_eq!(foo.runtime.conf_path, PathBuf::from("30-foo.conf"));
    }

    #[test]
    fn stub_without_base_is_dropped() {
        let mut acc: PerRoot<Networks> = PerRoot::new();
        acc.get_mut(0).insert(stub("ghost", "10-ghost.conf"));
        acc.get_mut(1).insert(conf_net("real", "50-real.conf", "ptp"));

        let merged = merge_networks(&acc);

        assert_eq!(merged.len(), 1);
        assert!(!merged.contains("ghost"));
        assert_eq!(merged.get("real").unwrap().name(), "real");
    }
}
