//! Exporting an effective network config as `network/v1` documents

use crate::network::{KIND_NETWORK, NetworkV1};
use crate::plugin_dirs::{KIND_PATHS, NetPluginDirsV1, PathsV1};
use crate::setup::Config;
use crate::types::ActiveNet;
use podcfg_dir::EnvelopeHeader;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A document with the subdirectory and file name it should be written to
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub subdirectory: &'static str,
    pub filename: String,
    pub value: Value,
}

impl Config {
    /// One `network/v1` document per network and, when plugin directories
    /// are set, one `paths/v1` document.
    ///
    /// Priority and file name are recovered from the runtime file name, so
    /// resolving the documents again yields the same runtime paths. Networks
    /// whose runtime files share a stem get `-1`, `-2`, ... appended to the
    /// later file names, which also shows up in their reloaded runtime paths.
    pub fn to_documents(&self) -> Vec<Document> {
        let mut taken = HashSet::new();
        let mut docs: Vec<Document> = self
            .networks
            .iter()
            .map(|net| network_document(net, &mut taken))
            .collect();
        if !self.plugin_dirs.is_empty() {
            let paths = PathsV1 {
                header: EnvelopeHeader::new(KIND_PATHS, "v1"),
                net_plugin_dirs: NetPluginDirsV1 {
                    discard_previous: None,
                    paths: Some(
                        self.plugin_dirs
                            .iter()
                            .map(|p| p.to_string_lossy().into_owned())
                            .collect(),
                    ),
                },
            };
            docs.push(Document {
                subdirectory: "paths.d",
                filename: "plugin-dirs.json".to_string(),
                value: serde_json::to_value(paths).unwrap_or(Value::Null),
            });
        }
        docs
    }
}

fn network_document(net: &ActiveNet, taken: &mut HashSet<String>) -> Document {
    let (priority, stem) = split_conf_name(&net.runtime.conf_basename());
    let stem = unique_stem(stem, taken);
    let cni_conf = serde_json::from_slice::<Map<String, Value>>(&net.conf_bytes)
        .ok()
        .or_else(|| match serde_json::to_value(&net.conf) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        });
    let doc = NetworkV1 {
        header: EnvelopeHeader::new(KIND_NETWORK, "v1"),
        priority: Some(priority),
        name: net.name().to_string(),
        cni_conf,
    };
    Document {
        subdirectory: "net.d",
        filename: format!("{stem}.json"),
        value: serde_json::to_value(doc).unwrap_or(Value::Null),
    }
}

fn unique_stem(stem: String, taken: &mut HashSet<String>) -> String {
    let mut candidate = stem.clone();
    let mut n = 0;
    while !taken.insert(candidate.clone()) {
        n += 1;
        candidate = format!("{stem}-{n}");
    }
    candidate
}

/// `10-foo.conf` → `(10, "foo")`; names without a priority prefix get 0.
fn split_conf_name(basename: &str) -> (i64, String) {
    let stem = basename.strip_suffix(".conf").unwrap_or(basename);
    if let Some((prefix, rest)) = stem.split_once('-') {
        if let Ok(priority) = prefix.parse::<i64>() {
            if (0..=99).contains(&priority) && !rest.is_empty() {
                return (priority, rest.to_string());
            }
        }
    }
    (0, stem.to_string())
}
