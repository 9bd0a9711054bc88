//! `paths/v1` of the network schema: network plugin search directories
//!
//! ```json
//! { "rktKind": "paths", "rktVersion": "v1",
//!   "netPluginDirs": { "paths": ["/usr/lib/cni"], "discardPrevious": true } }
//! ```

use crate::{Error, Result};
use podcfg_dir::{EnvelopeHeader, PathIndex, PerRoot};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const KIND_PATHS: &str = "paths";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NetPluginDirsV1 {
    #[serde(rename = "discardPrevious", default, skip_serializing_if = "Option::is_none")]
    pub discard_previous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PathsV1 {
    #[serde(flatten)]
    pub header: EnvelopeHeader,
    #[serde(rename = "netPluginDirs", default)]
    pub net_plugin_dirs: NetPluginDirsV1,
}

/// Plugin directories declared by one root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginDirs {
    pub paths: Option<Vec<PathBuf>>,
    pub discard_previous: Option<bool>,
}

pub(crate) fn parse_paths_v1(acc: &mut PluginDirs, idx: &PathIndex, raw: &[u8]) -> Result<()> {
    let paths: PathsV1 = serde_json::from_slice(raw)?;
    let dirs = paths.net_plugin_dirs;
    if let Some(discard) = dirs.discard_previous {
        if acc.discard_previous.is_some() {
            return Err(Error::DiscardAlreadySet {
                dir: idx.path.clone(),
            });
        }
        acc.discard_previous = Some(discard);
    }
    if let Some(list) = dirs.paths {
        if acc.paths.is_some() {
            return Err(Error::PluginDirsAlreadySet {
                dir: idx.path.clone(),
            });
        }
        let mut absolute = Vec::with_capacity(list.len());
        for (i, path) in list.into_iter().enumerate() {
            if !Path::new(&path).is_absolute() {
                return Err(Error::PluginPathNotAbsolute {
                    position: i + 1,
                    path,
                });
            }
            absolute.push(PathBuf::from(path));
        }
        acc.paths = Some(absolute);
    }
    Ok(())
}

/// Fold per-root plugin directories in root order.
///
/// Without `discardPrevious` the last non-empty list wins. With
/// `discardPrevious: true` the root's list replaces everything before it,
/// even when empty; with `false` it is prepended to the earlier lists.
pub fn merge_plugin_dirs(acc: &PerRoot<PluginDirs>) -> Vec<PathBuf> {
    let mut merged: Vec<PathBuf> = Vec::new();
    for dirs in acc {
        let paths = dirs.paths.clone().unwrap_or_default();
        match dirs.discard_previous {
            None if paths.is_empty() => {}
            None | Some(true) => merged = paths,
            Some(false) => {
                let earlier = std::mem::replace(&mut merged, paths);
                merged.extend(earlier);
            }
        }
    }
    merged
}
