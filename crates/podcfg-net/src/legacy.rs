//! Legacy network schema
//!
//! Bare CNI configurations in `<root>/net.d/*.conf`, without an envelope.
//! This format is frozen: its merge rules must not change.

use crate::types::{ActiveNet, NetConf, NetInfo, Networks};
use crate::Result;
use podcfg_dir::{BoxError, ConfigType, KindVersion, PathIndex, PerRoot};
use std::path::{Path, PathBuf};

/// Kind and version synthesized for every legacy file
pub const OLD_CONF: &str = "old-conf";

/// Schema type of the legacy tree: every `.conf` file is `old-conf/old-conf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyConf;

impl ConfigType for LegacyConf {
    fn extension(&self) -> &str {
        "conf"
    }

    fn kind_and_version(&self, _raw: &[u8]) -> std::result::Result<KindVersion, BoxError> {
        Ok(KindVersion::new(OLD_CONF, OLD_CONF))
    }
}

pub(crate) fn parse_old_conf(acc: &mut Networks, idx: &PathIndex, raw: &[u8]) -> Result<()> {
    let conf: NetConf = serde_json::from_slice(raw)?;
    let path = idx.file_path();
    if let Some(existing) = acc.get(&conf.name) {
        if existing.runtime.conf_path >= path {
            tracing::debug!(network = %conf.name, file = %path.display(), "network already defined, ignoring");
            return Ok(());
        }
    }
    acc.insert(ActiveNet {
        conf_bytes: raw.to_vec(),
        runtime: NetInfo::new(conf.name.clone(), path),
        conf: Some(conf),
    });
    Ok(())
}

/// Fold per-root legacy networks: a later root replaces a network of the
/// same name. The result is sorted by file name and every path gets its
/// position appended, so that same-named files from different roots never
/// collide once copied into one directory.
pub fn merge_old_confs(acc: &PerRoot<Networks>) -> Networks {
    let mut merged = Networks::new();
    for networks in acc {
        for net in networks {
            merged.insert(net.clone());
        }
    }
    merged.sort_by_conf_basename();
    fixup_conf_paths(&mut merged);
    merged
}

/// `dir/10-foo.conf` at position 0 becomes `dir/10-foo-0.conf`.
pub fn fixup_conf_paths(networks: &mut Networks) {
    networks.rewrite_conf_paths(|i, path| numbered(path, i));
}

fn numbered(path: &Path, position: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{position}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{position}"),
    };
    path.with_file_name(name)
}
