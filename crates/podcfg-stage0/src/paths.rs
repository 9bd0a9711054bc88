//! `paths` kind: relocatable engine directories

use crate::schema::PathsV1;
use crate::types::ConfigurablePaths;
use crate::{Error, Result};
use podcfg_dir::PerRoot;
use std::path::{Path, PathBuf};

pub(crate) fn parse_paths_v1(acc: &mut ConfigurablePaths, raw: &[u8]) -> Result<()> {
    let paths: PathsV1 = serde_json::from_slice(raw)?;
    set_once(&mut acc.data_dir, &paths.data, "data directory")?;
    set_once(
        &mut acc.stage1_images_dir,
        &paths.stage1_images,
        "stage1 images directory",
    )?;
    Ok(())
}

fn set_once(slot: &mut Option<PathBuf>, value: &str, what: &'static str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    if slot.is_some() {
        return Err(Error::AlreadySpecified { what });
    }
    *slot = Some(absolute(value, what)?);
    Ok(())
}

pub(crate) fn absolute(value: &str, what: &'static str) -> Result<PathBuf> {
    if !Path::new(value).is_absolute() {
        return Err(Error::NotAbsolute {
            what,
            path: value.to_string(),
        });
    }
    Ok(PathBuf::from(value))
}

/// Last non-empty value wins, independently for every field.
pub fn merge_paths(acc: &PerRoot<ConfigurablePaths>) -> ConfigurablePaths {
    let mut merged = ConfigurablePaths::default();
    for per_root in acc {
        if let Some(dir) = &per_root.data_dir {
            merged.data_dir = Some(dir.clone());
        }
        if let Some(dir) = &per_root.stage1_images_dir {
            merged.stage1_images_dir = Some(dir.clone());
        }
    }
    merged
}
