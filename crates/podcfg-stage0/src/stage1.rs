//! `stage1` kind: default stage1 image selection
//!
//! Name and version travel together; the location is independent. A root
//! providing only a location leaves an earlier name and version alone, and
//! the other way around.

use crate::schema::Stage1V1;
use crate::types::{Stage1Data, Stage1Image};
use crate::{Error, Result};
use podcfg_dir::PerRoot;
use std::path::Path;

/// URL schemes accepted for a stage1 location, sorted.
pub const ALLOWED_SCHEMES: &[&str] = &["docker", "file", "http", "https"];

pub(crate) fn parse_stage1_v1(acc: &mut Stage1Data, raw: &[u8]) -> Result<()> {
    let stage1: Stage1V1 = serde_json::from_slice(raw)?;
    let image = validate_stage1_v1(&stage1)?;
    if let Some(image) = image {
        if acc.image.is_some() {
            return Err(Error::AlreadySpecified {
                what: "name and version of a default stage1 image",
            });
        }
        acc.image = Some(image);
    }
    if !stage1.location.is_empty() {
        if acc.location.is_some() {
            return Err(Error::AlreadySpecified {
                what: "location of a default stage1 image",
            });
        }
        acc.location = Some(stage1.location);
    }
    Ok(())
}

fn validate_stage1_v1(stage1: &Stage1V1) -> Result<Option<Stage1Image>> {
    let image = match (stage1.name.is_empty(), stage1.version.is_empty()) {
        (true, true) => None,
        (true, false) => return Err(Error::Stage1VersionWithoutName),
        (false, true) => return Err(Error::Stage1NameWithoutVersion),
        (false, false) => Some(Stage1Image {
            name: stage1.name.clone(),
            version: stage1.version.clone(),
        }),
    };
    if !stage1.location.is_empty() {
        validate_location(&stage1.location)?;
    }
    Ok(image)
}

/// A location is an absolute path or a URL with an allowed scheme.
pub fn validate_location(location: &str) -> Result<()> {
    if Path::new(location).is_absolute() {
        return Ok(());
    }
    let url = match url::Url::parse(location) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            return Err(Error::LocationWithoutScheme {
                location: location.to_string(),
            });
        }
        Err(source) => return Err(Error::InvalidLocationUrl { source }),
    };
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        let allowed = ALLOWED_SCHEMES
            .iter()
            .map(|s| format!("{s:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::InvalidLocationScheme {
            scheme: url.scheme().to_string(),
            allowed,
        });
    }
    Ok(())
}

pub fn merge_stage1(acc: &PerRoot<Stage1Data>) -> Stage1Data {
    let mut merged = Stage1Data::default();
    for per_root in acc {
        if let Some(image) = &per_root.image {
            merged.image = Some(image.clone());
        }
        if let Some(location) = &per_root.location {
            merged.location = Some(location.clone());
        }
    }
    merged
}
