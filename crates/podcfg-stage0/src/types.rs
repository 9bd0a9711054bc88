//! Effective stage0 configuration

use crate::credentials::{BasicCredentials, Credentials};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Directories the engine may relocate through `paths` files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurablePaths {
    pub data_dir: Option<PathBuf>,
    pub stage1_images_dir: Option<PathBuf>,
}

/// Name and version of the default stage1 image, always set together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage1Image {
    pub name: String,
    pub version: String,
}

/// Default stage1 image selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage1Data {
    pub image: Option<Stage1Image>,
    /// Absolute path or URL of the default stage1 image
    pub location: Option<String>,
}

/// The effective stage0 configuration resolved from all toplevel roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub auth_per_host: BTreeMap<String, Credentials>,
    pub docker_credentials_per_registry: BTreeMap<String, BasicCredentials>,
    pub paths: ConfigurablePaths,
    pub stage1: Stage1Data,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
}
