//! Stage0 domain set: directory registration, parsing and merging

use crate::auth::{
    AuthPerHost, DockerCredentialsPerRegistry, merge_keyed, parse_auth_v1, parse_docker_auth_v1,
};
use crate::paths::{merge_paths, parse_paths_v1};
use crate::schema::{KIND_AUTH, KIND_DOCKER_AUTH, KIND_PATHS, KIND_STAGE1, VERSION_V1};
use crate::stage1::{merge_stage1, parse_stage1_v1};
use crate::types::{Config, ConfigurablePaths, Stage1Data};
use crate::Result;
use podcfg_dir::{
    BoxError, Directory, JsonEnvelope, Parser, ParserSetup, PathIndex, PerRoot, SubdirSetup,
};
use std::path::Path;

/// Basename of the stage0 configuration directory.
pub const CDB: &str = "stage0";

/// Handlers of the stage0 domain set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage0Parser {
    AuthV1,
    DockerAuthV1,
    PathsV1,
    Stage1V1,
}

/// Per-root accumulators of every stage0 domain
#[derive(Debug, Default)]
pub struct Stage0Parsers {
    auth: PerRoot<AuthPerHost>,
    docker_auth: PerRoot<DockerCredentialsPerRegistry>,
    paths: PerRoot<ConfigurablePaths>,
    stage1: PerRoot<Stage1Data>,
}

impl Parser for Stage0Parsers {
    type Tag = Stage0Parser;

    fn parse(
        &mut self,
        tag: Stage0Parser,
        idx: &PathIndex,
        raw: &[u8],
    ) -> std::result::Result<(), BoxError> {
        let index = idx.index;
        let result = match tag {
            Stage0Parser::AuthV1 => parse_auth_v1(self.auth.get_mut(index), raw),
            Stage0Parser::DockerAuthV1 => {
                parse_docker_auth_v1(self.docker_auth.get_mut(index), raw)
            }
            Stage0Parser::PathsV1 => parse_paths_v1(self.paths.get_mut(index), raw),
            Stage0Parser::Stage1V1 => parse_stage1_v1(self.stage1.get_mut(index), raw),
        };
        result.map_err(Into::into)
    }
}

impl Stage0Parsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any stage0 file was parsed.
    pub fn visited(&self) -> bool {
        self.auth.visited()
            || self.docker_auth.visited()
            || self.paths.visited()
            || self.stage1.visited()
    }

    /// Fold the accumulators, in root order, into the effective config.
    pub fn merge(&self) -> Config {
        Config {
            auth_per_host: merge_keyed(&self.auth),
            docker_credentials_per_registry: merge_keyed(&self.docker_auth),
            paths: merge_paths(&self.paths),
            stage1: merge_stage1(&self.stage1),
        }
    }
}

/// Build the stage0 configuration directory with all kinds registered.
pub fn config_directory() -> Result<Directory<JsonEnvelope, Stage0Parser>> {
    let mut dir = Directory::new(CDB, JsonEnvelope);
    dir.register_parsers(&[
        ParserSetup::new(KIND_AUTH, VERSION_V1, Stage0Parser::AuthV1),
        ParserSetup::new(KIND_DOCKER_AUTH, VERSION_V1, Stage0Parser::DockerAuthV1),
        ParserSetup::new(KIND_PATHS, VERSION_V1, Stage0Parser::PathsV1),
        ParserSetup::new(KIND_STAGE1, VERSION_V1, Stage0Parser::Stage1V1),
    ])?;
    dir.register_subdirectories(&[
        SubdirSetup::new("auth.d", [KIND_AUTH, KIND_DOCKER_AUTH]),
        SubdirSetup::new("paths.d", [KIND_PATHS]),
        SubdirSetup::new("stage1.d", [KIND_STAGE1]),
    ])?;
    Ok(dir)
}

/// Resolve the stage0 configuration from the given toplevel roots.
///
/// Later roots override earlier ones.
pub fn get_config_from<R: AsRef<Path>>(roots: &[R]) -> Result<Config> {
    let dir = config_directory()?;
    let mut parsers = Stage0Parsers::new();
    dir.walk_directories(roots, &mut parsers)?;
    let config = parsers.merge();
    tracing::debug!(
        hosts = config.auth_per_host.len(),
        registries = config.docker_credentials_per_registry.len(),
        "resolved stage0 configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_registers_all_subdirectories() {
        let dir = config_directory().unwrap();
        let subdirs: Vec<&str> = dir.subdirectories().keys().map(String::as_str).collect();
        assert_eq!(subdirs, vec!["auth.d", "paths.d", "stage1.d"]);
        assert_eq!(dir.parser_for("dockerAuth", "v1").unwrap(), Stage0Parser::DockerAuthV1);
        assert!(dir.parser_for("auth", "v2").is_err());
    }

    #[test]
    fn fresh_parsers_are_not_visited() {
        let parsers = Stage0Parsers::new();
        assert!(!parsers.visited());
        assert_eq!(parsers.merge(), Config::default());
    }
}
