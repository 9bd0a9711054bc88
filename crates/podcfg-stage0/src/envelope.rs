//! Serializing an effective config back into envelope documents
//!
//! Each document is a complete primary-schema file. Writing every document
//! into its subdirectory of a single root and resolving that root again
//! yields the same effective config.

use crate::credentials::Credentials;
use crate::schema::{
    AuthV1, BasicV1, DockerAuthV1, KIND_AUTH, KIND_DOCKER_AUTH, KIND_PATHS, KIND_STAGE1, PathsV1,
    Stage1V1, VERSION_V1,
};
use crate::types::Config;
use podcfg_dir::EnvelopeHeader;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A document together with the subdirectory it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub subdirectory: &'static str,
    pub value: Value,
}

impl Config {
    /// Every setting of this config as a primary-schema document.
    ///
    /// One document per host and per registry, one for the paths and one
    /// for the stage1 selection.
    pub fn to_documents(&self) -> Vec<Document> {
        let mut docs = Vec::new();
        for (host, creds) in &self.auth_per_host {
            docs.push(auth_document(host, creds));
        }
        for (registry, creds) in &self.docker_credentials_per_registry {
            let doc = DockerAuthV1 {
                header: EnvelopeHeader::new(KIND_DOCKER_AUTH, VERSION_V1),
                registries: vec![registry.clone()],
                credentials: BasicV1 {
                    user: creds.user.clone(),
                    password: creds.password.clone(),
                },
            };
            docs.push(document("auth.d", &doc));
        }
        let paths = PathsV1 {
            header: EnvelopeHeader::new(KIND_PATHS, VERSION_V1),
            data: display(self.paths.data_dir.as_deref()),
            stage1_images: display(self.paths.stage1_images_dir.as_deref()),
        };
        docs.push(document("paths.d", &paths));
        let (name, version) = match &self.stage1.image {
            Some(image) => (image.name.clone(), image.version.clone()),
            None => (String::new(), String::new()),
        };
        let stage1 = Stage1V1 {
            header: EnvelopeHeader::new(KIND_STAGE1, VERSION_V1),
            name,
            version,
            location: self.stage1.location.clone().unwrap_or_default(),
        };
        docs.push(document("stage1.d", &stage1));
        docs
    }
}

fn auth_document(host: &str, creds: &Credentials) -> Document {
    let doc = AuthV1 {
        header: EnvelopeHeader::new(KIND_AUTH, VERSION_V1),
        domains: vec![host.to_string()],
        auth_type: creds.auth_type().to_string(),
        credentials: creds.to_json(),
    };
    document("auth.d", &doc)
}

fn document<T: Serialize>(subdirectory: &'static str, doc: &T) -> Document {
    Document {
        subdirectory,
        // the wire structs only hold strings, vectors and JSON values
        value: serde_json::to_value(doc).unwrap_or(Value::Null),
    }
}

fn display(path: Option<&std::path::Path>) -> String {
    path.map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Serializes as `{"stage0": [documents...]}`.
impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let docs: Vec<Value> = self.to_documents().into_iter().map(|d| d.value).collect();
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("stage0", &docs)?;
        map.end()
    }
}
