//! Wire formats of the stage0 configuration kinds
//!
//! Every file carries the `rktKind`/`rktVersion` envelope; the structs here
//! describe the rest of the payload. They are used both to decode files and
//! to emit them again from an effective [`Config`](crate::Config).
//!
//! # Example files
//!
//! ```json
//! { "rktKind": "auth", "rktVersion": "v1",
//!   "domains": ["coreos.com", "tectonic.com"],
//!   "type": "basic",
//!   "credentials": { "user": "foo", "password": "bar" } }
//!
//! { "rktKind": "dockerAuth", "rktVersion": "v1",
//!   "registries": ["quay.io"],
//!   "credentials": { "user": "foo", "password": "bar" } }
//!
//! { "rktKind": "paths", "rktVersion": "v1",
//!   "data": "/var/lib/podcfg", "stage1-images": "/usr/lib/podcfg/stage1" }
//!
//! { "rktKind": "stage1", "rktVersion": "v1",
//!   "name": "example.com/stage1", "version": "1.2.3",
//!   "location": "https://example.com/stage1.aci" }
//! ```

use podcfg_dir::EnvelopeHeader;
use serde::{Deserialize, Serialize};

pub const VERSION_V1: &str = "v1";
pub const KIND_AUTH: &str = "auth";
pub const KIND_DOCKER_AUTH: &str = "dockerAuth";
pub const KIND_PATHS: &str = "paths";
pub const KIND_STAGE1: &str = "stage1";

pub const AUTH_TYPE_BASIC: &str = "basic";
pub const AUTH_TYPE_OAUTH: &str = "oauth";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthV1 {
    #[serde(flatten)]
    pub header: EnvelopeHeader,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(rename = "type", default)]
    pub auth_type: String,
    #[serde(default)]
    pub credentials: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BasicV1 {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OAuthV1 {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DockerAuthV1 {
    #[serde(flatten)]
    pub header: EnvelopeHeader,
    #[serde(default)]
    pub registries: Vec<String>,
    #[serde(default)]
    pub credentials: BasicV1,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PathsV1 {
    #[serde(flatten)]
    pub header: EnvelopeHeader,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data: String,
    #[serde(rename = "stage1-images", default, skip_serializing_if = "String::is_empty")]
    pub stage1_images: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Stage1V1 {
    #[serde(flatten)]
    pub header: EnvelopeHeader,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
}
