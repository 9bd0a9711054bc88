//! Schema types understood by a [`Directory`](crate::Directory)
//!
//! A schema type tells the walker which files are eligible for parsing and
//! how to peek at their kind and version without decoding the payload.
//!
//! # Example envelope
//!
//! ```json
//! {
//!     "rktKind": "auth",
//!     "rktVersion": "v1",
//!     "domains": ["example.com"],
//!     "type": "oauth",
//!     "credentials": { "token": "sometoken" }
//! }
//! ```

use crate::BoxError;
use serde::{Deserialize, Serialize};

/// Kind and version pair identifying a file's schema and its revision
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindVersion {
    pub kind: String,
    pub version: String,
}

impl KindVersion {
    pub fn new(kind: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            version: version.into(),
        }
    }
}

/// Describes the files a directory should be able to parse.
pub trait ConfigType {
    /// File extension without the leading dot, e.g. `"json"`.
    fn extension(&self) -> &str;

    /// Peek at the kind and version of a file.
    ///
    /// Fails when the content is not in the expected format or when the
    /// kind or version is missing.
    fn kind_and_version(&self, raw: &[u8]) -> Result<KindVersion, BoxError>;
}

/// Envelope header carried by every primary-schema JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnvelopeHeader {
    #[serde(rename = "rktKind", default)]
    pub kind: String,
    #[serde(rename = "rktVersion", default)]
    pub version: String,
}

impl EnvelopeHeader {
    pub fn new(kind: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            version: version.into(),
        }
    }
}

/// Errors produced while reading the envelope header
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no rktKind specified")]
    NoKind,

    #[error("no rktVersion specified")]
    NoVersion,
}

/// The primary schema: JSON files with an `rktKind`/`rktVersion` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEnvelope;

impl JsonEnvelope {
    pub fn header(raw: &[u8]) -> Result<EnvelopeHeader, EnvelopeError> {
        let header: EnvelopeHeader = serde_json::from_slice(raw)?;
        if header.kind.is_empty() {
            return Err(EnvelopeError::NoKind);
        }
        if header.version.is_empty() {
            return Err(EnvelopeError::NoVersion);
        }
        Ok(header)
    }
}

impl ConfigType for JsonEnvelope {
    fn extension(&self) -> &str {
        "json"
    }

    fn kind_and_version(&self, raw: &[u8]) -> Result<KindVersion, BoxError> {
        let header = Self::header(raw)?;
        Ok(KindVersion::new(header.kind, header.version))
    }
}
