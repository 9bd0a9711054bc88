//! Registry credentials and the HTTP headers they produce

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the header every credential kind renders.
pub const AUTH_HEADER: &str = "Authorization";

/// User and password pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BasicCredentials {
    pub user: String,
    pub password: String,
}

/// Credentials used to authenticate against an image host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic(BasicCredentials),
    OAuthBearer { token: String },
}

impl Credentials {
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic(BasicCredentials {
            user: user.into(),
            password: password.into(),
        })
    }

    pub fn oauth_bearer(token: impl Into<String>) -> Self {
        Self::OAuthBearer {
            token: token.into(),
        }
    }

    /// The `type` this credential has in an `auth` file.
    pub fn auth_type(&self) -> &'static str {
        match self {
            Self::Basic(_) => crate::schema::AUTH_TYPE_BASIC,
            Self::OAuthBearer { .. } => crate::schema::AUTH_TYPE_OAUTH,
        }
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic(basic) => {
                let creds = format!("{}:{}", basic.user, basic.password);
                format!("Basic {}", STANDARD.encode(creds))
            }
            Self::OAuthBearer { token } => format!("Bearer {token}"),
        }
    }

    /// Header name and value pair.
    pub fn header(&self) -> (&'static str, String) {
        (AUTH_HEADER, self.header_value())
    }

    /// The `credentials` object of an `auth` file.
    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Basic(basic) => serde_json::json!({
                "user": basic.user,
                "password": basic.password,
            }),
            Self::OAuthBearer { token } => serde_json::json!({ "token": token }),
        }
    }
}

/// Render the header for every host.
pub fn resolve_auth_per_host(
    auth_per_host: &BTreeMap<String, Credentials>,
) -> BTreeMap<String, (&'static str, String)> {
    auth_per_host
        .iter()
        .map(|(host, creds)| (host.clone(), creds.header()))
        .collect()
}
