//! `auth` and `dockerAuth` kinds
//!
//! Within one root a host or registry may be configured only once. Across
//! roots the later root replaces the earlier declaration.

use crate::credentials::{BasicCredentials, Credentials};
use crate::schema::{AUTH_TYPE_BASIC, AUTH_TYPE_OAUTH, AuthV1, BasicV1, DockerAuthV1, OAuthV1};
use crate::{Error, Result};
use podcfg_dir::PerRoot;
use std::collections::BTreeMap;

pub type AuthPerHost = BTreeMap<String, Credentials>;
pub type DockerCredentialsPerRegistry = BTreeMap<String, BasicCredentials>;

pub(crate) fn parse_auth_v1(acc: &mut AuthPerHost, raw: &[u8]) -> Result<()> {
    let auth: AuthV1 = serde_json::from_slice(raw)?;
    if auth.domains.is_empty() {
        return Err(Error::NoDomains);
    }
    let credentials = match auth.auth_type.as_str() {
        "" => return Err(Error::NoAuthType),
        AUTH_TYPE_BASIC => {
            let basic: BasicV1 = serde_json::from_value(auth.credentials)?;
            Credentials::Basic(validate_basic_v1(basic)?)
        }
        AUTH_TYPE_OAUTH => {
            let oauth: OAuthV1 = serde_json::from_value(auth.credentials)?;
            if oauth.token.is_empty() {
                return Err(Error::NoToken);
            }
            Credentials::OAuthBearer { token: oauth.token }
        }
        other => {
            return Err(Error::UnknownAuthType {
                auth_type: other.to_string(),
            });
        }
    };
    for domain in auth.domains {
        if acc.contains_key(&domain) {
            return Err(Error::DuplicateDomain { domain });
        }
        acc.insert(domain, credentials.clone());
    }
    Ok(())
}

pub(crate) fn parse_docker_auth_v1(acc: &mut DockerCredentialsPerRegistry, raw: &[u8]) -> Result<()> {
    let auth: DockerAuthV1 = serde_json::from_slice(raw)?;
    if auth.registries.is_empty() {
        return Err(Error::NoRegistries);
    }
    let basic = validate_basic_v1(auth.credentials)?;
    for registry in auth.registries {
        if acc.contains_key(&registry) {
            return Err(Error::DuplicateRegistry { registry });
        }
        acc.insert(registry, basic.clone());
    }
    Ok(())
}

fn validate_basic_v1(basic: BasicV1) -> Result<BasicCredentials> {
    if basic.user.is_empty() {
        return Err(Error::UserNotSpecified);
    }
    if basic.password.is_empty() {
        return Err(Error::PasswordNotSpecified);
    }
    Ok(BasicCredentials {
        user: basic.user,
        password: basic.password,
    })
}

/// Fold per-root maps in root order, later roots replacing earlier keys.
pub fn merge_keyed<V: Clone>(acc: &PerRoot<BTreeMap<String, V>>) -> BTreeMap<String, V> {
    let mut merged = BTreeMap::new();
    for per_root in acc {
        for (key, value) in per_root {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
