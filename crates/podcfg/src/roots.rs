//! Conventional toplevel configuration roots

use std::path::PathBuf;

/// Vendor defaults shipped with the package
pub const DEFAULT_SYSTEM_CONFIG: &str = "/usr/lib/podcfg";
/// Administrator overrides
pub const DEFAULT_LOCAL_CONFIG: &str = "/etc/podcfg";

pub const ENV_SYSTEM_CONFIG: &str = "PODCFG_SYSTEM_CONFIG";
pub const ENV_LOCAL_CONFIG: &str = "PODCFG_LOCAL_CONFIG";
pub const ENV_USER_CONFIG: &str = "PODCFG_USER_CONFIG";

/// The ordered toplevel roots: system, then local, then user.
///
/// Later roots override earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoots {
    pub system: PathBuf,
    pub local: PathBuf,
    /// Per-user root; `None` when the platform has no config directory
    pub user: Option<PathBuf>,
}

impl Default for ConfigRoots {
    fn default() -> Self {
        Self {
            system: PathBuf::from(DEFAULT_SYSTEM_CONFIG),
            local: PathBuf::from(DEFAULT_LOCAL_CONFIG),
            user: dirs::config_dir().map(|d| d.join("podcfg")),
        }
    }
}

impl ConfigRoots {
    /// Defaults overridden by the `PODCFG_*_CONFIG` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from))
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// An empty value disables the user root and is ignored for the others.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        let mut roots = Self::default();
        let set = |key: &str| lookup(key).filter(|p| !p.as_os_str().is_empty());
        if let Some(system) = set(ENV_SYSTEM_CONFIG) {
            roots.system = system;
        }
        if let Some(local) = set(ENV_LOCAL_CONFIG) {
            roots.local = local;
        }
        if let Some(user) = lookup(ENV_USER_CONFIG) {
            roots.user = (!user.as_os_str().is_empty()).then_some(user);
        }
        roots
    }

    /// Roots in override order.
    pub fn ordered(&self) -> Vec<PathBuf> {
        let mut roots = vec![self.system.clone(), self.local.clone()];
        roots.extend(self.user.clone());
        roots
    }
}
