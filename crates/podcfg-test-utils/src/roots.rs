//! [`TestRoots`] builder for layered configuration scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding any number of named toplevel roots.
///
/// # Example
///
/// ```rust,no_run
/// use podcfg_test_utils::TestRoots;
///
/// let roots = TestRoots::new();
/// roots.write("lib", "stage0/paths.d/paths.json", r#"{"rktKind":"paths","rktVersion":"v1"}"#);
/// let lib = roots.root("lib");
/// assert!(lib.join("stage0/paths.d/paths.json").exists());
/// ```
pub struct TestRoots {
    temp_dir: TempDir,
}

impl Default for TestRoots {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoots {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Path of the temporary directory itself.
    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the named root. It is not created until a file is written.
    pub fn root(&self, name: &str) -> PathBuf {
        self.base().join(name)
    }

    /// Paths of the named roots, in the given order.
    pub fn roots(&self, names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|name| self.root(name)).collect()
    }

    /// Write `content` to `relative` under the named root, creating parents.
    pub fn write(&self, root: &str, relative: &str, content: &str) -> PathBuf {
        let path = self.root(root).join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a JSON value pretty-printed to `relative` under the named root.
    pub fn write_json(&self, root: &str, relative: &str, value: &serde_json::Value) -> PathBuf {
        let content = serde_json::to_string_pretty(value).unwrap();
        self.write(root, relative, &content)
    }

    /// Create an empty directory under the named root.
    pub fn mkdir(&self, root: &str, relative: &str) -> PathBuf {
        let path = self.root(root).join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a stage0 file, e.g. `stage0("etc", "auth.d", "basic.json", ...)`.
    pub fn stage0(&self, root: &str, subdir: &str, file: &str, content: &str) -> PathBuf {
        self.write(root, &format!("stage0/{subdir}/{file}"), content)
    }

    /// Write a file into the current network schema directory.
    pub fn stage1(&self, root: &str, subdir: &str, file: &str, content: &str) -> PathBuf {
        self.write(root, &format!("stage1/{subdir}/{file}"), content)
    }

    /// Write a legacy network configuration into `net.d` directly under the root.
    pub fn legacy_net(&self, root: &str, file: &str, content: &str) -> PathBuf {
        self.write(root, &format!("net.d/{file}"), content)
    }
}
