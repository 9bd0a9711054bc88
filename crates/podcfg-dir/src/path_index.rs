//! Identification of a visited configuration file

use std::path::{Path, PathBuf};

/// Ties a configuration directory to its position in the list of toplevel
/// directories passed to [`Directory::walk_directories`].
///
/// `index` is tied only to `path`, so a parser can receive many
/// `PathIndex` values with the same `index` and `path` but different
/// `subdirectory` and `filename` fields.
///
/// [`Directory::walk_directories`]: crate::Directory::walk_directories
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathIndex {
    /// Position of the toplevel root in the walked list
    pub index: usize,
    /// Toplevel root joined with the configuration directory basename
    pub path: PathBuf,
    /// Name of the registered subdirectory, empty until it is entered
    pub subdirectory: String,
    /// Base name of the parsed file, empty until the file is parsed
    pub filename: String,
}

impl PathIndex {
    pub fn new(index: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            path: path.into(),
            subdirectory: String::new(),
            filename: String::new(),
        }
    }

    /// Full path of the file this index points at.
    pub fn file_path(&self) -> PathBuf {
        self.path.join(&self.subdirectory).join(&self.filename)
    }

    /// Directory holding the file this index points at.
    pub fn subdirectory_path(&self) -> PathBuf {
        self.path.join(&self.subdirectory)
    }

    pub(crate) fn with_subdirectory(&self, subdirectory: &str) -> Self {
        Self {
            index: self.index,
            path: self.path.clone(),
            subdirectory: subdirectory.to_string(),
            filename: String::new(),
        }
    }

    pub(crate) fn with_filename(&self, file: &Path) -> Self {
        Self {
            index: self.index,
            path: self.path.clone(),
            subdirectory: self.subdirectory.clone(),
            filename: file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}
