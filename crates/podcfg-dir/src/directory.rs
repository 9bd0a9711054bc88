//! Configuration directory registry and walker
//!
//! A [`Directory`] wraps one configuration directory basename (cdb). It
//! knows which subdirectories to look into, which kinds of files each of
//! them may hold, and which parser handles every `(kind, version)` pair.
//!
//! ```text
//! <toplevel root>            (/usr/lib/podcfg, /etc/podcfg, ...)
//!   <cdb>                    (stage0)
//!     <subdirectory>         (auth.d, paths.d, ...)
//!       <name>.<extension>   (basic.json, ...)
//! ```
//!
//! Parsers are identified by a tag of a closed type chosen by the domain
//! set that drives the walk. The walker hands the tag of the matching
//! registration, together with the raw file contents, to a [`Parser`].

use crate::{BoxError, ConfigType, Error, PathIndex, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives the files found by [`Directory::walk_directories`].
///
/// Storing the results of parsing is the implementor's responsibility. The
/// `idx` tells which toplevel root the file came from.
pub trait Parser {
    /// Identifies which registered handler should decode the file.
    type Tag: Copy;

    fn parse(
        &mut self,
        tag: Self::Tag,
        idx: &PathIndex,
        raw: &[u8],
    ) -> std::result::Result<(), BoxError>;
}

/// Bulk registration entry for [`Directory::register_parsers`].
#[derive(Debug, Clone)]
pub struct ParserSetup<P> {
    pub kind: String,
    pub version: String,
    pub parser: P,
}

impl<P> ParserSetup<P> {
    pub fn new(kind: impl Into<String>, version: impl Into<String>, parser: P) -> Self {
        Self {
            kind: kind.into(),
            version: version.into(),
            parser,
        }
    }
}

/// Bulk registration entry for [`Directory::register_subdirectories`].
#[derive(Debug, Clone)]
pub struct SubdirSetup {
    pub subdir: String,
    pub kinds: Vec<String>,
}

impl SubdirSetup {
    pub fn new<K: Into<String>>(subdir: impl Into<String>, kinds: impl IntoIterator<Item = K>) -> Self {
        Self {
            subdir: subdir.into(),
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }
}

/// A configuration directory of a single schema type.
#[derive(Debug)]
pub struct Directory<T, P> {
    cdb: String,
    config_type: T,
    subdirs: BTreeMap<String, BTreeSet<String>>,
    parsers: HashMap<String, HashMap<String, P>>,
}

impl<T: ConfigType, P: Copy> Directory<T, P> {
    /// Create a directory for the given configuration directory basename.
    ///
    /// The basename is just `"stage0"`, not `"/etc/podcfg/stage0"`. It may
    /// be empty, in which case subdirectories live directly in the
    /// toplevel roots.
    pub fn new(cdb: impl Into<String>, config_type: T) -> Self {
        Self {
            cdb: cdb.into(),
            config_type,
            subdirs: BTreeMap::new(),
            parsers: HashMap::new(),
        }
    }

    pub fn cdb(&self) -> &str {
        &self.cdb
    }

    pub fn config_type(&self) -> &T {
        &self.config_type
    }

    /// Registered subdirectories and the kinds each of them accepts.
    pub fn subdirectories(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.subdirs
    }

    /// Register a parser for a kind and a version.
    ///
    /// Fails if either string is empty or if the pair is already taken.
    pub fn register_parser(&mut self, kind: &str, version: &str, parser: P) -> Result<()> {
        if kind.is_empty() {
            return Err(Error::EmptyKind {
                version: version.to_string(),
            });
        }
        if version.is_empty() {
            return Err(Error::EmptyVersion {
                kind: kind.to_string(),
            });
        }
        let versions = self.parsers.entry(kind.to_string()).or_default();
        if versions.contains_key(version) {
            return Err(Error::DuplicateParser {
                kind: kind.to_string(),
                version: version.to_string(),
            });
        }
        versions.insert(version.to_string(), parser);
        Ok(())
    }

    /// Register many parsers, stopping at the first failure.
    pub fn register_parsers(&mut self, setups: &[ParserSetup<P>]) -> Result<()> {
        for setup in setups {
            self.register_parser(&setup.kind, &setup.version, setup.parser)?;
        }
        Ok(())
    }

    /// Register a subdirectory holding files of the given kinds.
    ///
    /// Registering an already known subdirectory merges the kinds.
    pub fn register_subdirectory<K: AsRef<str>>(&mut self, subdir: &str, kinds: &[K]) -> Result<()> {
        let kinds: Vec<String> = kinds.iter().map(|k| k.as_ref().to_string()).collect();
        if subdir.is_empty() {
            return Err(Error::EmptySubdirectory { kinds });
        }
        if kinds.is_empty() {
            return Err(Error::NoKinds {
                subdir: subdir.to_string(),
            });
        }
        self.subdirs
            .entry(subdir.to_string())
            .or_default()
            .extend(kinds);
        Ok(())
    }

    /// Register many subdirectories, stopping at the first failure.
    pub fn register_subdirectories(&mut self, setups: &[SubdirSetup]) -> Result<()> {
        for setup in setups {
            self.register_subdirectory(&setup.subdir, &setup.kinds[..])?;
        }
        Ok(())
    }

    /// Look up the parser registered for a kind and a version.
    pub fn parser_for(&self, kind: &str, version: &str) -> Result<P> {
        let versions = self.parsers.get(kind).ok_or_else(|| Error::NoParserForKind {
            kind: kind.to_string(),
        })?;
        versions
            .get(version)
            .copied()
            .ok_or_else(|| Error::NoParserForVersion {
                kind: kind.to_string(),
                version: version.to_string(),
            })
    }

    /// Walk the configuration directory in each toplevel root and parse
    /// every eligible file.
    ///
    /// Roots are visited in order; the position of a root in `roots` is
    /// the `index` of every [`PathIndex`] produced for files under it.
    /// The walk stops at the first error.
    pub fn walk_directories<R, S>(&self, roots: &[R], parser: &mut S) -> Result<()>
    where
        R: AsRef<Path>,
        S: Parser<Tag = P>,
    {
        for (index, root) in roots.iter().enumerate() {
            let config_dir = self.config_dir(root.as_ref());
            let idx = PathIndex::new(index, config_dir);
            self.walk_config_directory(&idx, parser)?;
        }
        Ok(())
    }

    fn config_dir(&self, root: &Path) -> PathBuf {
        if self.cdb.is_empty() {
            root.to_path_buf()
        } else {
            root.join(&self.cdb)
        }
    }

    fn walk_config_directory<S>(&self, idx: &PathIndex, parser: &mut S) -> Result<()>
    where
        S: Parser<Tag = P>,
    {
        if !valid_dir(&idx.path)? {
            tracing::trace!(path = ?idx.path, "configuration directory missing, skipping");
            return Ok(());
        }
        tracing::debug!(path = ?idx.path, index = idx.index, "walking configuration directory");
        for (subdir, kinds) in &self.subdirs {
            let sub_idx = idx.with_subdirectory(subdir);
            let sub_path = sub_idx.subdirectory_path();
            if !valid_dir(&sub_path)? {
                continue;
            }
            self.read_subdirectory(&sub_idx, &sub_path, kinds, parser)?;
        }
        Ok(())
    }

    fn read_subdirectory<S>(
        &self,
        idx: &PathIndex,
        dir: &Path,
        kinds: &BTreeSet<String>,
        parser: &mut S,
    ) -> Result<()>
    where
        S: Parser<Tag = P>,
    {
        let mut entries = fs::read_dir(dir)
            .and_then(|entries| entries.collect::<std::io::Result<Vec<_>>>())
            .map_err(|e| Error::io(dir, e))?;
        entries.sort_by_key(|entry| entry.file_name());

        let extension = OsStr::new(self.config_type.extension());
        for entry in entries {
            let path = entry.path();
            // file_type() does not follow symlinks
            let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
            if file_type.is_dir() {
                tracing::trace!(?path, "skipping nested directory");
                continue;
            }
            if !file_type.is_file() {
                tracing::trace!(?path, "ignoring non-regular file");
                continue;
            }
            if path.extension() != Some(extension) {
                continue;
            }
            self.parse_config_file(idx, &path, kinds, parser)?;
        }
        Ok(())
    }

    fn parse_config_file<S>(
        &self,
        idx: &PathIndex,
        path: &Path,
        kinds: &BTreeSet<String>,
        parser: &mut S,
    ) -> Result<()>
    where
        S: Parser<Tag = P>,
    {
        let raw = fs::read(path).map_err(|e| Error::io(path, e))?;
        let kv = self
            .config_type
            .kind_and_version(&raw)
            .map_err(|source| Error::KindAndVersion {
                path: path.to_path_buf(),
                source,
            })?;
        if !kinds.contains(&kv.kind) {
            return Err(Error::KindNotAllowed {
                dir: idx.subdirectory_path(),
                file: file_name(path),
                allowed: kinds.iter().cloned().collect(),
                kind: kv.kind,
            });
        }
        let tag = self.parser_for(&kv.kind, &kv.version)?;
        tracing::debug!(?path, kind = %kv.kind, version = %kv.version, "parsing configuration file");
        parser
            .parse(tag, &idx.with_filename(path), &raw)
            .map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `Ok(false)` when the path does not exist, an error when it exists but
/// is not a directory or cannot be inspected.
fn valid_dir(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => Err(Error::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}
