//! Filesystem enumeration used by the scanner.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{Error, Result};

/// Visits every file and directory beneath a root, the root included.
///
/// The callback receives each entry's path and whether it is a directory.
/// An error returned by the callback stops the walk and is passed through.
pub trait Walker {
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path, bool) -> Result<()>) -> Result<()>;
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkConfig {
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
    /// Maximum depth to traverse. None means unlimited.
    pub max_depth: Option<usize>,
}

impl From<&ScanConfig> for WalkConfig {
    fn from(config: &ScanConfig) -> Self {
        Self {
            follow_symlinks: config.follow_symlinks,
            max_depth: config.max_depth,
        }
    }
}

/// Walks the real filesystem. Siblings are visited in file name order so
/// that repeated walks over the same tree agree.
#[derive(Debug, Clone, Default)]
pub struct FsWalker {
    config: WalkConfig,
}

impl FsWalker {
    pub const fn new(config: WalkConfig) -> Self {
        Self { config }
    }
}

impl Walker for FsWalker {
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path, bool) -> Result<()>) -> Result<()> {
        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                Error::Walk {
                    path,
                    source: err.into(),
                }
            })?;
            visit(entry.path(), entry.file_type().is_dir())?;
        }

        Ok(())
    }
}

/// In-memory tree for tests. Directories are implied by the file paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryWalker {
    files: BTreeSet<PathBuf>,
}

impl MemoryWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    /// Root plus every file and intermediate directory below it. Path
    /// ordering is component-wise, which is a pre-order walk with sorted
    /// siblings.
    fn entries_under(&self, root: &Path) -> BTreeSet<PathBuf> {
        let mut entries = BTreeSet::new();
        for file in self.files.iter().filter(|f| f.starts_with(root)) {
            entries.extend(
                file.ancestors()
                    .take_while(|a| a.starts_with(root))
                    .map(Path::to_path_buf),
            );
        }
        entries
    }
}

impl Walker for MemoryWalker {
    fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path, bool) -> Result<()>) -> Result<()> {
        let entries = self.entries_under(root);
        if entries.is_empty() {
            return Err(Error::Walk {
                path: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            });
        }

        for entry in &entries {
            visit(entry, !self.files.contains(entry))?;
        }

        Ok(())
    }
}
