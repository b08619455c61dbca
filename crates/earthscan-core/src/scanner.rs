use std::ffi::OsStr;
use std::path::Path;

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::model::Earthfile;
use crate::parser::{EarthfileParser, Parser};
use crate::query::find_target;
use crate::walker::{FsWalker, WalkConfig, Walker};

/// Finds Earthfiles below a set of roots and keeps those a predicate accepts.
///
/// Scanning stops at the first walk, parse or predicate error; callers
/// never see a partial result list.
pub struct Scanner {
    walker: Box<dyn Walker>,
    parser: Box<dyn Parser>,
    file_name: String,
}

impl Scanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            walker: Box::new(FsWalker::new(WalkConfig::from(config))),
            parser: Box::new(EarthfileParser::new()),
            file_name: config.file_name.clone(),
        }
    }

    #[must_use]
    pub fn with_walker(mut self, walker: Box<dyn Walker>) -> Self {
        self.walker = walker;
        self
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    /// Every Earthfile below `roots`.
    pub fn scan_all<P: AsRef<Path>>(&self, roots: &[P]) -> Result<Vec<Earthfile>> {
        self.scan(roots, |_| Ok(true))
    }

    /// Earthfiles below `roots` that declare `target`.
    pub fn scan_for_target<P: AsRef<Path>>(
        &self,
        roots: &[P],
        target: &str,
    ) -> Result<Vec<Earthfile>> {
        self.scan(roots, has_target(target))
    }

    /// Results keep root order, then walk order within each root.
    pub fn scan<P, F>(&self, roots: &[P], predicate: F) -> Result<Vec<Earthfile>>
    where
        P: AsRef<Path>,
        F: Fn(&Earthfile) -> Result<bool>,
    {
        let mut found = Vec::new();

        for root in roots {
            self.walker.walk(root.as_ref(), &mut |path, is_dir| {
                if is_dir || !self.is_earthfile(path) {
                    return Ok(());
                }

                tracing::debug!("Parsing {}", path.display());
                let earthfile = self.parser.parse_file(path).map_err(|source| Error::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;

                if predicate(&earthfile)? {
                    found.push(earthfile);
                } else {
                    tracing::debug!("Excluded {}", path.display());
                }
                Ok(())
            })?;
        }

        Ok(found)
    }

    fn is_earthfile(&self, path: &Path) -> bool {
        path.file_name() == Some(OsStr::new(&self.file_name))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}

/// Accepts Earthfiles that declare `target`. A missing target excludes the
/// file; any other error is passed through.
pub fn has_target(target: &str) -> impl Fn(&Earthfile) -> Result<bool> + '_ {
    move |earthfile| match find_target(earthfile, target) {
        Ok(_) => Ok(true),
        Err(err) if err.is_not_found() => Ok(false),
        Err(err) => Err(err),
    }
}

/// Accepts Earthfiles with at least one target using `command`.
pub fn has_command(command: &str) -> impl Fn(&Earthfile) -> Result<bool> + '_ {
    move |earthfile| {
        Ok(earthfile
            .targets
            .iter()
            .flat_map(|t| t.commands.iter())
            .any(|c| c.name == command))
    }
}
