use std::path::PathBuf;
use thiserror::Error;

use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Lookup misses are an expected outcome, not a failure of the input.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TargetNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
