#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod images;
pub mod model;
pub mod parser;
pub mod query;
pub mod scanner;
pub mod walker;

pub use config::ScanConfig;
pub use error::{Error, Result};
pub use images::{extract_images, image_name, SAVE_IMAGE};
pub use model::{Command, Earthfile, Target};
pub use parser::{EarthfileParser, ParseError, ParseResult, Parser};
pub use query::{find_commands, find_target};
pub use scanner::{has_command, has_target, Scanner};
pub use walker::{FsWalker, MemoryWalker, WalkConfig, Walker};
