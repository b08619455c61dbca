pub mod images;
pub mod scan;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use earthscan_core::ScanConfig;

use crate::output::Format;

#[derive(Parser)]
#[command(
    name = "earthscan",
    about = "Find Earthfiles and the images their targets save",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List Earthfiles below the given paths
    Scan {
        /// Directories (or Earthfiles) to scan
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        /// Only list Earthfiles that declare this target
        #[arg(short, long)]
        target: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[command(flatten)]
        walk: WalkArgs,
    },
    /// List the images a target saves
    Images {
        /// Directory holding the Earthfile, or the Earthfile itself
        path: PathBuf,
        /// Target to inspect
        target: String,
        /// Print a JSON array instead of one image per line
        #[arg(long)]
        json: bool,
        /// Earthfile name to look for when PATH is a directory
        #[arg(long)]
        file_name: Option<String>,
    },
}

#[derive(Args)]
pub struct WalkArgs {
    /// Earthfile name to look for (default: Earthfile)
    #[arg(long)]
    pub file_name: Option<String>,
    /// Follow symbolic links; `--follow-symlinks=false` overrides the environment
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub follow_symlinks: Option<bool>,
    /// Maximum directory depth below each path
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl WalkArgs {
    /// Environment settings with command line flags applied on top.
    pub fn config(&self) -> ScanConfig {
        let mut config = ScanConfig::from_env();
        if let Some(name) = &self.file_name {
            config = config.with_file_name(name.as_str());
        }
        if let Some(follow) = self.follow_symlinks {
            config = config.with_follow_symlinks(follow);
        }
        if self.max_depth.is_some() {
            config = config.with_max_depth(self.max_depth);
        }
        config
    }
}
