use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use earthscan_core::{ScanConfig, Scanner};

use crate::output::{render, Format};

pub fn run(
    paths: &[PathBuf],
    target: Option<&str>,
    format: Format,
    config: &ScanConfig,
) -> Result<()> {
    let scanner = Scanner::new(config);

    let earthfiles = match target {
        Some(name) => scanner.scan_for_target(paths, name)?,
        None => scanner.scan_all(paths)?,
    };
    tracing::debug!("Found {} Earthfile(s)", earthfiles.len());

    let mut out = io::stdout().lock();
    render(&earthfiles, format, &mut out)?;
    out.flush()?;
    Ok(())
}
