use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use earthscan_core::{extract_images, EarthfileParser, Parser, ScanConfig};

pub fn run(path: &Path, target: &str, json: bool, config: &ScanConfig) -> Result<()> {
    let file = earthfile_path(path, &config.file_name);
    let earthfile = EarthfileParser::new()
        .parse_file(&file)
        .with_context(|| format!("failed to parse {}", file.display()))?;

    let images = extract_images(&earthfile, target)
        .with_context(|| format!("failed to read images of {target} from {}", file.display()))?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut out, &images)?;
        writeln!(out)?;
    } else {
        for image in &images {
            writeln!(out, "{image}")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn earthfile_path(path: &Path, file_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(file_name)
    } else {
        path.to_path_buf()
    }
}
