use anyhow::Result;
use clap::Parser;
use earthscan_core::ScanConfig;

use earthscan::cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli.command)
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Scan {
            paths,
            target,
            format,
            walk,
        } => earthscan::cli::scan::run(&paths, target.as_deref(), format, &walk.config()),
        Commands::Images {
            path,
            target,
            json,
            file_name,
        } => {
            let config = match file_name {
                Some(name) => ScanConfig::from_env().with_file_name(name),
                None => ScanConfig::from_env(),
            };
            earthscan::cli::images::run(&path, &target, json, &config)
        }
    }
}
