use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use console::style;
use earthscan_core::Earthfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One Earthfile directory per line
    Text,
    /// A single JSON array
    Json,
    /// One JSON record per line
    Jsonl,
    /// Directories with their targets and commands
    Tree,
}

pub fn render(earthfiles: &[Earthfile], format: Format, out: &mut impl Write) -> Result<()> {
    match format {
        Format::Text => {
            for earthfile in earthfiles {
                writeln!(out, "{}", earthfile.path.display())?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, earthfiles)?;
            writeln!(out)?;
        }
        Format::Jsonl => {
            for earthfile in earthfiles {
                serde_json::to_writer(&mut *out, earthfile)?;
                writeln!(out)?;
            }
        }
        Format::Tree => {
            for earthfile in earthfiles {
                render_tree(earthfile, out)?;
            }
        }
    }
    Ok(())
}

fn render_tree(earthfile: &Earthfile, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", style(earthfile.path.display()).bold())?;
    if earthfile.targets.is_empty() {
        writeln!(out, "  {}", style("(no targets)").dim())?;
    }
    for target in &earthfile.targets {
        writeln!(out, "  {}", style(&target.name).cyan())?;
        for command in &target.commands {
            if command.args.is_empty() {
                writeln!(out, "    {}", command.name)?;
            } else {
                writeln!(out, "    {} {}", command.name, command.args.join(" "))?;
            }
        }
    }
    Ok(())
}
