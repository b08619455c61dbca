use crate::error::{Error, Result};
use crate::model::{Command, Earthfile, Target};

/// Returns the first target named `name`.
///
/// Target names are unique within a parsed Earthfile; for hand-built models
/// that break this, the first declaration wins.
pub fn find_target<'a>(earthfile: &'a Earthfile, name: &str) -> Result<&'a Target> {
    earthfile
        .targets
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| Error::TargetNotFound(name.to_string()))
}

/// Returns the commands named `command` inside `target`, in recipe order.
pub fn find_commands<'a>(
    earthfile: &'a Earthfile,
    target: &str,
    command: &str,
) -> Result<Vec<&'a Command>> {
    let target = find_target(earthfile, target)?;
    Ok(target.commands.iter().filter(|c| c.name == command).collect())
}
