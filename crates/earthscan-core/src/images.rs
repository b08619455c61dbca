use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::model::Earthfile;
use crate::query::find_commands;

/// Command that declares an image produced by a target.
pub const SAVE_IMAGE: &str = "SAVE IMAGE";

const FLAG_PREFIX: &str = "--";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").expect("placeholder pattern is valid"));

/// Lists the image names saved by `target`, in argument order.
///
/// Flags are skipped, `${...}` placeholders are dropped, and anything after
/// the first `:` (tag or digest) is cut off. Duplicates are kept.
pub fn extract_images(earthfile: &Earthfile, target: &str) -> Result<Vec<String>> {
    let commands = find_commands(earthfile, target, SAVE_IMAGE)?;

    Ok(commands
        .iter()
        .flat_map(|c| c.args.iter())
        .map(String::as_str)
        .filter_map(image_name)
        .collect())
}

/// Reduces a single `SAVE IMAGE` argument to its image name.
pub fn image_name(arg: &str) -> Option<String> {
    if arg.starts_with(FLAG_PREFIX) {
        return None;
    }

    let stripped = PLACEHOLDER.replace_all(arg, "");
    let name = stripped.split(':').next().unwrap_or_default();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
