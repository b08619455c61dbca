use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::{Command, Earthfile, Target};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: unterminated quote")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: command '{command}' is not inside a target")]
    MisplacedCommand { line: usize, command: String },
    #[error("line {line}: invalid target name '{name}'")]
    InvalidTargetName { line: usize, name: String },
    #[error("line {line}: target '{name}' is already defined")]
    DuplicateTarget { line: usize, name: String },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Turns Earthfile source into the target/command model.
pub trait Parser {
    /// Parses `text`, the contents of the Earthfile at `path`.
    fn parse_str(&self, path: &Path, text: &str) -> ParseResult<Earthfile>;

    fn parse_file(&self, path: &Path) -> ParseResult<Earthfile> {
        let text = std::fs::read_to_string(path)?;
        self.parse_str(path, &text)
    }
}

/// Keywords that only make sense together with the word that follows them.
const COMPOUND_COMMANDS: &[(&str, &str)] = &[
    ("SAVE", "IMAGE"),
    ("SAVE", "ARTIFACT"),
    ("WITH", "DOCKER"),
    ("ELSE", "IF"),
];

const VERSION: &str = "VERSION";

/// Line-oriented Earthfile parser.
///
/// Targets are unindented `name:` lines; their recipe is the indented block
/// below them. Unindented commands before the first target form the base
/// recipe. Block commands (`IF`, `FOR`, `WITH DOCKER` ... `END`) are kept
/// as flat commands in recipe order.
#[derive(Debug, Default, Clone, Copy)]
pub struct EarthfileParser;

impl EarthfileParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Parser for EarthfileParser {
    fn parse_str(&self, path: &Path, text: &str) -> ParseResult<Earthfile> {
        let mut earthfile = Earthfile::new(project_dir(path));
        let mut current: Option<Target> = None;

        for line in logical_lines(text) {
            if line.indented {
                let Some(target) = current.as_mut() else {
                    return Err(misplaced(&line));
                };
                if let Some(command) = parse_command(&line)? {
                    target.commands.push(command);
                }
                continue;
            }

            if let Some(name) = target_name(&line)? {
                if let Some(done) = current.take() {
                    earthfile.targets.push(done);
                }
                if earthfile.targets.iter().any(|t| t.name == name) {
                    return Err(ParseError::DuplicateTarget {
                        line: line.number,
                        name: name.to_string(),
                    });
                }
                current = Some(Target::new(name));
                continue;
            }

            if current.is_some() {
                return Err(misplaced(&line));
            }

            if let Some(command) = parse_command(&line)? {
                if command.name == VERSION {
                    earthfile.version = Some(command.args);
                } else {
                    earthfile.base.push(command);
                }
            }
        }

        if let Some(done) = current {
            earthfile.targets.push(done);
        }

        Ok(earthfile)
    }
}

fn project_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[derive(Debug)]
struct Line {
    number: usize,
    indented: bool,
    text: String,
}

/// Drops blank and comment lines and joins `\` continuations.
fn logical_lines(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut pending: Option<Line> = None;

    for (idx, raw) in text.lines().enumerate() {
        let raw = raw.trim_end_matches('\r');
        let trimmed = raw.trim();

        if let Some(mut line) = pending.take() {
            let (body, continues) = split_continuation(trimmed);
            line.text.push(' ');
            line.text.push_str(body);
            if continues {
                pending = Some(line);
            } else {
                lines.push(line);
            }
            continue;
        }

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (body, continues) = split_continuation(trimmed);
        let line = Line {
            number: idx + 1,
            indented: raw.starts_with(char::is_whitespace),
            text: body.to_string(),
        };
        if continues {
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }

    lines.extend(pending);
    lines
}

fn split_continuation(line: &str) -> (&str, bool) {
    line.strip_suffix('\\')
        .map_or((line, false), |body| (body.trim_end(), true))
}

/// Returns the target declared on `line`, if the line is a target header.
fn target_name(line: &Line) -> ParseResult<Option<&str>> {
    let Some(name) = line.text.strip_suffix(':') else {
        return Ok(None);
    };
    if name.contains(char::is_whitespace) {
        return Ok(None);
    }
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(Some(name))
    } else {
        Err(ParseError::InvalidTargetName {
            line: line.number,
            name: name.to_string(),
        })
    }
}

fn parse_command(line: &Line) -> ParseResult<Option<Command>> {
    let mut words = shell_words::split(&line.text)
        .map_err(|_| ParseError::UnterminatedQuote { line: line.number })?
        .into_iter();

    let Some(first) = words.next() else {
        return Ok(None);
    };
    let mut args: Vec<String> = words.collect();

    let compound = args.first().and_then(|second| {
        COMPOUND_COMMANDS
            .iter()
            .find(|(a, b)| *a == first && b == second)
    });

    let name = match compound {
        Some((a, b)) => {
            args.remove(0);
            format!("{a} {b}")
        }
        None => first,
    };

    Ok(Some(Command::new(name, args)))
}

fn misplaced(line: &Line) -> ParseError {
    let command = line
        .text
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    ParseError::MisplacedCommand {
        line: line.number,
        command,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"VERSION 0.7
FROM rust:1.80
ARG --global REGISTRY=ghcr.io/org

# Compile the service
build:
    COPY . .
    RUN cargo build \
        --release
    SAVE ARTIFACT target/release/app

docker:
    FROM +build
    SAVE IMAGE --push ${REGISTRY}/app:latest app:${TAG}

test:
    WITH DOCKER --load app:latest=+docker
        RUN echo "hello world"
    END
"#;

    fn parse(text: &str) -> ParseResult<Earthfile> {
        EarthfileParser::new().parse_str(Path::new("/repo/svc/Earthfile"), text)
    }

    #[test]
    fn parses_targets_in_order() {
        let earthfile = parse(SAMPLE).unwrap();

        assert_eq!(earthfile.path, PathBuf::from("/repo/svc"));
        let names: Vec<_> = earthfile.target_names().collect();
        assert_eq!(names, vec!["build", "docker", "test"]);
    }

    #[test]
    fn records_version_and_base_recipe() {
        let earthfile = parse(SAMPLE).unwrap();

        assert_eq!(earthfile.version, Some(vec!["0.7".to_string()]));
        assert_eq!(earthfile.base.len(), 2);
        assert_eq!(earthfile.base[0], Command::new("FROM", vec!["rust:1.80".into()]));
        assert_eq!(earthfile.base[1].name, "ARG");
        assert_eq!(earthfile.base[1].args, vec!["--global", "REGISTRY=ghcr.io/org"]);
    }

    #[test]
    fn joins_continuation_lines() {
        let earthfile = parse(SAMPLE).unwrap();
        let build = &earthfile.targets[0];

        assert_eq!(build.commands[1].name, "RUN");
        assert_eq!(build.commands[1].args, vec!["cargo", "build", "--release"]);
    }

    #[test]
    fn compound_commands_keep_both_words() {
        let earthfile = parse(SAMPLE).unwrap();

        assert_eq!(earthfile.targets[0].commands[2].name, "SAVE ARTIFACT");
        let save = &earthfile.targets[1].commands[1];
        assert_eq!(save.name, "SAVE IMAGE");
        assert_eq!(
            save.args,
            vec!["--push", "${REGISTRY}/app:latest", "app:${TAG}"]
        );
    }

    #[test]
    fn block_commands_are_flattened() {
        let earthfile = parse(SAMPLE).unwrap();
        let names: Vec<_> = earthfile.targets[2]
            .commands
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(names, vec!["WITH DOCKER", "RUN", "END"]);
        assert_eq!(earthfile.targets[2].commands[1].args, vec!["echo", "hello world"]);
    }

    #[test]
    fn empty_file_has_no_targets() {
        let earthfile = parse("# nothing here\n\n").unwrap();
        assert!(earthfile.targets.is_empty());
        assert!(earthfile.version.is_none());
    }

    #[test]
    fn target_without_commands() {
        let earthfile = parse("VERSION 0.7\nall:\n").unwrap();
        assert_eq!(earthfile.targets.len(), 1);
        assert!(earthfile.targets[0].commands.is_empty());
    }

    #[test]
    fn bare_file_name_resolves_to_current_dir() {
        let earthfile = EarthfileParser::new()
            .parse_str(Path::new("Earthfile"), "")
            .unwrap();
        assert_eq!(earthfile.path, PathBuf::from("."));
    }

    #[test]
    fn unterminated_quote_reports_line() {
        let err = parse("build:\n    RUN echo \"oops\n").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedQuote { line: 2 }));
    }

    #[test]
    fn indented_command_before_target() {
        let err = parse("    RUN make\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MisplacedCommand { line: 1, ref command } if command == "RUN"
        ));
    }

    #[test]
    fn unindented_command_after_target() {
        let err = parse("build:\n    RUN make\nRUN stray\n").unwrap_err();
        assert!(matches!(err, ParseError::MisplacedCommand { line: 3, .. }));
    }

    #[test]
    fn invalid_target_name() {
        let err = parse("bu!ld:\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidTargetName { ref name, .. } if name == "bu!ld"
        ));
    }

    #[test]
    fn duplicate_target() {
        let err = parse("a:\n    RUN x\na:\n    RUN y\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateTarget { line: 3, ref name } if name == "a"));
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Earthfile");
        fs::write(&file, SAMPLE).unwrap();

        let earthfile = EarthfileParser::new().parse_file(&file).unwrap();
        assert_eq!(earthfile.path, dir.path());
        assert_eq!(earthfile.targets.len(), 3);
    }

    #[test]
    fn parse_file_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = EarthfileParser::new()
            .parse_file(&dir.path().join("Earthfile"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
