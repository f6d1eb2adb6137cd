use crate::error::{LayoutError, Result};
use tokio::process::Command;
use tracing::trace;

/// Runs an external tool and returns its stdout.
///
/// A missing binary and a non-zero exit status are both errors naming the tool.
pub async fn run(program: &str, args: &[&str]) -> Result<String> {
    trace!("Running {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| LayoutError::ToolMissing {
            tool: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LayoutError::tool_failed(
            program,
            format!("{} ({})", stderr.trim(), output.status),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Splits off `count` whitespace-separated fields and returns them with the
/// untouched remainder of the line, or `None` when the line is too short.
pub fn split_fields(line: &str, count: usize) -> Option<(Vec<&str>, &str)> {
    let mut fields = Vec::with_capacity(count);
    let mut rest = line.trim_start();
    while fields.len() < count {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Some((fields, rest.trim_end()))
}

/// Splits an argument line the way a POSIX shell would for plain words:
/// single quotes are literal, double quotes allow `\"` and `\\`, and a
/// backslash outside quotes escapes the next character. No expansion happens.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let invalid = |reason: &str| LayoutError::InvalidArguments {
        line: line.to_string(),
        reason: reason.to_string(),
    };

    let mut args = Vec::new();
    let mut current: Option<String> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if let Some(arg) = current.take() {
                    args.push(arg);
                }
            }
            '\'' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => word.push(c),
                        None => return Err(invalid("unterminated single quote")),
                    }
                }
            }
            '"' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => word.push(c),
                            Some(c) => {
                                word.push('\\');
                                word.push(c);
                            }
                            None => return Err(invalid("unterminated double quote")),
                        },
                        Some(c) => word.push(c),
                        None => return Err(invalid("unterminated double quote")),
                    }
                }
            }
            '\\' => match chars.next() {
                Some(c) => current.get_or_insert_with(String::new).push(c),
                None => return Err(invalid("trailing backslash")),
            },
            c => current.get_or_insert_with(String::new).push(c),
        }
    }

    if let Some(arg) = current {
        args.push(arg);
    }
    Ok(args)
}
