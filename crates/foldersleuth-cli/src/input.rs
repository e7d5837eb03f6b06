/// Directory selection and yes/no prompts.
///
/// Everything reads from a `BufRead` and writes to a `Write` so sessions
/// can be driven from byte buffers in tests.
use colored::Colorize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Path cannot be empty")]
    Empty,

    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is a file, not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Access denied to path: {}", .0.display())]
    AccessDenied(PathBuf),

    #[error("Invalid path format: {0}")]
    Invalid(String),
}

/// Turn user input into an absolute path to an existing directory.
///
/// Surrounding whitespace and a pair of matching quotes (as left by
/// drag-and-drop into a terminal) are ignored.
pub fn validate_directory(raw: &str) -> Result<PathBuf, InputError> {
    let trimmed = strip_quotes(raw.trim());
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let full = std::path::absolute(trimmed).map_err(|_| InputError::Invalid(raw.to_string()))?;
    match fs::metadata(&full) {
        Ok(meta) if meta.is_dir() => Ok(full),
        Ok(_) => Err(InputError::NotADirectory(full)),
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            Err(InputError::AccessDenied(full))
        }
        Err(_) => Err(InputError::NotFound(full)),
    }
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return s[1..s.len() - 1].trim();
        }
    }
    s
}

/// Pick the directory for this round.
///
/// `initial` (the command-line argument) is tried first; if it is missing
/// or invalid the user is prompted until a valid directory is entered.
/// Returns `None` when input ends.
pub fn resolve_directory<R: BufRead, W: Write>(
    initial: Option<&Path>,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<PathBuf>> {
    if let Some(path) = initial {
        match validate_directory(&path.to_string_lossy()) {
            Ok(dir) => return Ok(Some(dir)),
            Err(err) => report_error(out, &err)?,
        }
    }

    loop {
        write!(out, "Enter directory path: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            return Ok(None);
        };
        match validate_directory(&line) {
            Ok(dir) => return Ok(Some(dir)),
            Err(err) => report_error(out, &err)?,
        }
    }
}

/// Ask whether to run another analysis. End of input counts as "no".
pub fn ask_again<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "Analyze another directory? (y/n): ")?;
    out.flush()?;
    let answer = read_line(input)?.unwrap_or_default();
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn report_error<W: Write>(out: &mut W, err: &InputError) -> io::Result<()> {
    writeln!(out, "{}", format!("Error: {err}").red())
}
