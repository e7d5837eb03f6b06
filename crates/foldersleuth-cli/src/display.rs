/// Terminal rendering: banner, live progress line, and the result table.
use colored::{ColoredString, Colorize};
use foldersleuth_core::model::{format_count, format_size, SizeUnit};
use foldersleuth_core::ScanResult;
use std::io::{self, Write};
use std::path::{Path, MAIN_SEPARATOR};

/// Width of the `=` rule under the result heading.
const RULE_WIDTH: usize = 50;

/// Columns reserved for the size column.
const SIZE_COLUMN: usize = 10;

/// Width used when the terminal size cannot be queried (pipes, CI).
const FALLBACK_WIDTH: usize = 80;

pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

pub fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "Folder Content Analyzer".cyan())?;
    writeln!(out, "{}", "=======================".cyan())?;
    writeln!(out)
}

/// Overwrite the current line with `Scanning: <path>`.
pub fn progress_line<W: Write>(out: &mut W, path: &Path, width: usize) -> io::Result<()> {
    let max_width = width.saturating_sub(1);
    let shown = truncate_path(&path.to_string_lossy(), max_width.saturating_sub(12));
    let text = format!("Scanning: {shown}");
    write!(out, "\r{text:<max_width$}")?;
    out.flush()
}

/// Blank out the progress line and return the cursor to column 0.
pub fn clear_progress<W: Write>(out: &mut W, width: usize) -> io::Result<()> {
    let blank = " ".repeat(width.saturating_sub(1));
    write!(out, "\r{blank}\r")?;
    out.flush()
}

/// Shorten a path to at most `max_len` characters.
///
/// Prefers `<first component><sep>...<sep><file name>` so the most useful
/// parts stay visible, falling back to a plain cut when even that does not
/// fit or the budget is tiny.
pub fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }
    let cut = || path.chars().take(max_len).collect::<String>();
    if max_len < 10 {
        return cut();
    }

    let parts: Vec<&str> = path.split(MAIN_SEPARATOR).collect();
    if parts.len() <= 2 {
        return cut();
    }
    let first = parts[0];
    let last = parts[parts.len() - 1];
    if first.chars().count() + last.chars().count() + 7 > max_len {
        return cut();
    }
    format!("{first}{MAIN_SEPARATOR}...{MAIN_SEPARATOR}{last}")
}

fn color_for(unit: SizeUnit, text: String) -> ColoredString {
    match unit {
        SizeUnit::Gigabytes => text.red(),
        SizeUnit::Megabytes => text.yellow(),
        SizeUnit::Kilobytes => text.green(),
        SizeUnit::Bytes => text.white(),
    }
}

/// Render the finished report, showing at most `top` entries.
pub fn render_results<W: Write>(out: &mut W, result: &ScanResult, top: usize) -> io::Result<()> {
    let shown = result.top(top);
    let heading = if result.len() > shown.len() {
        format!(
            "Showing top {} of {} items (sorted by size)",
            shown.len(),
            format_count(result.len() as u64)
        )
    } else {
        format!(
            "Analysis Complete - {} items found",
            format_count(result.len() as u64)
        )
    };
    writeln!(out, "{}", heading.cyan())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH).cyan())?;
    writeln!(out)?;

    for entry in shown {
        let size = format!("{:<SIZE_COLUMN$}", format_size(entry.size));
        let marker = if entry.is_dir { "[DIR] " } else { "      " };
        writeln!(
            out,
            "{}{marker}{}",
            color_for(SizeUnit::for_bytes(entry.size), size),
            entry.path.display()
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("Total Size: {}", format_size(result.total_size)).cyan()
    )?;

    if result.skipped() > 0 {
        let skips = &result.skips;
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!(
                "{} items skipped due to access errors",
                format_count(result.skipped())
            )
            .bright_black()
        )?;
        writeln!(
            out,
            "{}",
            format!(
                "  ({} access denied, {} path too long, {} I/O errors)",
                skips.access_denied, skips.path_too_long, skips.io
            )
            .bright_black()
        )?;
    }
    Ok(())
}
