/// The interactive session: pick a directory, scan it, show the report,
/// optionally export, and offer to go again.
use crate::args::Cli;
use crate::{display, input};
use anyhow::{Context, Result};
use foldersleuth_core::export;
use foldersleuth_core::scanner::progress::ScanProgress;
use foldersleuth_core::scanner::start_scan;
use foldersleuth_core::ScanResult;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Run a session on the process's stdin/stdout.
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(cli).run(&mut stdin.lock(), &mut stdout.lock())
}

pub struct Session {
    cli: Cli,
    width: usize,
}

impl Session {
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            width: display::terminal_width(),
        }
    }

    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
        display::banner(out)?;

        let mut initial = self.cli.path.clone();
        loop {
            let Some(dir) = input::resolve_directory(initial.take().as_deref(), input, out)?
            else {
                debug!("Input closed, ending session");
                break;
            };

            writeln!(out, "Starting analysis of: {}", dir.display())?;
            writeln!(out)?;

            let result = self.analyse(&dir, out)?;
            display::render_results(out, &result, self.cli.top)?;

            if let Some(path) = &self.cli.export {
                self.export(&result, path)?;
                writeln!(out, "Report written to {}", path.display())?;
            }

            writeln!(out)?;
            if self.cli.once || !input::ask_again(input, out)? {
                break;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Scan `dir` on a background thread, drawing progress until it ends.
    fn analyse<W: Write>(&self, dir: &Path, out: &mut W) -> Result<ScanResult> {
        let handle = start_scan(dir.to_path_buf(), self.cli.scan_options())
            .context("failed to start scan")?;
        let show_progress = !self.cli.no_progress;

        let mut drew_progress = false;
        for msg in handle.progress_rx.iter() {
            match msg {
                ScanProgress::Visiting { path } if show_progress => {
                    display::progress_line(out, &path, self.width)?;
                    drew_progress = true;
                }
                ScanProgress::Visiting { .. } => {}
                ScanProgress::Complete {
                    duration,
                    entries,
                    skipped,
                } => {
                    debug!("Scan finished: {entries} entries, {skipped} skipped in {duration:?}");
                }
                ScanProgress::Failed { message } => {
                    debug!("Scan failed: {message}");
                }
            }
        }
        if drew_progress {
            display::clear_progress(out, self.width)?;
        }

        handle
            .wait()
            .with_context(|| format!("scan of {} failed", dir.display()))
    }

    fn export(&self, result: &ScanResult, path: &Path) -> Result<()> {
        let Some(format) = self.cli.export_format() else {
            return Ok(());
        };
        let file =
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        export::write_report(result, format, &mut writer)
            .with_context(|| format!("cannot write {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("cannot write {}", path.display()))?;
        info!("Exported {:?} report to {}", format, path.display());
        Ok(())
    }
}
