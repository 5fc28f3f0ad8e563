/// Scan driver: runs one scan in the background, renders the report, and
/// writes the optional CSV export.
///
/// Exit codes: `0` completed, `1` runtime failure, `2` usage error,
/// `130` interrupted by `SIGINT` (the partial report is still printed).
use crate::args::{Args, OutputFormat};
use crate::render;
use anyhow::{bail, Context};
use chrono::{DateTime, Local};
use colored::control;
use spacescout_core::export::{export_csv_file, write_json};
use spacescout_core::scanner::progress::ScanProgress;
use spacescout_core::scanner::start_scan;
use spacescout_core::ScoutError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_INTERRUPTED: i32 = 130;

/// Directory under `$HOME` that collects timestamped CSV runs.
const CSV_ROOT_DIR: &str = "exported_csv_logs";
const CSV_FILE_NAME: &str = "spacescout.csv";

/// Run the CLI against the real stdout and map the outcome to an exit code.
pub fn run(args: &Args) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run_with(args, &mut out) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code(&err)
        }
    }
}

/// Exit code for an error returned by [`run_with`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ScoutError>() {
        Some(scout) if scout.is_usage() => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

/// Run one scan and write the report to `out`. Returns the exit code for a
/// scan that produced a report, or an error if none could be produced.
pub fn run_with<W: Write>(args: &Args, out: &mut W) -> anyhow::Result<i32> {
    if args.no_color {
        control::set_override(false);
    }

    let handle = start_scan(args.scan_options())?;
    install_interrupt_handler(&handle.cancel_flag());

    let report = if args.progress {
        let mut stderr = io::stderr();
        let report = handle.wait_with(|msg| {
            if let ScanProgress::Update {
                files_found,
                dirs_found,
                total_size,
                current_path,
            } = msg
            {
                let line =
                    render::progress_line(*files_found, *dirs_found, *total_size, current_path);
                let _ = write!(stderr, "\r\x1b[2K{line}");
                let _ = stderr.flush();
            }
        });
        let _ = write!(stderr, "\r\x1b[2K");
        report?
    } else {
        handle.wait()?
    };

    match args.format {
        OutputFormat::Table => {
            render::write_table(&report, args.top_dirs, out).context("failed to write report")?
        }
        OutputFormat::Json => write_json(&report, args.top_dirs, &mut *out)?,
    }

    if args.wants_csv() {
        let path = match &args.csv_path {
            Some(path) => path.clone(),
            None => default_csv_path(&home_dir()?, Local::now()),
        };
        export_csv_file(&report, args.top_dirs, &path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!("CSV written to {}", path.display());
        if args.verbose > 0 {
            match args.format {
                OutputFormat::Table => {
                    writeln!(out, "[INFO] CSV written to: {}", path.display())?;
                    writeln!(out)?;
                }
                // Keep stdout parseable.
                OutputFormat::Json => eprintln!("[INFO] CSV written to: {}", path.display()),
            }
        }
    }

    if report.cancelled {
        debug!("Scan was interrupted; exiting with {EXIT_INTERRUPTED}");
        return Ok(EXIT_INTERRUPTED);
    }
    Ok(EXIT_OK)
}

/// Per-run CSV location:
/// `<home>/exported_csv_logs/spacescout/logs/<YYYYmmdd_HHMMSS>/spacescout.csv`.
pub fn default_csv_path(home: &Path, now: DateTime<Local>) -> PathBuf {
    home.join(CSV_ROOT_DIR)
        .join("spacescout")
        .join("logs")
        .join(now.format("%Y%m%d_%H%M%S").to_string())
        .join(CSV_FILE_NAME)
}

fn home_dir() -> anyhow::Result<PathBuf> {
    match std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        Some(home) => Ok(PathBuf::from(home)),
        None => bail!("HOME is not set; pass --csv-path to choose the CSV location"),
    }
}

/// First `SIGINT` requests cancellation; a second one while the flag is
/// still set terminates immediately.
#[cfg(unix)]
fn install_interrupt_handler(flag: &std::sync::Arc<std::sync::atomic::AtomicBool>) {
    use signal_hook::consts::SIGINT;
    use signal_hook::flag;
    use std::sync::Arc;

    if let Err(e) = flag::register_conditional_shutdown(SIGINT, EXIT_INTERRUPTED, Arc::clone(flag))
    {
        debug!("Could not install second-SIGINT handler: {e}");
    }
    if let Err(e) = flag::register(SIGINT, Arc::clone(flag)) {
        debug!("Could not install SIGINT handler: {e}");
    }
}

#[cfg(not(unix))]
fn install_interrupt_handler(_flag: &std::sync::Arc<std::sync::atomic::AtomicBool>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn csv_path_layout() {
        let now = Local.with_ymd_and_hms(2025, 12, 5, 21, 1, 1).unwrap();
        let path = default_csv_path(Path::new("/home/ana"), now);
        assert_eq!(
            path,
            PathBuf::from("/home/ana/exported_csv_logs/spacescout/logs/20251205_210101/spacescout.csv")
        );
    }

    #[test]
    fn usage_errors_map_to_exit_two() {
        let usage = anyhow::Error::new(spacescout_core::ScanOptions::new([""]).validate().unwrap_err());
        assert_eq!(exit_code(&usage), EXIT_USAGE);
        let other = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code(&other), EXIT_FAILURE);
        let wrapped = usage.context("while scanning");
        assert_eq!(exit_code(&wrapped), EXIT_USAGE);
    }
}
