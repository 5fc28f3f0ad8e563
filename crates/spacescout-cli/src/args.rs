/// Command-line arguments and their conversion into scan options.
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use clap::{ArgAction, Parser, ValueEnum};
use regex::Regex;
use spacescout_core::model::parse_size;
use spacescout_core::scanner::{DEFAULT_EXCLUDES, DEFAULT_MAX_DEPTH, DEFAULT_TOP_FILES};
use spacescout_core::{FileFilter, ScanOptions};
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::Level;

/// Default number of directory buckets shown and exported.
pub const DEFAULT_TOP_DIRS: usize = 30;

/// Stdout format for the finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// SpaceScout: find where the bytes went.
#[derive(Debug, Parser)]
#[command(
    name = "spacescout",
    author,
    version,
    about = "Directory size reconnaissance: biggest directories and files under one or more roots",
    long_about = None
)]
pub struct Args {
    /// Root directories to scan.
    #[arg(short, long, num_args = 1.., value_name = "PATH", default_value = "/")]
    pub roots: Vec<PathBuf>,

    /// Path prefixes to skip entirely. Passing the flag with no values
    /// clears the built-in list.
    #[arg(short = 'x', long = "exclude", num_args = 0.., value_name = "PATH")]
    pub exclude: Option<Vec<PathBuf>>,

    /// Directory bucket depth below each root (0 = one bucket per root).
    #[arg(short = 'd', long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Number of directory buckets to show.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP_DIRS)]
    pub top_dirs: usize,

    /// Number of largest files to track.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP_FILES)]
    pub top_files: usize,

    /// Stay on the filesystem of each root.
    #[arg(long, visible_alias = "xdev")]
    pub one_file_system: bool,

    /// Only count files whose name contains TERM (case-insensitive, repeatable).
    #[arg(long = "name", value_name = "TERM")]
    pub names: Vec<String>,

    /// Only count files whose full path contains TERM (case-insensitive, repeatable).
    #[arg(long = "path", value_name = "TERM")]
    pub paths: Vec<String>,

    /// Only count files whose full path matches REGEX.
    #[arg(long, value_name = "REGEX", value_parser = parse_regex)]
    pub regex: Option<Regex>,

    /// Only count files with one of these extensions (comma-separated).
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Only count files at least this large (e.g. 10M, 2GiB, 500kB).
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub min_size: Option<u64>,

    /// Only count files at most this large.
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// Only count files modified at or after DATE (YYYY-MM-DD[ HH:MM:SS], local time).
    #[arg(long, value_name = "DATE", value_parser = parse_local_time)]
    pub after: Option<SystemTime>,

    /// Only count files modified at or before DATE.
    #[arg(long, value_name = "DATE", value_parser = parse_local_time)]
    pub before: Option<SystemTime>,

    /// Output format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Export the report as CSV under $HOME/exported_csv_logs.
    #[arg(long)]
    pub csv: bool,

    /// Export the report as CSV to FILE (implies --csv).
    #[arg(long, value_name = "FILE")]
    pub csv_path: Option<PathBuf>,

    /// Show a live progress line on stderr.
    #[arg(long)]
    pub progress: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Maximum log level for the stderr subscriber.
    pub fn verbosity(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// `true` when a CSV file should be written.
    pub fn wants_csv(&self) -> bool {
        self.csv || self.csv_path.is_some()
    }

    /// Exclusions in effect: the explicit list, or the built-in defaults
    /// when `--exclude` was not given.
    pub fn excludes(&self) -> Vec<PathBuf> {
        match &self.exclude {
            Some(list) => list.clone(),
            None => DEFAULT_EXCLUDES.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn file_filter(&self) -> FileFilter {
        let mut filter = FileFilter::new()
            .name_terms(&self.names)
            .path_terms(&self.paths)
            .extensions(&self.extensions);
        if let Some(re) = &self.regex {
            filter = filter.pattern(re.clone());
        }
        if let Some(min) = self.min_size {
            filter = filter.min_size(min);
        }
        if let Some(max) = self.max_size {
            filter = filter.max_size(max);
        }
        if let Some(after) = self.after {
            filter = filter.modified_after(after);
        }
        if let Some(before) = self.before {
            filter = filter.modified_before(before);
        }
        filter
    }

    /// Scan configuration described by these arguments. Validation is left
    /// to the scanner so that every frontend rejects the same inputs.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(&self.roots)
            .excludes(self.excludes())
            .max_depth(self.max_depth)
            .top_files(self.top_files)
            .one_file_system(self.one_file_system)
            .filter(self.file_filter())
    }
}

fn parse_regex(text: &str) -> Result<Regex, String> {
    Regex::new(text).map_err(|e| format!("invalid regex: {e}"))
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` as local time.
pub fn parse_local_time(text: &str) -> Result<SystemTime, String> {
    let text = text.trim();
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| format!("invalid date {text:?}: expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS"))?;
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("{text:?} does not exist in the local time zone"))?;
    Ok(SystemTime::from(local))
}
