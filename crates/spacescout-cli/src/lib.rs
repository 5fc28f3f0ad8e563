/// SpaceScout CLI: argument parsing, terminal rendering, and the scan
/// driver behind the `spacescout` binary.
///
/// # Modules
///
/// - [`args`] — `clap` definition of the command line.
/// - [`render`] — The plain-text report table and progress line.
/// - [`app`] — Runs the scan, handles `SIGINT`, writes output and CSV.
pub mod app;
pub mod args;
pub mod render;

pub use app::{exit_code, run, run_with};
pub use args::{Args, OutputFormat};
