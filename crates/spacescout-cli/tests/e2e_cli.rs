/// End-to-end CLI tests: parse real argument vectors, scan real temporary
/// trees, and check the rendered stdout, the CSV export, and exit codes.
use clap::Parser;
use spacescout_cli::app::{EXIT_OK, EXIT_USAGE};
use spacescout_cli::{exit_code, run_with, Args};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

/// `t/a.txt` (100 bytes) and `t/sub/b.txt` (200 bytes).
fn build_test_tree() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let root = fs::canonicalize(tmp.path()).unwrap();
    fs::create_dir_all(root.join("sub")).unwrap();
    write_bytes(&root.join("a.txt"), 100);
    write_bytes(&root.join("sub/b.txt"), 200);
    (tmp, root)
}

fn args(root: &Path, extra: &[&str]) -> Args {
    let root = root.to_string_lossy().into_owned();
    let mut argv = vec!["spacescout", "--no-color", "-r", root.as_str(), "--exclude"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

fn run_capture(args: &Args) -> (i32, String) {
    let mut out = Vec::new();
    let code = run_with(args, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

// ── Table output ─────────────────────────────────────────────────────────────

#[test]
fn table_report_for_small_tree() {
    let (_tmp, root) = build_test_tree();
    let (code, text) = run_capture(&args(&root, &["-d", "1", "--top-files", "10"]));

    assert_eq!(code, EXIT_OK);
    assert!(text.contains("=== Disk Usage Report ==="));
    assert!(text.contains("Total size of regular files scanned: 300.0 B (2 files)"));
    let sub_row = format!("  1.    200.0 B  {}\n", root.join("sub").display());
    let root_row = format!("  2.    100.0 B  {}\n", root.display());
    assert!(text.contains(&sub_row), "{text}");
    assert!(text.contains(&root_row), "{text}");
    assert!(text.contains("--- Top 2 files by size ---"));
    assert!(text.contains(&format!("200.0 B  {}", root.join("sub/b.txt").display())));
}

#[test]
fn missing_root_prints_empty_sections() {
    let tmp = TempDir::new().unwrap();
    let (code, text) = run_capture(&args(&tmp.path().join("nope"), &[]));
    assert_eq!(code, EXIT_OK);
    assert!(text.contains("No directories found."));
    assert!(text.contains("No files found."));
}

#[test]
fn exclude_flag_prunes_directory() {
    let (_tmp, root) = build_test_tree();
    let sub = root.join("sub").to_string_lossy().into_owned();
    let (_, text) = run_capture(&args(&root, &[sub.as_str()]));
    assert!(!text.contains("b.txt"));
    assert!(text.contains("Total size of regular files scanned: 100.0 B (1 files)"));
}

#[test]
fn filters_apply_to_totals() {
    let (_tmp, root) = build_test_tree();
    let (_, text) = run_capture(&args(&root, &["--min-size", "150"]));
    assert!(text.contains("Total size of regular files scanned: 200.0 B (1 files)"));
}

// ── JSON output ──────────────────────────────────────────────────────────────

#[test]
fn json_report_is_machine_readable() {
    let (_tmp, root) = build_test_tree();
    let (code, text) = run_capture(&args(&root, &["--format", "json", "-d", "0"]));
    assert_eq!(code, EXIT_OK);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["total_bytes"], 300);
    assert_eq!(value["cancelled"], false);
    assert_eq!(value["buckets"].as_array().unwrap().len(), 1);
    assert_eq!(value["buckets"][0]["size_bytes"], 300);
    assert_eq!(value["top_files"][0]["size_bytes"], 200);
    assert_eq!(value["stats"]["files_counted"], 2);
}

// ── CSV export ───────────────────────────────────────────────────────────────

#[test]
fn csv_path_writes_export() {
    let (_tmp, root) = build_test_tree();
    let out_dir = TempDir::new().unwrap();
    let csv_path = out_dir.path().join("nested/report.csv");
    let csv_arg = csv_path.to_string_lossy().into_owned();

    let (code, text) = run_capture(&args(&root, &["--csv-path", csv_arg.as_str(), "-v"]));
    assert_eq!(code, EXIT_OK);
    assert!(text.contains(&format!("[INFO] CSV written to: {}", csv_path.display())));

    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("kind,rank,size_bytes,size_human,path"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 4, "two buckets and two files: {csv}");
    assert!(rows[0].starts_with("dir,1,200,"));
    assert!(rows[2].starts_with("file,1,200,"));
}

#[test]
fn csv_path_failure_is_runtime_error() {
    let (_tmp, root) = build_test_tree();
    // A regular file cannot act as a parent directory.
    let blocker = root.join("a.txt").join("report.csv");
    let blocker_arg = blocker.to_string_lossy().into_owned();
    let parsed = args(&root, &["--csv-path", blocker_arg.as_str()]);

    let mut out = Vec::new();
    let err = run_with(&parsed, &mut out).unwrap_err();
    assert_eq!(exit_code(&err), 1);
}

// ── Usage errors ─────────────────────────────────────────────────────────────

#[test]
fn inverted_size_range_is_usage_error() {
    let (_tmp, root) = build_test_tree();
    let parsed = args(&root, &["--min-size", "2k", "--max-size", "1k"]);
    let mut out = Vec::new();
    let err = run_with(&parsed, &mut out).unwrap_err();
    assert_eq!(exit_code(&err), EXIT_USAGE);
    assert!(out.is_empty());
}

#[test]
fn malformed_flags_exit_with_two() {
    let err = Args::try_parse_from(["spacescout", "--top-files", "many"]).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_USAGE);
}
