/// Plain-text rendering of a finished report.
///
/// Colour is applied through `colored`, which honours `NO_COLOR`, the
/// terminal check, and the `--no-color` override set by the app.
use colored::Colorize;
use spacescout_core::model::{format_count, format_size};
use spacescout_core::ReportData;
use std::io::{self, Write};

/// Write the report as the human-readable table.
///
/// `top_dirs` limits the directory section; the file section shows every
/// tracked file, already bounded by the scan's top-K limit.
pub fn write_table<W: Write>(report: &ReportData, top_dirs: usize, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=== Disk Usage Report ===".bold())?;
    if report.cancelled {
        writeln!(out, "{}", "(partial: scan was interrupted)".yellow())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Total size of regular files scanned: {} ({} files)",
        format_size(report.total_bytes),
        format_count(report.stats.files_counted)
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "{}",
        format!("--- Top {top_dirs} directory buckets ---").bold()
    )?;
    let buckets = report.top_buckets(top_dirs);
    if buckets.is_empty() {
        writeln!(out, "No directories found.")?;
    }
    for (i, (path, size)) in buckets.iter().enumerate() {
        write_row(out, i + 1, *size, &path.display().to_string())?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{}",
        format!("--- Top {} files by size ---", report.top_files.len()).bold()
    )?;
    if report.top_files.is_empty() {
        writeln!(out, "No files found.")?;
    }
    for (i, file) in report.top_files.iter().enumerate() {
        write_row(out, i + 1, file.size, &file.path.display().to_string())?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, rank: usize, size: u64, path: &str) -> io::Result<()> {
    writeln!(out, "{rank:3}. {:>10}  {path}", format_size(size))
}

/// One-line progress summary, rewritten in place on stderr.
pub fn progress_line(files: u64, dirs: u64, bytes: u64, current: &str) -> String {
    const MAX_PATH: usize = 60;
    let shown = if current.chars().count() > MAX_PATH {
        let tail: String = current
            .chars()
            .rev()
            .take(MAX_PATH - 3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{tail}")
    } else {
        current.to_string()
    };
    format!(
        "{} files, {} dirs, {}  {shown}",
        format_count(files),
        format_count(dirs),
        format_size(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacescout_core::FileRecord;
    use std::path::PathBuf;

    fn render(report: &ReportData, top_dirs: usize) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_table(report, top_dirs, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> ReportData {
        let mut report = ReportData::default();
        report.dir_sizes.insert(PathBuf::from("/t"), 100);
        report.dir_sizes.insert(PathBuf::from("/t/sub"), 200);
        report.top_files = vec![
            FileRecord::new(200, "/t/sub/b.txt"),
            FileRecord::new(100, "/t/a.txt"),
        ];
        report.total_bytes = 300;
        report.stats.files_counted = 2;
        report
    }

    #[test]
    fn table_layout() {
        let text = render(&sample(), 30);
        let expected = "\n\
=== Disk Usage Report ===\n\
\n\
Total size of regular files scanned: 300.0 B (2 files)\n\
\n\
--- Top 30 directory buckets ---\n  \
1.    200.0 B  /t/sub\n  \
2.    100.0 B  /t\n\
\n\
--- Top 2 files by size ---\n  \
1.    200.0 B  /t/sub/b.txt\n  \
2.    100.0 B  /t/a.txt\n\
\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn top_dirs_limits_bucket_rows() {
        let text = render(&sample(), 1);
        assert!(text.contains("--- Top 1 directory buckets ---"));
        assert!(text.contains("  1.    200.0 B  /t/sub\n"));
        assert!(!text.contains("  2.    100.0 B  /t\n"));
    }

    #[test]
    fn empty_report_sections() {
        let text = render(&ReportData::default(), 30);
        assert!(text.contains("No directories found."));
        assert!(text.contains("No files found."));
        assert!(text.contains("--- Top 0 files by size ---"));
        assert!(text.contains("0.0 B (0 files)"));
    }

    #[test]
    fn cancelled_report_is_marked_partial() {
        let mut report = sample();
        report.cancelled = true;
        assert!(render(&report, 30).contains("(partial: scan was interrupted)"));
    }

    #[test]
    fn progress_line_truncates_long_paths() {
        let long = format!("/{}", "a".repeat(200));
        let line = progress_line(1_234, 56, 2048, &long);
        assert!(line.starts_with("1,234 files, 56 dirs, 2.0 KiB  ..."));
        assert!(line.len() < 120);
        assert_eq!(progress_line(0, 0, 0, "/x"), "0 files, 0 dirs, 0.0 B  /x");
    }
}
