/// CSV export: `kind, rank, size_bytes, size_human, path`.
///
/// Directory rows come first, then file rows; ranks restart at 1 for each
/// kind. The header is written even when the report is empty.
use super::{bucket_rows, file_rows};
use crate::error::{Result, ScoutError};
use crate::model::ReportData;
use std::fs;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: [&str; 5] = ["kind", "rank", "size_bytes", "size_human", "path"];

/// Write the report as CSV to any writer.
pub fn write_csv<W: Write>(report: &ReportData, top_dirs: usize, writer: W) -> Result<()> {
    let mut wtr = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in bucket_rows(report, top_dirs)
        .into_iter()
        .chain(file_rows(report))
    {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(::csv::Error::from)?;
    Ok(())
}

/// Write the report as CSV to `path`, creating parent directories.
pub fn export_csv_file(report: &ReportData, top_dirs: usize, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScoutError::io(parent, e))?;
    }
    let file = fs::File::create(path).map_err(|e| ScoutError::io(path, e))?;
    write_csv(report, top_dirs, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_report;

    fn csv_string(report: &ReportData, top_dirs: usize) -> String {
        let mut buf = Vec::new();
        write_csv(report, top_dirs, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_dirs_then_files() {
        let out = csv_string(&sample_report(), 30);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "kind,rank,size_bytes,size_human,path");
        assert_eq!(lines[1], "dir,1,200,200.0 B,/t/sub");
        assert_eq!(lines[2], "dir,2,100,100.0 B,/t");
        assert_eq!(lines[3], "file,1,200,200.0 B,/t/sub/b.txt");
        assert_eq!(lines[4], "file,2,100,100.0 B,/t/a.txt");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn empty_report_still_has_header() {
        let out = csv_string(&ReportData::default(), 30);
        assert_eq!(out.trim_end(), "kind,rank,size_bytes,size_human,path");
    }

    #[test]
    fn paths_with_commas_are_quoted() {
        let mut report = ReportData::default();
        report.dir_sizes.insert("/t/a,b".into(), 5);
        let out = csv_string(&report, 30);
        assert!(out.contains("\"/t/a,b\""));
    }

    #[test]
    fn file_export_creates_parent_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested/logs/report.csv");
        export_csv_file(&sample_report(), 1, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1 + 1 + 2);
    }
}
