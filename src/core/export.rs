// BuildSleuth - core/export.rs
//
// CSV, JSON, and plain-text table output of size records.
// Core layer: writes to any Write trait object.

use crate::core::model::SizeRecord;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV format.
///
/// Writes: name, size, percentage, size_bytes, internal
pub fn export_csv<'a, W, I>(records: I, writer: W, export_path: &Path) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a SizeRecord>,
{
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["name", "size", "percentage", "size_bytes", "internal"])
        .map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        let bytes = format!("{:.0}", record.size_bytes());
        csv_writer
            .write_record([
                record.name(),
                record.size(),
                record.percentage(),
                bytes.as_str(),
                if record.is_internal() { "true" } else { "false" },
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export records to JSON format (array of `{name, size, percentage}`).
pub fn export_json<'a, W, I>(
    records: I,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a SizeRecord>,
{
    let records: Vec<&SizeRecord> = records.into_iter().collect();
    serde_json::to_writer_pretty(&mut writer, &records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Write an aligned three-column text table, the layout the editor window
/// showed: File Name | Size | Percentage.
pub fn write_table<'a, W, I>(records: I, mut writer: W, export_path: &Path) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a SizeRecord>,
{
    let records: Vec<&SizeRecord> = records.into_iter().collect();
    let io_err = |e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    };

    if records.is_empty() {
        writeln!(writer, "No data to display.").map_err(io_err)?;
        return Ok(0);
    }

    let size_w = records.iter().map(|r| r.size().len()).max().unwrap_or(0).max(4);
    let pct_w = records
        .iter()
        .map(|r| r.percentage().len())
        .max()
        .unwrap_or(0)
        .max(10);

    writeln!(writer, "{:>size_w$}  {:>pct_w$}  File Name", "Size", "Percentage").map_err(io_err)?;
    for r in &records {
        writeln!(
            writer,
            "{:>size_w$}  {:>pct_w$}  {}",
            r.size(),
            r.percentage(),
            r.name()
        )
        .map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_record(name: &str, size: &str, pct: &str) -> SizeRecord {
        SizeRecord::new(name.to_string(), size.to_string(), pct.to_string())
    }

    #[test]
    fn test_csv_export() {
        let records = vec![
            make_record("Assets/One.png", "1.0 mb", "50.0%"),
            make_record("Built-in Shader", "2.0 kb", "0.1%"),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("name,size,percentage,size_bytes,internal"));
        assert!(output.contains("Assets/One.png,1.0 mb,50.0%,1048576,false"));
        assert!(output.contains("Built-in Shader,2.0 kb,0.1%,2048,true"));
    }

    #[test]
    fn test_json_export() {
        let records = vec![make_record("Assets/Two.png", "3.5 kb", "0.2%")];
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["name"], "Assets/Two.png");
        assert_eq!(value[0]["size"], "3.5 kb");
        assert_eq!(value[0]["percentage"], "0.2%");
    }

    /// Accepts every write but fails on flush, like a full disk behind a
    /// `BufWriter`.
    struct FlushFails;

    impl Write for FlushFails {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }
    }

    #[test]
    fn test_json_export_reports_flush_failure() {
        let records = vec![make_record("Assets/Two.png", "3.5 kb", "0.2%")];
        let err = export_json(&records, FlushFails, &PathBuf::from("out.json")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_json_export_through_buffered_file_surfaces_flush_failure() {
        let records = vec![make_record("Assets/Two.png", "3.5 kb", "0.2%")];
        let writer = std::io::BufWriter::new(FlushFails);
        let err = export_json(&records, writer, &PathBuf::from("out.json")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_table_aligns_columns() {
        let records = vec![
            make_record("Assets/Big.png", "12.3 mb", "45.0%"),
            make_record("Assets/Small.png", "1.0 kb", "0.1%"),
        ];
        let mut buf = Vec::new();
        write_table(&records, &mut buf, &PathBuf::from("-")).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("File Name"));
        // Name column starts at the same offset on every row.
        let col = lines[0].find("File Name").unwrap();
        assert_eq!(&lines[1][col..], "Assets/Big.png");
        assert_eq!(&lines[2][col..], "Assets/Small.png");
    }

    #[test]
    fn test_table_empty_says_so() {
        let empty: Vec<SizeRecord> = Vec::new();
        let mut buf = Vec::new();
        let count = write_table(&empty, &mut buf, &PathBuf::from("-")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap(), "No data to display.\n");
    }
}
