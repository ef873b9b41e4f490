use std::fs::File;
use std::io;
use std::path::Path;
use anyhow::Context;
use csv::WriterBuilder;
use log::info;
use serde::Serialize;

/// A record type that can be exported, with its CSV header row
pub(crate) trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

impl<T: CsvRecord> CsvRecord for &T {
    const HEADERS: &'static [&'static str] = T::HEADERS;
}

/// Save records to a CSV file with a header row
pub(crate) fn save_records<T: CsvRecord>(records: &[T], file_path: &Path) -> anyhow::Result<()> {
    let file = File::create(file_path).with_context(|| format!("Unable to create {}", file_path.display()))?;
    write_records(records, file).with_context(|| format!("Unable to write {}", file_path.display()))?;
    info!("Saved {} rows to {}", records.len(), file_path.display());
    Ok(())
}

pub(crate) fn write_records<T: CsvRecord, W: io::Write>(records: &[T], writer: W) -> anyhow::Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    // serialize only emits the header along with the first record
    if records.is_empty() {
        csv_writer.write_record(T::HEADERS)?;
    }
    for r in records {
        csv_writer.serialize(r)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::ColumnAliases;
    use crate::csv_reader::column::ColumnMatcher;
    use crate::csv_reader::read_timesheet_from;
    use crate::export::write_records;
    use crate::report::{CategoryHours, TaskDateHours};
    use crate::timesheet::TimesheetRow;

    fn matcher() -> ColumnMatcher {
        ColumnMatcher::new(&ColumnAliases::default()).unwrap()
    }

    #[test]
    fn test_write_categorized_timesheet() {
        let rows = vec![
            TimesheetRow::new("Review PR #42, auth module", "01/31/2023", 1.0).with_category("Development"),
            TimesheetRow::new("Standup", "01/30/2023", 0.25),
        ];
        let mut buffer: Vec<u8> = vec![];
        write_records(&rows, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert_eq!(content, "Description,Date,Hours,Category\n\
            \"Review PR #42, auth module\",01/31/2023,1.0,Development\n\
            Standup,01/30/2023,0.25,\n");

        // what we write is what the reader accepts
        let read_back = read_timesheet_from(content.as_bytes(), &matcher(), "buffer").unwrap();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn test_write_empty_timesheet_keeps_header() {
        let mut buffer: Vec<u8> = vec![];
        write_records(&Vec::<TimesheetRow>::new(), &mut buffer).unwrap();
        let content = String::from_utf8(buffer).unwrap();
        assert_eq!(content, "Description,Date,Hours,Category\n");

        let read_back = read_timesheet_from(content.as_bytes(), &matcher(), "buffer").unwrap();
        assert!(read_back.is_empty());
    }

    #[test]
    fn test_write_empty_filtered_rows_keeps_header() {
        let rows: Vec<&TimesheetRow> = vec![];
        let mut buffer: Vec<u8> = vec![];
        write_records(&rows, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Description,Date,Hours,Category\n");
    }

    #[test]
    fn test_write_empty_reports_keep_header() {
        let mut buffer: Vec<u8> = vec![];
        write_records(&Vec::<CategoryHours>::new(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Category,Hours\n");

        let mut buffer: Vec<u8> = vec![];
        write_records(&Vec::<TaskDateHours>::new(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Description,Category,Date,Hours\n");
    }

    #[test]
    fn test_headers_match_serialized_fields() {
        let mut buffer: Vec<u8> = vec![];
        write_records(&[CategoryHours { category: "Admin".to_string(), hours: 1.5 }], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Category,Hours\nAdmin,1.5\n");
    }
}
