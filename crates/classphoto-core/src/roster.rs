use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_FIRST_NAME_COLUMN: &str = "Child's First Name";
pub const DEFAULT_LAST_NAME_COLUMN: &str = "Child's Last Name";

/// Header labels of the two roster columns that name a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterColumns {
    pub first_name: String,
    pub last_name: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            first_name: DEFAULT_FIRST_NAME_COLUMN.to_string(),
            last_name: DEFAULT_LAST_NAME_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
}

impl StudentRecord {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

pub fn student_dir_name(first: &str, last: &str) -> String {
    format!("{}_{}", first, last)
}

/// A CSV roster whose header has been checked for the name columns.
pub struct Roster<R> {
    reader: csv::Reader<R>,
    source_name: String,
    first_idx: usize,
    last_idx: usize,
}

impl Roster<File> {
    pub fn open(path: &Path, columns: &RosterColumns) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::filesystem("open roster", path, e))?;
        Self::from_reader(file, path.display().to_string(), columns)
    }
}

impl<R: Read> Roster<R> {
    pub fn from_reader(reader: R, source_name: impl Into<String>, columns: &RosterColumns) -> Result<Self> {
        let source_name = source_name.into();
        // rows may carry extra trailing fields; only the two name columns matter
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::malformed(&source_name, format!("cannot read header row: {}", e)))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let find = |label: &str| headers.iter().position(|h| h == label);
        let first_idx = find(&columns.first_name);
        let last_idx = find(&columns.last_name);

        match (first_idx, last_idx) {
            (Some(first_idx), Some(last_idx)) => Ok(Self {
                reader,
                source_name,
                first_idx,
                last_idx,
            }),
            _ => {
                let missing: Vec<&str> = [
                    (first_idx, columns.first_name.as_str()),
                    (last_idx, columns.last_name.as_str()),
                ]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, label)| label)
                .collect();
                Err(Error::malformed(
                    &source_name,
                    format!(
                        "missing column(s) {:?}; header has {:?}",
                        missing, headers
                    ),
                ))
            }
        }
    }

    /// Student records in row order. Single pass over the underlying reader.
    pub fn records(self) -> impl Iterator<Item = Result<StudentRecord>> {
        let Roster {
            reader,
            source_name,
            first_idx,
            last_idx,
        } = self;

        reader.into_records().map(move |row| {
            let row = row.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                Error::malformed(&source_name, format!("line {}: {}", line, e))
            })?;
            match (row.get(first_idx), row.get(last_idx)) {
                (Some(first), Some(last)) => Ok(StudentRecord::new(first, last)),
                _ => {
                    let line = row.position().map(|p| p.line()).unwrap_or(0);
                    Err(Error::malformed(
                        &source_name,
                        format!("line {}: row has {} field(s), missing a name column", line, row.len()),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(text: &str) -> Result<Roster<&[u8]>> {
        Roster::from_reader(text.as_bytes(), "test.csv", &RosterColumns::default())
    }

    #[test]
    fn test_records_in_row_order() {
        let csv = "Child's First Name,Child's Last Name,Grade\nAnn,Lee,3\nSam,Oh,4\n";
        let records: Vec<StudentRecord> = roster(csv).unwrap().records().collect::<Result<_>>().unwrap();
        assert_eq!(records, vec![StudentRecord::new("Ann", "Lee"), StudentRecord::new("Sam", "Oh")]);
        assert_eq!(student_dir_name(&records[1].first_name, &records[1].last_name), "Sam_Oh");
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "Child's Last Name,Teacher,Child's First Name\nLee,Ms. Park,Ann\n";
        let records: Vec<StudentRecord> = roster(csv).unwrap().records().collect::<Result<_>>().unwrap();
        assert_eq!(records, vec![StudentRecord::new("Ann", "Lee")]);
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let err = roster("First,Child's Last Name\nAnn,Lee\n").err().unwrap();
        match err {
            Error::MalformedInput { message, .. } => assert!(message.contains("Child's First Name")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_names_pass_through() {
        let csv = "Child's First Name,Child's Last Name\n,Lee\n";
        let records: Vec<StudentRecord> = roster(csv).unwrap().records().collect::<Result<_>>().unwrap();
        assert_eq!(records[0], StudentRecord::new("", "Lee"));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let csv = "Child's First Name,Child's Last Name\nAnn,Lee\nSam\n";
        let results: Vec<Result<StudentRecord>> = roster(csv).unwrap().records().collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(Error::MalformedInput { message, .. }) => assert!(message.starts_with("line 3:"), "{}", message),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let csv = "Child's First Name,Child's Last Name\nAnn,Lee,\nSam,Oh\nKim,Ray,extra,more\n";
        let records: Vec<StudentRecord> = roster(csv).unwrap().records().collect::<Result<_>>().unwrap();
        assert_eq!(
            records,
            vec![
                StudentRecord::new("Ann", "Lee"),
                StudentRecord::new("Sam", "Oh"),
                StudentRecord::new("Kim", "Ray"),
            ]
        );
    }

    #[test]
    fn test_custom_columns_and_bom() {
        let columns = RosterColumns {
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
        };
        let csv = "\u{feff}First,Last\nAnn,Lee\n";
        let records: Vec<StudentRecord> = Roster::from_reader(csv.as_bytes(), "bom.csv", &columns)
            .unwrap()
            .records()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records, vec![StudentRecord::new("Ann", "Lee")]);
    }
}
