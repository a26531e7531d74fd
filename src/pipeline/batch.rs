//! Batch input/output: CSV tables, column validation and label summaries.

use super::data::{HiringLabel, RawTable, REQUIRED_COLUMNS};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read a delimited table with a header row. Cells are kept verbatim.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

pub fn read_table_path<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let file = File::open(path)?;
    read_table(file)
}

pub fn write_table<W: Write>(table: &RawTable, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_table_path<P: AsRef<Path>>(table: &RawTable, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_table(table, file)
}

/// Reject a table unless every required column is present.
pub fn validate_columns(table: &RawTable) -> Result<()> {
    let missing = table.missing_columns(&REQUIRED_COLUMNS);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingColumns {
            required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            missing,
        })
    }
}

/// Copy of `table` with one label per row in `column`.
///
/// An existing column of the same name is overwritten in place.
pub fn append_labels(table: &RawTable, column: &str, labels: &[HiringLabel]) -> RawTable {
    let mut out = table.clone();
    match out.column_index(column) {
        Some(idx) => {
            for (row, label) in out.rows.iter_mut().zip(labels) {
                if idx < row.len() {
                    row[idx] = label.to_string();
                }
            }
        }
        None => {
            out.headers.push(column.to_string());
            for (row, label) in out.rows.iter_mut().zip(labels) {
                row.push(label.to_string());
            }
        }
    }
    out
}

/// Number of rows per label, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCounts {
    entries: Vec<(HiringLabel, usize)>,
}

impl LabelCounts {
    pub fn from_labels(labels: &[HiringLabel]) -> Self {
        let hire = labels.iter().filter(|l| **l == HiringLabel::Hire).count();
        let mut entries = vec![
            (HiringLabel::Hire, hire),
            (HiringLabel::DoNotHire, labels.len() - hire),
        ];
        // stable: equal counts keep Hire first
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        LabelCounts { entries }
    }

    pub fn get(&self, label: HiringLabel) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(HiringLabel, usize)> {
        self.entries.iter()
    }
}

/// Result of a batch prediction.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Input table plus the label column.
    pub table: RawTable,
    pub label_column: String,
    pub labels: Vec<HiringLabel>,
    /// Probability of the predicted class, per row.
    pub confidences: Vec<f64>,
}

impl BatchOutput {
    pub fn counts(&self) -> LabelCounts {
        LabelCounts::from_labels(&self.labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::REFERENCE_CSV;

    #[test]
    fn test_read_table_keeps_cells_verbatim() {
        let table = read_table("a,b\n 1 ,x\n2.50,\"y,z\"\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec![" 1 ", "x"]);
        assert_eq!(table.rows[1], vec!["2.50", "y,z"]);
    }

    #[test]
    fn test_validate_columns() {
        let table = read_table(REFERENCE_CSV.as_bytes()).unwrap();
        assert!(validate_columns(&table).is_ok());

        let partial = table.without_column("Gender").without_column("Age");
        match validate_columns(&partial) {
            Err(Error::MissingColumns { required, missing }) => {
                assert_eq!(required.len(), 10);
                assert_eq!(missing, vec!["Age".to_string(), "Gender".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_append_labels_adds_or_replaces() {
        let table = read_table("a\n1\n2\n".as_bytes()).unwrap();
        let labels = [HiringLabel::Hire, HiringLabel::DoNotHire];

        let added = append_labels(&table, "Prediction", &labels);
        assert_eq!(added.headers, vec!["a", "Prediction"]);
        assert_eq!(added.rows[1], vec!["2", "Do not hire"]);

        let replaced = append_labels(&table, "a", &labels);
        assert_eq!(replaced.headers, vec!["a"]);
        assert_eq!(replaced.rows[0], vec!["Hire"]);
    }

    #[test]
    fn test_label_counts_order_and_total() {
        let labels = [
            HiringLabel::DoNotHire,
            HiringLabel::Hire,
            HiringLabel::DoNotHire,
        ];
        let counts = LabelCounts::from_labels(&labels);
        let order: Vec<_> = counts.iter().map(|(l, _)| *l).collect();
        assert_eq!(order, vec![HiringLabel::DoNotHire, HiringLabel::Hire]);
        assert_eq!(counts.get(HiringLabel::Hire), 1);
        assert_eq!(counts.total(), 3);

        let empty = LabelCounts::from_labels(&[]);
        assert_eq!(empty.total(), 0);
        assert_eq!(empty.iter().count(), 2);
    }

    #[test]
    fn test_write_then_read_file() {
        let table = read_table(REFERENCE_CSV.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_table_path(&table, &path).unwrap();
        assert_eq!(read_table_path(&path).unwrap(), table);
    }
}
