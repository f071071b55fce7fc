//! The agent roster and the audience filter that selects campaign targets from it.

mod filter;

pub use filter::*;

use crate::error::{FieldAccessError, RosterError};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Names of the roster columns the planner reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterColumns {
    pub region: String,
    pub tier: String,
    pub sales: String,
    pub engagement: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            region: "region".to_string(),
            tier: "tier".to_string(),
            sales: "last_cycle_sales".to_string(),
            engagement: "engagement_rate".to_string(),
        }
    }
}

/// Tabular agent data with a header row. Cells are kept as text; numeric columns are parsed
/// on access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Roster {
    pub fn new(headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Self { headers, rows }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let rows = csv_reader
            .records()
            .collect::<Result<Vec<_>, csv::Error>>()?;
        debug!(columns = headers.len(), rows = rows.len(), "loaded roster");
        Ok(Self { headers, rows })
    }

    pub fn from_csv_str(text: &str) -> Result<Self, RosterError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(file)
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Result<usize, FieldAccessError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| FieldAccessError::MissingColumn(column.to_string()))
    }

    /// Cells of `column`, in row order.
    pub fn column(&self, column: &str) -> Result<impl Iterator<Item = &str>, FieldAccessError> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| row.get(idx).unwrap_or("")))
    }

    /// Values of `column` that parse as numbers. Other cells are skipped.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>, FieldAccessError> {
        Ok(self
            .column(column)?
            .filter_map(|cell| cell.parse::<f64>().ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_trimmed_and_non_numeric_values_skipped() {
        let roster = Roster::from_csv_str("name, sales\nA, 10.5\nB, n/a\nC,3\n").unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.numeric_column("sales").unwrap(), vec![10.5, 3.0]);
    }

    #[test]
    fn test_unknown_column_is_reported_by_name() {
        let roster = Roster::from_csv_str("a,b\n1,2\n").unwrap();
        assert_eq!(
            roster.column_index("sales"),
            Err(FieldAccessError::MissingColumn("sales".to_string()))
        );
    }
}
