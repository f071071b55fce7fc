use super::{Roster, RosterColumns};
use crate::error::{FieldAccessError, RosterError};
use csv::StringRecord;
use indexmap::IndexSet;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One condition on a roster column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Cell text is one of `values`. An empty set matches nothing.
    OneOf {
        column: String,
        values: IndexSet<String>,
    },
    /// Cell parses as a number within `[min, max]`. Non-numeric cells never match.
    Between { column: String, min: f64, max: f64 },
}

impl Predicate {
    pub fn column(&self) -> &str {
        match self {
            Predicate::OneOf { column, .. } | Predicate::Between { column, .. } => column,
        }
    }

    fn matches(&self, cell: &str) -> bool {
        match self {
            Predicate::OneOf { values, .. } => values.contains(cell),
            Predicate::Between { min, max, .. } => cell
                .parse::<f64>()
                .is_ok_and(|value| *min <= value && value <= *max),
        }
    }
}

/// A conjunction of predicates. The empty filter keeps every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudienceFilter {
    pub predicates: Vec<Predicate>,
}

impl AudienceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn one_of<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predicates.push(Predicate::OneOf {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn between(mut self, column: impl Into<String>, min: f64, max: f64) -> Self {
        self.predicates.push(Predicate::Between {
            column: column.into(),
            min,
            max,
        });
        self
    }

    /// The filter that selects the whole roster: every distinct region and tier, and the
    /// full sales range.
    ///
    /// When no sales cell is numeric the range predicate is left out.
    pub fn defaults_for(roster: &Roster, columns: &RosterColumns) -> Result<Self, FieldAccessError> {
        let regions: Vec<&str> = roster.column(&columns.region)?.unique().collect();
        let tiers: Vec<&str> = roster.column(&columns.tier)?.unique().collect();
        let sales = roster.numeric_column(&columns.sales)?;

        let filter = Self::new()
            .one_of(&columns.region, regions)
            .one_of(&columns.tier, tiers);

        Ok(match sales.iter().copied().minmax() {
            MinMaxResult::NoElements => filter,
            MinMaxResult::OneElement(value) => filter.between(&columns.sales, value, value),
            MinMaxResult::MinMax(min, max) => filter.between(&columns.sales, min, max),
        })
    }

    /// Rows satisfying every predicate, in roster order.
    pub fn apply(&self, roster: &Roster) -> Result<Audience, FieldAccessError> {
        let bound = self
            .predicates
            .iter()
            .map(|p| roster.column_index(p.column()).map(|idx| (idx, p)))
            .collect::<Result<Vec<_>, _>>()?;

        let rows: Vec<StringRecord> = roster
            .rows()
            .iter()
            .filter(|row| {
                bound
                    .iter()
                    .all(|(idx, predicate)| predicate.matches(row.get(*idx).unwrap_or("")))
            })
            .cloned()
            .collect();

        debug!(
            predicates = self.predicates.len(),
            matched = rows.len(),
            total = roster.len(),
            "applied audience filter"
        );

        Ok(Audience {
            headers: roster.headers().clone(),
            rows,
        })
    }
}

/// The rows selected by a filter, with the roster's header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Audience {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Audience {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Cells of `column` for the selected rows.
    pub fn column(&self, column: &str) -> Result<Vec<&str>, FieldAccessError> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| FieldAccessError::MissingColumn(column.to_string()))?;
        Ok(self.rows.iter().map(|row| row.get(idx).unwrap_or("")).collect())
    }

    /// UTF-8 CSV with the header row and no index column.
    pub fn to_csv(&self) -> Result<Vec<u8>, RosterError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| RosterError::Csv(e.to_string()))?;
        info!(rows = self.rows.len(), bytes = bytes.len(), "serialized audience");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::from_csv_str("id,region,sales\n1,North,100\n2,South,500\n3,North,900\n4,East,abc\n")
            .unwrap()
    }

    #[test]
    fn test_between_is_inclusive_and_skips_non_numeric() {
        let audience = AudienceFilter::new()
            .between("sales", 100.0, 500.0)
            .apply(&roster())
            .unwrap();
        assert_eq!(audience.column("id").unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn test_predicates_are_combined_with_and() {
        let audience = AudienceFilter::new()
            .one_of("region", ["North"])
            .between("sales", 200.0, 1000.0)
            .apply(&roster())
            .unwrap();
        assert_eq!(audience.column("id").unwrap(), vec!["3"]);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let audience = AudienceFilter::new()
            .between("sales", 900.0, 100.0)
            .apply(&roster())
            .unwrap();
        assert!(audience.is_empty());
    }

    #[test]
    fn test_missing_column_fails_before_filtering() {
        let err = AudienceFilter::new()
            .one_of("tier", ["Gold"])
            .apply(&roster())
            .unwrap_err();
        assert_eq!(err, FieldAccessError::MissingColumn("tier".to_string()));
    }
}
