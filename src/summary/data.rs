use crate::audience::{Roster, RosterColumns};
use crate::error::FieldAccessError;
use tracing::warn;

/// Averages over the numeric cells of the sales and engagement columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterStats {
    pub agents: usize,
    pub mean_sales: f64,
    pub mean_engagement: f64,
}

impl RosterStats {
    pub fn compute(roster: &Roster, columns: &RosterColumns) -> Result<Self, FieldAccessError> {
        if roster.is_empty() {
            return Err(FieldAccessError::EmptyRoster);
        }
        let sales = roster.numeric_column(&columns.sales)?;
        let engagement = roster.numeric_column(&columns.engagement)?;

        Ok(Self {
            agents: roster.len(),
            mean_sales: mean(&sales)
                .ok_or_else(|| FieldAccessError::NoNumericValues(columns.sales.clone()))?,
            mean_engagement: mean(&engagement)
                .ok_or_else(|| FieldAccessError::NoNumericValues(columns.engagement.clone()))?,
        })
    }

    pub fn to_markdown(&self) -> String {
        format!(
            "### Detailed Performance Outlook\n\
             * **Agents in base:** {}\n\
             * **Average sales (current base):** {:.2}\n\
             * **Average engagement (current base):** {:.1}%",
            self.agents, self.mean_sales, self.mean_engagement
        )
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Markdown report of roster averages, or a placeholder naming the problem.
pub fn summarize_data(roster: &Roster, columns: &RosterColumns) -> String {
    match RosterStats::compute(roster, columns) {
        Ok(stats) => stats.to_markdown(),
        Err(e) => {
            warn!(error = %e, "data summary unavailable");
            format!("_Performance outlook unavailable: {}._", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_slice_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }
}
