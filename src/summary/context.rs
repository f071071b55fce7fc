use super::sentences;
use std::fmt;

pub const CONTEXT_PLACEHOLDER: &str =
    "_No business context yet. Add the cycle briefing and prior-cycle insights._";

/// Fragments quoted from the briefing and the insights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSummary {
    /// First sentence of the briefing.
    pub theme: Option<String>,
    /// Second sentence of the briefing.
    pub central_message: Option<String>,
    /// First sentence of the insights.
    pub priority_insight: Option<String>,
}

impl ContextSummary {
    pub fn extract(briefing: &str, insights: &str) -> Self {
        let briefing = sentences(briefing);
        let insights = sentences(insights);
        Self {
            theme: briefing.first().map(|s| s.to_string()),
            central_message: briefing.get(1).map(|s| s.to_string()),
            priority_insight: insights.first().map(|s| s.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.priority_insight.is_none()
    }
}

impl fmt::Display for ContextSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(CONTEXT_PLACEHOLDER);
        }
        write!(f, "### Relevant Business Context")?;
        if let Some(theme) = &self.theme {
            write!(f, "\n* **Cycle theme:** {}.", theme)?;
        }
        if let Some(message) = &self.central_message {
            write!(f, "\n* **Central message:** {}.", message)?;
        }
        if let Some(insight) = &self.priority_insight {
            write!(f, "\n* **Priority channel (insight):** {}.", insight)?;
        }
        Ok(())
    }
}

/// Markdown report quoting the theme, central message and leading insight.
pub fn summarize_context(briefing: &str, insights: &str) -> String {
    ContextSummary::extract(briefing, insights).to_string()
}
