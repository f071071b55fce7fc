//! The state of one planning session and the operations a front end drives it with.
//!
//! The session owns only canonical inputs: the roster, the saved audience, the briefing and
//! insights text, the process document text, and the config. Everything else (the parsed
//! document, the default filter, graphs and exports) is recomputed from those on each call.

use crate::audience::{Audience, AudienceFilter, Roster};
use crate::bpmn::BpmnExporter;
use crate::command::{CommandStatus, apply_command};
use crate::config::PlannerConfig;
use crate::error::{MalformedDocumentError, ParseError, PlannerError};
use crate::graph::ProcessGraph;
use crate::outline::Outline;
use crate::process::{IntoProcess, ProcessDocument};
use crate::summary::{summarize_context, summarize_data};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const DEFAULT_PROCESS: &str = include_str!("../assets/default_process.yaml");
pub const DEFAULT_ROSTER: &str = include_str!("../assets/default_roster.csv");
pub const DEFAULT_BRIEFING: &str = include_str!("../assets/briefing.txt");
pub const DEFAULT_INSIGHTS: &str = include_str!("../assets/insights.txt");

/// A downloadable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Writes the artifact into `dir` under its file name.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

#[derive(Debug, Clone)]
pub struct PlannerSession {
    config: PlannerConfig,
    roster: Roster,
    audience: Option<Audience>,
    briefing: String,
    insights: String,
    process_text: String,
}

impl PlannerSession {
    /// A session seeded with the built-in sample roster, briefing, insights and process.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        Ok(Self {
            config,
            roster: Roster::from_csv_str(DEFAULT_ROSTER)?,
            audience: None,
            briefing: DEFAULT_BRIEFING.trim().to_string(),
            insights: DEFAULT_INSIGHTS.trim().to_string(),
            process_text: DEFAULT_PROCESS.to_string(),
        })
    }

    pub fn with_defaults() -> Result<Self, PlannerError> {
        Self::new(PlannerConfig::default())
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn saved_audience(&self) -> Option<&Audience> {
        self.audience.as_ref()
    }

    pub fn briefing(&self) -> &str {
        &self.briefing
    }

    pub fn insights(&self) -> &str {
        &self.insights
    }

    pub fn process_text(&self) -> &str {
        &self.process_text
    }

    pub fn set_briefing(&mut self, text: impl Into<String>) {
        self.briefing = text.into();
    }

    pub fn set_insights(&mut self, text: impl Into<String>) {
        self.insights = text.into();
    }

    /// Replaces the roster. A previously saved audience no longer refers to it and is
    /// dropped.
    pub fn load_roster(&mut self, roster: Roster) {
        info!(rows = roster.len(), "roster replaced");
        self.roster = roster;
        self.audience = None;
    }

    pub fn load_roster_csv(&mut self, text: &str) -> Result<(), PlannerError> {
        let roster = Roster::from_csv_str(text)?;
        self.load_roster(roster);
        Ok(())
    }

    pub fn context_summary(&self) -> String {
        summarize_context(&self.briefing, &self.insights)
    }

    pub fn data_summary(&self) -> String {
        summarize_data(&self.roster, &self.config.columns)
    }

    /// The filter selecting the entire current roster.
    pub fn default_filter(&self) -> Result<AudienceFilter, PlannerError> {
        Ok(AudienceFilter::defaults_for(&self.roster, &self.config.columns)?)
    }

    pub fn preview_audience(&self, filter: &AudienceFilter) -> Result<Audience, PlannerError> {
        Ok(filter.apply(&self.roster)?)
    }

    /// Applies `filter` and keeps the result for export. Returns the audience size.
    pub fn save_audience(&mut self, filter: &AudienceFilter) -> Result<usize, PlannerError> {
        let audience = filter.apply(&self.roster)?;
        let count = audience.count();
        self.audience = Some(audience);
        info!(count, "audience saved");
        Ok(count)
    }

    /// Stores new document text as typed, whether or not it parses.
    pub fn set_process_text(&mut self, text: impl Into<String>) {
        self.process_text = text.into();
    }

    pub fn document(&self) -> Result<ProcessDocument, ParseError> {
        ProcessDocument::from_yaml(&self.process_text)
    }

    /// Every structural issue of the current document.
    pub fn validate(&self) -> Result<Vec<MalformedDocumentError>, ParseError> {
        Ok(self.document()?.diagnostics())
    }

    /// Runs a refinement command against the document text, keeping the result.
    pub fn apply_command(&mut self, command: &str) -> CommandStatus {
        let outcome = apply_command(command, &self.process_text);
        self.process_text = outcome.text;
        outcome.status
    }

    /// Replaces the document with one built from an outline.
    pub fn import_outline(&mut self, outline_text: &str) -> Result<(), PlannerError> {
        let document = Outline::parse(outline_text, self.config.campaign_id.clone()).into_process()?;
        self.process_text = document.to_yaml()?;
        info!(elements = document.elements.len(), "process imported from outline");
        Ok(())
    }

    pub fn render_graph(&self) -> Result<ProcessGraph, PlannerError> {
        let document = self.document()?;
        guarded("rendering the process graph", || {
            Ok(ProcessGraph::render(
                &document,
                &self.config.campaign_id,
                &self.config.render,
            ))
        })
    }

    pub fn export_bpmn(&self) -> Result<Artifact, PlannerError> {
        let document = self.document()?;
        let xml = guarded("exporting the BPMN diagram", || {
            Ok(BpmnExporter::builder(&document, self.config.campaign_id.as_str())
                .with_layout(self.config.export.layout)
                .build()
                .export()?)
        })?;
        Ok(Artifact {
            file_name: self.config.export.bpmn_file_name.clone(),
            mime: "application/xml",
            bytes: xml.into_bytes(),
        })
    }

    pub fn export_audience(&self) -> Result<Artifact, PlannerError> {
        let audience = self.audience.as_ref().ok_or(PlannerError::NoAudience)?;
        let bytes = guarded("exporting the audience", || Ok(audience.to_csv()?))?;
        Ok(Artifact {
            file_name: self.config.export.audience_file_name.clone(),
            mime: "text/csv",
            bytes,
        })
    }
}

/// Runs `f`, turning a panic into [`PlannerError::Internal`].
fn guarded<T>(
    operation: &str,
    f: impl FnOnce() -> Result<T, PlannerError>,
) -> Result<T, PlannerError> {
    debug!(operation, "starting");
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(operation, %message, "operation panicked");
            Err(PlannerError::Internal {
                operation: operation.to_string(),
                message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
