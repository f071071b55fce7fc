//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the campaign_planner
//! crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use campaign_planner::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/process.yaml")?;
//! let document = ProcessDocument::from_yaml(&text)?;
//! document.validate()?;
//!
//! let xml = export_bpmn(&document, "Ekos_Cycle_11")?;
//! let graph = render_graph(&document, "Ekos_Cycle_11", &RenderOptions::default());
//! println!("{}\n{}", xml, graph.to_dot());
//! # Ok(())
//! # }
//! ```

// Process model
pub use crate::process::{Flow, IntoProcess, Node, NodeType, Pool, ProcessDocument};

// Commands
pub use crate::command::{Command, CommandOutcome, CommandStatus, apply_command};

// Outputs
pub use crate::bpmn::{BpmnExporter, LayoutMode, export_bpmn};
pub use crate::graph::{ProcessGraph, RenderOptions, render_graph};

// Audience and summaries
pub use crate::audience::{Audience, AudienceFilter, Predicate, Roster, RosterColumns};
pub use crate::summary::{RosterStats, summarize_context, summarize_data};

// Session and configuration
pub use crate::config::PlannerConfig;
pub use crate::outline::Outline;
pub use crate::session::{Artifact, PlannerSession};

// Error types
pub use crate::error::{
    ExportError, FieldAccessError, MalformedDocumentError, ParseError, PlannerError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
