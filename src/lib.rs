//! # Campaign Planner - CRM Campaign Process Planning Core
//!
//! **Campaign Planner** turns a small declarative description of a CRM campaign process into
//! the artifacts a planning team hands around: a BPMN 2.0 diagram any modeler can open, a
//! Graphviz rendering for quick review, and the CSV list of agents the campaign targets.
//!
//! ## Core Workflow
//!
//! Everything revolves around one canonical model, the [`ProcessDocument`]: pools with their
//! lanes, typed nodes (events, tasks, gateways) and directed flows. The usual workflow is:
//!
//! 1.  **Describe the process**: Write it as YAML and parse it with
//!     [`ProcessDocument::from_yaml`], or bring your own format and implement
//!     [`IntoProcess`](process::IntoProcess) for it. A line-based [`Outline`](outline::Outline)
//!     importer ships with the crate.
//! 2.  **Refine it**: Apply commands such as `rename the task 'task_app' to 'Send Push'` with
//!     [`apply_command`](command::apply_command).
//! 3.  **Export and render**: Produce BPMN XML with [`BpmnExporter`] and a styled, clustered
//!     graph with [`ProcessGraph`].
//! 4.  **Pick the audience**: Load the agent [`Roster`] and select rows with an
//!     [`AudienceFilter`].
//!
//! A [`PlannerSession`] bundles the inputs of one planning session and exposes all of the
//! above as operations, starting from built-in sample data.
//!
//! ## Quick Start
//!
//! ```rust
//! use campaign_planner::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut session = PlannerSession::with_defaults()?;
//!
//!     // Refine the process with a command
//!     let status = session.apply_command("rename the task 'task_app' to 'Send Push Notification'");
//!     println!("{}", status);
//!
//!     // Export the BPMN diagram
//!     let bpmn = session.export_bpmn()?;
//!     assert!(String::from_utf8(bpmn.bytes)?.contains("Send Push Notification"));
//!
//!     // Keep only Southeast agents
//!     let filter = AudienceFilter::new().one_of("region", ["Southeast"]);
//!     let count = session.save_audience(&filter)?;
//!     println!("{} agents targeted", count);
//!
//!     let csv = session.export_audience()?;
//!     assert_eq!(csv.file_name, "target_audience.csv");
//!     Ok(())
//! }
//! ```

pub mod audience;
pub mod bpmn;
pub mod command;
pub mod config;
pub mod error;
pub mod graph;
pub mod outline;
pub mod prelude;
pub mod process;
pub mod session;
pub mod summary;

pub use audience::{Audience, AudienceFilter, Roster};
pub use bpmn::BpmnExporter;
pub use graph::ProcessGraph;
pub use process::ProcessDocument;
pub use session::PlannerSession;
