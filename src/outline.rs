//! A line-based process outline, for sketching a flow without writing the YAML by hand.
//!
//! ```text
//! START: New agent registered
//! STEP: Send welcome email
//! DECISION: Email opened within 48h?
//! END: Welcome flow finished
//! LINK: New agent registered -> Send welcome email
//! LINK: Email opened within 48h? -> Welcome flow finished [Yes]
//! ```
//!
//! Links refer to steps by name. Every step lands in a single lane of a single pool.

use crate::error::ConversionError;
use crate::process::{Flow, IntoProcess, Node, NodeType, Pool, ProcessDocument};
use ahash::AHashMap;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*->\s*(.+?)(?:\s*\[(.*)\])?$").expect("link pattern is a valid regex")
});

pub const OUTLINE_POOL: &str = "pool_outline";
pub const OUTLINE_LANE: &str = "lane_main";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Start,
    Step,
    Decision,
    End,
}

impl StepKind {
    fn id_prefix(self) -> &'static str {
        match self {
            StepKind::Start => "start",
            StepKind::Step => "step",
            StepKind::Decision => "decision",
            StepKind::End => "end",
        }
    }

    fn node_type(self) -> NodeType {
        match self {
            StepKind::Start => NodeType::StartEvent,
            StepKind::Step => NodeType::UserTask,
            StepKind::Decision => NodeType::ExclusiveGateway,
            StepKind::End => NodeType::EndEvent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineStep {
    /// 1-based line number the step was declared on.
    pub line: usize,
    pub kind: StepKind,
    pub name: String,
}

impl OutlineStep {
    pub fn id(&self) -> String {
        format!("{}_{}", self.kind.id_prefix(), self.line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLink {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub campaign_id: String,
    pub steps: Vec<OutlineStep>,
    pub links: Vec<OutlineLink>,
}

impl Outline {
    /// Reads an outline. Blank lines, `#` comments and lines without a known prefix are
    /// ignored.
    pub fn parse(text: &str, campaign_id: impl Into<String>) -> Self {
        let mut steps = Vec::new();
        let mut links = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((keyword, rest)) = line.split_once(':') else {
                debug!(line = idx + 1, "ignoring outline line without a prefix");
                continue;
            };
            let rest = rest.trim();
            let kind = match keyword.trim().to_ascii_uppercase().as_str() {
                "START" => StepKind::Start,
                "STEP" => StepKind::Step,
                "DECISION" => StepKind::Decision,
                "END" => StepKind::End,
                "LINK" => {
                    match LINK.captures(rest) {
                        Some(caps) => links.push(OutlineLink {
                            from: caps[1].trim().to_string(),
                            to: caps[2].trim().to_string(),
                            label: caps
                                .get(3)
                                .map(|m| m.as_str().trim().to_string())
                                .filter(|label| !label.is_empty()),
                        }),
                        None => warn!(line = idx + 1, "malformed LINK, expected 'from -> to'"),
                    }
                    continue;
                }
                other => {
                    debug!(line = idx + 1, prefix = other, "ignoring unknown outline prefix");
                    continue;
                }
            };
            steps.push(OutlineStep {
                line: idx + 1,
                kind,
                name: rest.to_string(),
            });
        }

        Self {
            campaign_id: campaign_id.into(),
            steps,
            links,
        }
    }
}

impl IntoProcess for Outline {
    fn into_process(self) -> Result<ProcessDocument, ConversionError> {
        if self.steps.is_empty() {
            return Err(ConversionError::ValidationError(
                "outline declares no START, STEP, DECISION or END lines".to_string(),
            ));
        }

        let mut lanes = IndexMap::new();
        lanes.insert(OUTLINE_LANE.to_string(), "Main flow".to_string());
        let mut pools = IndexMap::new();
        pools.insert(
            OUTLINE_POOL.to_string(),
            Pool {
                name: Some(self.campaign_id.clone()),
                process_ref: Some(format!("Process_{}", self.campaign_id)),
                lanes: Some(lanes),
            },
        );

        let mut id_by_name: AHashMap<&str, String> = AHashMap::new();
        let elements: Vec<Node> = self
            .steps
            .iter()
            .map(|step| {
                let id = step.id();
                id_by_name.entry(step.name.as_str()).or_insert_with(|| id.clone());
                Node {
                    id,
                    name: step.name.clone(),
                    kind: Some(step.kind.node_type()),
                    lane: OUTLINE_LANE.to_string(),
                    content: None,
                }
            })
            .collect();

        let mut flows = Vec::new();
        for link in &self.links {
            let (Some(source), Some(target)) = (
                id_by_name.get(link.from.as_str()),
                id_by_name.get(link.to.as_str()),
            ) else {
                warn!(from = %link.from, to = %link.to, "link skipped, step name not declared");
                continue;
            };
            flows.push(Flow {
                id: format!("flow_{}", flows.len() + 1),
                source: source.clone(),
                target: target.clone(),
                name: link.label.clone(),
            });
        }

        Ok(ProcessDocument {
            pools,
            elements,
            flows,
        })
    }
}
