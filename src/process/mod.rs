//! The declarative process model: pools with their lanes, typed nodes and directed flows.
//!
//! A [`ProcessDocument`] is plain data. It is usually produced from YAML text with
//! [`ProcessDocument::from_yaml`], checked with [`ProcessDocument::validate`], and then handed
//! to the BPMN exporter ([`crate::bpmn`]) and the graph renderer ([`crate::graph`]).
//!
//! ```yaml
//! pools:
//!   pool_crm:
//!     name: CRM Campaign
//!     processRef: Process_Crm
//!     lanes:
//!       lane_planning: Planning
//! elements:
//!   - {id: start, name: Kickoff, type: startEvent, lane: lane_planning}
//!   - {id: plan, name: Plan channels, type: userTask, lane: lane_planning, content: 'WhatsApp, Email'}
//! flows:
//!   - {id: f1, source: start, target: plan}
//! ```

pub mod conversion;
pub mod parse;
pub mod validate;

pub use conversion::*;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete process description: pools, elements and flows in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessDocument {
    #[serde(default)]
    pub pools: IndexMap<String, Pool>,
    #[serde(default)]
    pub elements: Vec<Node>,
    #[serde(default)]
    pub flows: Vec<Flow>,
}

/// A participant of the collaboration, owning one process and its lanes.
///
/// `processRef` and `lanes` are optional at parse time so that a document missing them can
/// still be rendered; the exporter reports them as missing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "processRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub process_ref: Option<String>,
    /// Lane id -> display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lanes: Option<IndexMap<String, String>>,
}

impl Pool {
    /// Display name, falling back to the pool id.
    pub fn display_name<'a>(&'a self, pool_id: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(pool_id)
    }

    pub fn has_lane(&self, lane_id: &str) -> bool {
        self.lanes
            .as_ref()
            .is_some_and(|lanes| lanes.contains_key(lane_id))
    }

    /// Iterates over `(lane_id, lane_name)` pairs in declaration order.
    pub fn lanes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lanes
            .iter()
            .flat_map(|lanes| lanes.iter())
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }
}

/// A typed step of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeType>,
    pub lane: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Node {
    /// The annotation text, if present and not blank.
    pub fn documentation(&self) -> Option<&str> {
        self.content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
    }

    pub fn category(&self) -> NodeCategory {
        self.kind
            .as_ref()
            .map_or(NodeCategory::Unknown, NodeType::category)
    }

    /// The BPMN element tag for this node: its own type when that names an event, task or
    /// gateway kind and is usable as an XML name, otherwise the generic `task`.
    pub fn bpmn_tag(&self) -> &str {
        match &self.kind {
            Some(kind)
                if kind.category() != NodeCategory::Unknown && is_element_name(kind.as_str()) =>
            {
                kind.as_str()
            }
            _ => "task",
        }
    }
}

/// An ASCII letter followed by ASCII letters and digits.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Node types. Names outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    StartEvent,
    EndEvent,
    ServiceTask,
    UserTask,
    ExclusiveGateway,
    ParallelGateway,
    Other(String),
}

/// Coarse grouping of node types, used for shapes and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Event,
    Task,
    Gateway,
    Unknown,
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::StartEvent => "startEvent",
            NodeType::EndEvent => "endEvent",
            NodeType::ServiceTask => "serviceTask",
            NodeType::UserTask => "userTask",
            NodeType::ExclusiveGateway => "exclusiveGateway",
            NodeType::ParallelGateway => "parallelGateway",
            NodeType::Other(name) => name,
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeType::StartEvent | NodeType::EndEvent => NodeCategory::Event,
            NodeType::ServiceTask | NodeType::UserTask => NodeCategory::Task,
            NodeType::ExclusiveGateway | NodeType::ParallelGateway => NodeCategory::Gateway,
            NodeType::Other(name) => {
                if name.contains("Task") || name == "task" {
                    NodeCategory::Task
                } else if name.contains("Gateway") {
                    NodeCategory::Gateway
                } else if name.contains("Event") {
                    NodeCategory::Event
                } else {
                    NodeCategory::Unknown
                }
            }
        }
    }
}

impl From<String> for NodeType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "startEvent" => NodeType::StartEvent,
            "endEvent" => NodeType::EndEvent,
            "serviceTask" => NodeType::ServiceTask,
            "userTask" => NodeType::UserTask,
            "exclusiveGateway" => NodeType::ExclusiveGateway,
            "parallelGateway" => NodeType::ParallelGateway,
            _ => NodeType::Other(name),
        }
    }
}

impl From<&str> for NodeType {
    fn from(name: &str) -> Self {
        NodeType::from(name.to_string())
    }
}

impl From<NodeType> for String {
    fn from(kind: NodeType) -> Self {
        match kind {
            NodeType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge between two nodes, optionally labelled (e.g. a branch condition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Flow {
    /// The label, if present and not blank.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl ProcessDocument {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.elements.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.elements.iter_mut().find(|n| n.id == id)
    }

    /// The pool declaring `lane_id`, as `(pool_id, pool)`.
    pub fn lane_owner(&self, lane_id: &str) -> Option<(&str, &Pool)> {
        self.pools
            .iter()
            .find(|(_, pool)| pool.has_lane(lane_id))
            .map(|(id, pool)| (id.as_str(), pool))
    }

    /// Elements assigned to `lane_id`, in declaration order.
    pub fn nodes_in_lane<'a>(&'a self, lane_id: &'a str) -> impl Iterator<Item = &'a Node> {
        self.elements.iter().filter(move |n| n.lane == lane_id)
    }

    /// Elements assigned to any lane of `pool`, in declaration order.
    pub fn nodes_in_pool<'a>(&'a self, pool: &'a Pool) -> impl Iterator<Item = &'a Node> {
        self.elements.iter().filter(move |n| pool.has_lane(&n.lane))
    }
}
