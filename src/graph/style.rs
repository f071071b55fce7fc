use crate::process::{NodeCategory, NodeType};
use serde::Serialize;

/// Graphviz attributes for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub shape: &'static str,
    pub style: &'static str,
    pub fillcolor: &'static str,
    /// Short symbol drawn instead of the name on gateways.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<&'static str>,
}

const FALLBACK: NodeStyle = NodeStyle {
    shape: "box",
    style: "filled",
    fillcolor: "#E0E0E0",
    marker: None,
};

const GENERIC_TASK: NodeStyle = NodeStyle {
    shape: "box",
    style: "rounded,filled",
    fillcolor: "#BBDEFB",
    marker: None,
};

impl NodeStyle {
    pub fn for_kind(kind: Option<&NodeType>) -> Self {
        let Some(kind) = kind else {
            return FALLBACK;
        };
        match kind {
            NodeType::StartEvent => NodeStyle {
                shape: "circle",
                style: "filled",
                fillcolor: "#C8E6C9",
                marker: None,
            },
            NodeType::EndEvent => NodeStyle {
                shape: "doublecircle",
                style: "filled",
                fillcolor: "#FFCDD2",
                marker: None,
            },
            NodeType::ServiceTask => GENERIC_TASK,
            NodeType::UserTask => NodeStyle {
                fillcolor: "#D1C4E9",
                ..GENERIC_TASK
            },
            NodeType::ExclusiveGateway => NodeStyle {
                shape: "diamond",
                style: "filled",
                fillcolor: "#FFF9C4",
                marker: Some("X"),
            },
            NodeType::ParallelGateway => NodeStyle {
                shape: "diamond",
                style: "filled",
                fillcolor: "#FFE082",
                marker: Some("+"),
            },
            other if other.category() == NodeCategory::Task => GENERIC_TASK,
            _ => FALLBACK,
        }
    }
}
