//! Renders a process document as a clustered, styled directed graph.
//!
//! The renderer is tolerant: documents that the exporter would reject still render. Nodes in
//! a lane no pool declares are left out, and flows touching a node that was not placed are
//! skipped with a warning instead of failing the whole render.
//!
//! The resulting [`ProcessGraph`] is plain data and can be written as Graphviz DOT
//! ([`ProcessGraph::to_dot`]) or JSON ([`ProcessGraph::to_json`]).

mod dot;
pub mod style;

pub use style::NodeStyle;

use crate::process::{Node, ProcessDocument};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Knobs for the graph renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Show `X` / `+` on gateways instead of their names.
    pub gateway_markers: bool,
    /// Maximum number of characters of `content` shown under a node name.
    pub content_preview: usize,
    /// Graphviz `rankdir`.
    pub rankdir: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gateway_markers: true,
            content_preview: 60,
            rankdir: "LR".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessGraph {
    pub label: String,
    pub rankdir: String,
    pub pools: Vec<PoolCluster>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolCluster {
    pub id: String,
    pub label: String,
    pub lanes: Vec<LaneCluster>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneCluster {
    pub id: String,
    pub label: String,
    pub nodes: Vec<GraphNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

impl ProcessGraph {
    /// Builds the graph for `document`, titled with `campaign_id`.
    pub fn render(document: &ProcessDocument, campaign_id: &str, options: &RenderOptions) -> Self {
        let mut placed: AHashSet<&str> = AHashSet::new();
        let mut pools = Vec::with_capacity(document.pools.len());

        for (pool_id, pool) in &document.pools {
            let lanes = pool
                .lanes()
                .map(|(lane_id, lane_name)| LaneCluster {
                    id: lane_id.to_string(),
                    label: lane_name.to_string(),
                    nodes: document
                        .nodes_in_lane(lane_id)
                        .filter(|node| placed.insert(node.id.as_str()))
                        .map(|node| render_node(node, options))
                        .collect(),
                })
                .collect();

            pools.push(PoolCluster {
                id: pool_id.clone(),
                label: pool.display_name(pool_id).to_string(),
                lanes,
            });
        }

        for node in &document.elements {
            if document.lane_owner(&node.lane).is_none() {
                warn!(node = %node.id, lane = %node.lane, "node skipped, lane is not declared");
            }
        }

        let edges: Vec<GraphEdge> = document
            .flows
            .iter()
            .filter(|flow| {
                let keep = placed.contains(flow.source.as_str())
                    && placed.contains(flow.target.as_str());
                if !keep {
                    warn!(
                        flow = %flow.id,
                        source = %flow.source,
                        target = %flow.target,
                        "edge skipped, endpoint was not placed"
                    );
                }
                keep
            })
            .map(|flow| GraphEdge {
                source: flow.source.clone(),
                target: flow.target.clone(),
                label: flow.label().map(str::to_string),
            })
            .collect();

        debug!(nodes = placed.len(), edges = edges.len(), "rendered process graph");

        Self {
            label: campaign_id.to_string(),
            rankdir: options.rankdir.clone(),
            pools,
            edges,
        }
    }

    /// Iterates over every placed node.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.pools
            .iter()
            .flat_map(|pool| pool.lanes.iter())
            .flat_map(|lane| lane.nodes.iter())
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes().find(|node| node.id == id)
    }

    /// Graphviz DOT text.
    pub fn to_dot(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Shorthand for [`ProcessGraph::render`].
pub fn render_graph(
    document: &ProcessDocument,
    campaign_id: &str,
    options: &RenderOptions,
) -> ProcessGraph {
    ProcessGraph::render(document, campaign_id, options)
}

fn render_node(node: &Node, options: &RenderOptions) -> GraphNode {
    let style = NodeStyle::for_kind(node.kind.as_ref());
    let title = match style.marker {
        Some(marker) if options.gateway_markers => marker.to_string(),
        _ => node.name.clone(),
    };
    let label = match node.documentation() {
        Some(content) => format!("{}\n{}", title, preview(content, options.content_preview)),
        None => title,
    };

    GraphNode {
        id: node.id.clone(),
        label,
        style,
    }
}

/// The first `limit` characters of `text`, followed by `...` when anything was cut.
fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        assert_eq!(preview("ação rápida", 4), "ação...");
        assert_eq!(preview("short", 60), "short");
        assert_eq!(preview("exact", 5), "exact");
    }
}
