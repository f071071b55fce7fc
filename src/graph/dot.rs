use super::{GraphNode, ProcessGraph};
use std::fmt;

impl fmt::Display for ProcessGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph CampaignProcess {{")?;
        writeln!(f, "  rankdir={};", sanitize_id(&self.rankdir))?;
        writeln!(f, "  splines=ortho;")?;
        writeln!(f, "  compound=true;")?;
        writeln!(f, "  label=\"{}\";", escape_dot_string(&self.label))?;
        writeln!(f, "  fontsize=16;")?;
        writeln!(f, "  node [fontname=\"Helvetica\"];")?;

        for (p, pool) in self.pools.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "  subgraph cluster_pool{}_{} {{", p, sanitize_id(&pool.id))?;
            writeln!(f, "    label=\"{}\";", escape_dot_string(&pool.label))?;
            writeln!(f, "    style=filled;")?;
            writeln!(f, "    color=lightgrey;")?;

            for (l, lane) in pool.lanes.iter().enumerate() {
                writeln!(
                    f,
                    "    subgraph cluster_lane{}_{}_{} {{",
                    p,
                    l,
                    sanitize_id(&lane.id)
                )?;
                writeln!(f, "      label=\"{}\";", escape_dot_string(&lane.label))?;
                writeln!(f, "      style=rounded;")?;
                writeln!(f, "      color=black;")?;
                for node in &lane.nodes {
                    write_node(f, node)?;
                }
                writeln!(f, "    }}")?;
            }

            writeln!(f, "  }}")?;
        }

        if !self.edges.is_empty() {
            writeln!(f)?;
        }
        for edge in &self.edges {
            write!(
                f,
                "  \"{}\" -> \"{}\"",
                escape_dot_string(&edge.source),
                escape_dot_string(&edge.target)
            )?;
            match &edge.label {
                Some(label) => writeln!(f, " [label=\"{}\"];", escape_dot_string(label))?,
                None => writeln!(f, ";")?,
            }
        }

        writeln!(f, "}}")
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &GraphNode) -> fmt::Result {
    writeln!(
        f,
        "      \"{}\" [label=\"{}\", shape={}, style=\"{}\", fillcolor=\"{}\"];",
        escape_dot_string(&node.id),
        escape_dot_string(&node.label),
        node.style.shape,
        node.style.style,
        node.style.fillcolor
    )
}

/// Cluster names must start with `cluster` and stay unquoted, so anything outside
/// `[A-Za-z0-9_]` is replaced. Callers prefix the result with the cluster's position, since
/// distinct ids can sanitize to the same text.
fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
