//! Placeholder coordinates for the diagram interchange section.
//!
//! This is not a layout engine. Pools are stacked vertically, each lane is a horizontal band,
//! and every node gets its own column in declaration order inside its pool. Edges are a single
//! straight segment from the right border of the source to the left border of the target.

use super::{Bounds, Edge, Point, Shape};
use crate::process::{NodeCategory, ProcessDocument};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

const ORIGIN_X: f64 = 100.0;
const ORIGIN_Y: f64 = 80.0;
const POOL_LABEL_WIDTH: f64 = 30.0;
const LANE_HEIGHT: f64 = 150.0;
const COLUMN_WIDTH: f64 = 150.0;
const LEADING_SPACE: f64 = 30.0;
const POOL_GAP: f64 = 40.0;

/// What to put inside the diagram plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// An empty plane. Viewers that need coordinates will show a blank canvas.
    Empty,
    /// Pool and lane bands with nodes placed left to right.
    #[default]
    Placeholder,
}

/// Shape size for a node category: small squares for events, larger for gateways, and the
/// widest rectangle for tasks.
pub fn shape_size(category: NodeCategory) -> (f64, f64) {
    match category {
        NodeCategory::Event => (36.0, 36.0),
        NodeCategory::Gateway => (50.0, 50.0),
        NodeCategory::Task | NodeCategory::Unknown => (100.0, 80.0),
    }
}

/// Computes pool, lane and node shapes plus flow edges for `document`.
///
/// Elements outside every pool lane get no shape; flows touching them get no edge.
pub fn placeholder_layout(document: &ProcessDocument) -> (Vec<Shape>, Vec<Edge>) {
    let mut shapes = Vec::new();
    let mut node_bounds: AHashMap<&str, Bounds> = AHashMap::new();
    let mut pool_y = ORIGIN_Y;

    for (pool_id, pool) in &document.pools {
        let lane_ids: Vec<&str> = pool.lanes().map(|(id, _)| id).collect();
        let columns = document.nodes_in_pool(pool).count().max(1);
        let pool_width = POOL_LABEL_WIDTH + 2.0 * LEADING_SPACE + columns as f64 * COLUMN_WIDTH;
        let pool_height = lane_ids.len().max(1) as f64 * LANE_HEIGHT;

        shapes.push(Shape {
            id: format!("{}_di", pool_id),
            element: pool_id.clone(),
            is_horizontal: Some(true),
            bounds: Bounds {
                x: ORIGIN_X,
                y: pool_y,
                width: pool_width,
                height: pool_height,
            },
        });

        let mut lane_center: AHashMap<&str, f64> = AHashMap::new();
        for (row, lane_id) in lane_ids.iter().copied().enumerate() {
            let lane_y = pool_y + row as f64 * LANE_HEIGHT;
            lane_center.insert(lane_id, lane_y + LANE_HEIGHT / 2.0);
            shapes.push(Shape {
                id: format!("{}_di", lane_id),
                element: lane_id.to_string(),
                is_horizontal: Some(true),
                bounds: Bounds {
                    x: ORIGIN_X + POOL_LABEL_WIDTH,
                    y: lane_y,
                    width: pool_width - POOL_LABEL_WIDTH,
                    height: LANE_HEIGHT,
                },
            });
        }

        for (column, node) in document.nodes_in_pool(pool).enumerate() {
            let Some(center_y) = lane_center.get(node.lane.as_str()).copied() else {
                continue;
            };
            let center_x = ORIGIN_X
                + POOL_LABEL_WIDTH
                + LEADING_SPACE
                + column as f64 * COLUMN_WIDTH
                + COLUMN_WIDTH / 2.0;
            let (width, height) = shape_size(node.category());
            let bounds = Bounds {
                x: center_x - width / 2.0,
                y: center_y - height / 2.0,
                width,
                height,
            };
            node_bounds.entry(node.id.as_str()).or_insert(bounds);
            shapes.push(Shape {
                id: format!("{}_di", node.id),
                element: node.id.clone(),
                is_horizontal: None,
                bounds,
            });
        }

        pool_y += pool_height + POOL_GAP;
    }

    let edges = document
        .flows
        .iter()
        .filter_map(|flow| {
            let source = node_bounds.get(flow.source.as_str())?;
            let target = node_bounds.get(flow.target.as_str())?;
            Some(Edge {
                id: format!("{}_di", flow.id),
                element: flow.id.clone(),
                waypoints: vec![
                    Point {
                        x: source.x + source.width,
                        y: source.center().y,
                    },
                    Point {
                        x: target.x,
                        y: target.center().y,
                    },
                ],
            })
        })
        .collect();

    (shapes, edges)
}
