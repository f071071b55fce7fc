//! BPMN 2.0 export.
//!
//! The exporter works in two steps. [`BpmnExporter`] maps a [`ProcessDocument`] onto the
//! typed model in this module ([`Definitions`] and friends), then [`writer`] serializes that
//! model to XML. Element order in the output always follows declaration order in the
//! document, so exporting the same document twice yields identical bytes.
//!
//! [`ProcessDocument`]: crate::process::ProcessDocument

mod builder;
pub mod layout;
pub mod writer;

pub use builder::*;
pub use layout::LayoutMode;

pub const BPMN_MODEL_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
pub const BPMN_DI_NS: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
pub const DC_NS: &str = "http://www.omg.org/spec/DD/20100524/DC";
pub const DI_NS: &str = "http://www.omg.org/spec/DD/20100524/DI";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const TARGET_NS: &str = "http://bpmn.io/schema/bpmn";

/// Root of a BPMN document.
#[derive(Debug, Clone, PartialEq)]
pub struct Definitions {
    pub id: String,
    pub target_namespace: String,
    pub collaboration: Collaboration,
    pub processes: Vec<Process>,
    pub diagram: Diagram,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collaboration {
    pub id: String,
    pub participants: Vec<Participant>,
}

/// One pool of the collaboration.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub process_ref: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    pub id: String,
    pub is_executable: bool,
    pub lanes: Vec<Lane>,
    pub elements: Vec<FlowElement>,
    pub flows: Vec<SequenceFlow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub id: String,
    pub name: String,
    pub flow_node_refs: Vec<String>,
}

/// An event, task or gateway. `tag` is the BPMN element name without prefix, e.g. `userTask`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowElement {
    pub tag: String,
    pub id: String,
    pub name: String,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFlow {
    pub id: String,
    pub name: Option<String>,
    pub source_ref: String,
    pub target_ref: String,
}

/// The diagram interchange section: one plane bound to the collaboration.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub id: String,
    pub plane_id: String,
    pub plane_element: String,
    pub shapes: Vec<Shape>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: String,
    pub element: String,
    pub is_horizontal: Option<bool>,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub element: String,
    pub waypoints: Vec<Point>,
}
