//! Serializes the typed BPMN model with `quick-xml`.
//!
//! All names and text go through the writer's escaping, so arbitrary user strings in names,
//! documentation or flow labels cannot break the document.

use super::{
    BPMN_DI_NS, BPMN_MODEL_NS, Bounds, DC_NS, DI_NS, Definitions, Diagram, Edge, FlowElement,
    Process, Shape, XSI_NS,
};
use crate::error::ExportError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fmt::Display;

type XmlWriter = Writer<Vec<u8>>;

fn writer_error(err: impl Display) -> ExportError {
    ExportError::Writer(err.to_string())
}

fn start(w: &mut XmlWriter, element: BytesStart<'_>) -> Result<(), ExportError> {
    w.write_event(Event::Start(element)).map_err(writer_error)
}

fn empty(w: &mut XmlWriter, element: BytesStart<'_>) -> Result<(), ExportError> {
    w.write_event(Event::Empty(element)).map_err(writer_error)
}

fn end(w: &mut XmlWriter, name: &str) -> Result<(), ExportError> {
    w.write_event(Event::End(BytesEnd::new(name)))
        .map_err(writer_error)
}

fn text_element(w: &mut XmlWriter, name: &str, text: &str) -> Result<(), ExportError> {
    start(w, BytesStart::new(name))?;
    w.write_event(Event::Text(BytesText::new(text)))
        .map_err(writer_error)?;
    end(w, name)
}

/// Writes `definitions` as an indented XML document with declaration.
pub fn write_definitions(definitions: &Definitions) -> Result<String, ExportError> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(writer_error)?;

    let mut root = BytesStart::new("bpmn:definitions");
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xmlns:bpmn", BPMN_MODEL_NS));
    root.push_attribute(("xmlns:bpmndi", BPMN_DI_NS));
    root.push_attribute(("xmlns:dc", DC_NS));
    root.push_attribute(("xmlns:di", DI_NS));
    root.push_attribute(("id", definitions.id.as_str()));
    root.push_attribute(("targetNamespace", definitions.target_namespace.as_str()));
    start(&mut w, root)?;

    let mut collaboration = BytesStart::new("bpmn:collaboration");
    collaboration.push_attribute(("id", definitions.collaboration.id.as_str()));
    start(&mut w, collaboration)?;
    for participant in &definitions.collaboration.participants {
        let mut el = BytesStart::new("bpmn:participant");
        el.push_attribute(("id", participant.id.as_str()));
        el.push_attribute(("name", participant.name.as_str()));
        el.push_attribute(("processRef", participant.process_ref.as_str()));
        empty(&mut w, el)?;
    }
    end(&mut w, "bpmn:collaboration")?;

    for process in &definitions.processes {
        write_process(&mut w, process)?;
    }

    write_diagram(&mut w, &definitions.diagram)?;
    end(&mut w, "bpmn:definitions")?;

    String::from_utf8(w.into_inner()).map_err(writer_error)
}

fn write_process(w: &mut XmlWriter, process: &Process) -> Result<(), ExportError> {
    let mut el = BytesStart::new("bpmn:process");
    el.push_attribute(("id", process.id.as_str()));
    el.push_attribute((
        "isExecutable",
        if process.is_executable { "true" } else { "false" },
    ));
    start(w, el)?;

    if process.lanes.is_empty() {
        empty(w, BytesStart::new("bpmn:laneSet"))?;
    } else {
        start(w, BytesStart::new("bpmn:laneSet"))?;
        for lane in &process.lanes {
            let mut el = BytesStart::new("bpmn:lane");
            el.push_attribute(("id", lane.id.as_str()));
            el.push_attribute(("name", lane.name.as_str()));
            if lane.flow_node_refs.is_empty() {
                empty(w, el)?;
                continue;
            }
            start(w, el)?;
            for node_ref in &lane.flow_node_refs {
                text_element(w, "bpmn:flowNodeRef", node_ref)?;
            }
            end(w, "bpmn:lane")?;
        }
        end(w, "bpmn:laneSet")?;
    }

    for element in &process.elements {
        write_flow_element(w, element)?;
    }

    for flow in &process.flows {
        let mut el = BytesStart::new("bpmn:sequenceFlow");
        el.push_attribute(("id", flow.id.as_str()));
        if let Some(name) = &flow.name {
            el.push_attribute(("name", name.as_str()));
        }
        el.push_attribute(("sourceRef", flow.source_ref.as_str()));
        el.push_attribute(("targetRef", flow.target_ref.as_str()));
        empty(w, el)?;
    }

    end(w, "bpmn:process")
}

fn write_flow_element(w: &mut XmlWriter, element: &FlowElement) -> Result<(), ExportError> {
    let tag = format!("bpmn:{}", element.tag);
    let mut el = BytesStart::new(tag.as_str());
    el.push_attribute(("id", element.id.as_str()));
    el.push_attribute(("name", element.name.as_str()));

    match &element.documentation {
        Some(doc) => {
            start(w, el)?;
            text_element(w, "bpmn:documentation", doc)?;
            end(w, &tag)
        }
        None => empty(w, el),
    }
}

fn write_diagram(w: &mut XmlWriter, diagram: &Diagram) -> Result<(), ExportError> {
    let mut el = BytesStart::new("bpmndi:BPMNDiagram");
    el.push_attribute(("id", diagram.id.as_str()));
    start(w, el)?;

    let mut plane = BytesStart::new("bpmndi:BPMNPlane");
    plane.push_attribute(("id", diagram.plane_id.as_str()));
    plane.push_attribute(("bpmnElement", diagram.plane_element.as_str()));
    if diagram.shapes.is_empty() && diagram.edges.is_empty() {
        empty(w, plane)?;
    } else {
        start(w, plane)?;
        for shape in &diagram.shapes {
            write_shape(w, shape)?;
        }
        for edge in &diagram.edges {
            write_edge(w, edge)?;
        }
        end(w, "bpmndi:BPMNPlane")?;
    }

    end(w, "bpmndi:BPMNDiagram")
}

fn write_shape(w: &mut XmlWriter, shape: &Shape) -> Result<(), ExportError> {
    let mut el = BytesStart::new("bpmndi:BPMNShape");
    el.push_attribute(("id", shape.id.as_str()));
    el.push_attribute(("bpmnElement", shape.element.as_str()));
    if let Some(horizontal) = shape.is_horizontal {
        el.push_attribute(("isHorizontal", if horizontal { "true" } else { "false" }));
    }
    start(w, el)?;
    empty(w, bounds_element(&shape.bounds))?;
    end(w, "bpmndi:BPMNShape")
}

fn write_edge(w: &mut XmlWriter, edge: &Edge) -> Result<(), ExportError> {
    let mut el = BytesStart::new("bpmndi:BPMNEdge");
    el.push_attribute(("id", edge.id.as_str()));
    el.push_attribute(("bpmnElement", edge.element.as_str()));
    start(w, el)?;
    for point in &edge.waypoints {
        let mut wp = BytesStart::new("di:waypoint");
        wp.push_attribute(("x", point.x.to_string().as_str()));
        wp.push_attribute(("y", point.y.to_string().as_str()));
        empty(w, wp)?;
    }
    end(w, "bpmndi:BPMNEdge")
}

fn bounds_element(bounds: &Bounds) -> BytesStart<'static> {
    let mut el = BytesStart::new("dc:Bounds");
    el.push_attribute(("x", bounds.x.to_string().as_str()));
    el.push_attribute(("y", bounds.y.to_string().as_str()));
    el.push_attribute(("width", bounds.width.to_string().as_str()));
    el.push_attribute(("height", bounds.height.to_string().as_str()));
    el
}

#[cfg(test)]
mod tests {
    use super::super::{Collaboration, Participant};
    use super::*;

    fn minimal() -> Definitions {
        Definitions {
            id: "Definitions_1".to_string(),
            target_namespace: "urn:test".to_string(),
            collaboration: Collaboration {
                id: "Collaboration_c".to_string(),
                participants: vec![Participant {
                    id: "p".to_string(),
                    name: "Sales & <Ops>".to_string(),
                    process_ref: "Proc".to_string(),
                }],
            },
            processes: vec![Process {
                id: "Proc".to_string(),
                is_executable: true,
                lanes: vec![],
                elements: vec![FlowElement {
                    tag: "userTask".to_string(),
                    id: "t".to_string(),
                    name: "Say \"hi\"".to_string(),
                    documentation: Some("a < b".to_string()),
                }],
                flows: vec![],
            }],
            diagram: Diagram {
                id: "BPMNDiagram_1".to_string(),
                plane_id: "BPMNPlane_1".to_string(),
                plane_element: "Collaboration_c".to_string(),
                shapes: vec![],
                edges: vec![],
            },
        }
    }

    #[test]
    fn test_names_and_text_are_escaped() {
        let xml = write_definitions(&minimal()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("name=\"Sales &amp; &lt;Ops&gt;\""));
        assert!(xml.contains("name=\"Say &quot;hi&quot;\""));
        assert!(xml.contains("<bpmn:documentation>a &lt; b</bpmn:documentation>"));
    }

    #[test]
    fn test_empty_plane_is_self_closing() {
        let xml = write_definitions(&minimal()).unwrap();
        assert!(xml.contains("<bpmndi:BPMNPlane id=\"BPMNPlane_1\" bpmnElement=\"Collaboration_c\"/>"));
    }
}
