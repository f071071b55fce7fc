//! Tests for the BPMN 2.0 exporter.
mod common;
use campaign_planner::prelude::*;
use common::*;

#[test]
fn test_export_has_expected_skeleton() {
    let xml = export_bpmn(&simple_document(), "Ekos_11").unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert_eq!(
        attr_of(&xml, "bpmn:definitions", "Definitions_1", "targetNamespace").as_deref(),
        Some("http://bpmn.io/schema/bpmn")
    );
    assert!(xml.contains("xmlns:bpmn=\"http://www.omg.org/spec/BPMN/20100524/MODEL\""));
    assert!(xml.contains("xmlns:bpmndi=\"http://www.omg.org/spec/BPMN/20100524/DI\""));
    assert_eq!(
        attr_of(&xml, "bpmn:participant", "pool_crm", "processRef").as_deref(),
        Some("Process_Crm")
    );
    assert_eq!(
        attr_of(&xml, "bpmn:process", "Process_Crm", "isExecutable").as_deref(),
        Some("true")
    );
    assert_eq!(
        attr_of(&xml, "bpmndi:BPMNPlane", "BPMNPlane_1", "bpmnElement").as_deref(),
        Some("Collaboration_Ekos_11")
    );
}

#[test]
fn test_export_is_deterministic() {
    let doc = default_document();
    let first = export_bpmn(&doc, "Ekos").unwrap();
    let second = export_bpmn(&doc, "Ekos").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_lanes_list_exactly_their_elements() {
    let xml = export_bpmn(&simple_document(), "c").unwrap();
    assert_eq!(
        lane_refs(&xml),
        vec![
            (
                "lane_plan".to_string(),
                vec!["start".to_string(), "task_x".to_string()]
            ),
            (
                "lane_send".to_string(),
                vec!["gw".to_string(), "send_mail".to_string(), "done".to_string()]
            ),
        ]
    );
}

#[test]
fn test_elements_use_their_type_as_tag() {
    let xml = export_bpmn(&simple_document(), "c").unwrap();
    let names: Vec<String> = xml_elements(&xml).into_iter().map(|(n, _)| n).collect();

    for tag in [
        "bpmn:startEvent",
        "bpmn:userTask",
        "bpmn:exclusiveGateway",
        "bpmn:serviceTask",
        "bpmn:endEvent",
    ] {
        assert_eq!(names.iter().filter(|n| *n == tag).count(), 1, "{}", tag);
    }
    assert_eq!(occurrences(&xml, "<bpmn:documentation>"), 1);
    assert!(xml.contains("<bpmn:documentation>Pick the channels</bpmn:documentation>"));
}

#[test]
fn test_unknown_type_exports_as_generic_task() {
    let mut doc = simple_document();
    doc.node_mut("send_mail").unwrap().kind = Some(NodeType::from("carrierPigeon"));
    let xml = export_bpmn(&doc, "c").unwrap();
    assert_eq!(
        attr_of(&xml, "bpmn:task", "send_mail", "name").as_deref(),
        Some("Send Email")
    );
}

#[test]
fn test_type_that_is_not_an_xml_name_exports_as_task() {
    let doc = ProcessDocument::from_yaml(
        r#"
pools:
  p: {processRef: Proc, lanes: {l: L}}
elements:
  - {id: a, name: A, type: 'send Task', lane: l}
  - {id: b, name: B, type: 'bpmn:userTask', lane: l}
  - {id: c, name: C, type: manualTask, lane: l}
"#,
    )
    .unwrap();
    let xml = export_bpmn(&doc, "c").unwrap();

    let mut reader = quick_xml::Reader::from_str(&xml);
    loop {
        match reader.read_event() {
            Ok(quick_xml::events::Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("export is not well-formed: {}", e),
        }
    }
    assert_eq!(attr_of(&xml, "bpmn:task", "a", "name").as_deref(), Some("A"));
    assert_eq!(attr_of(&xml, "bpmn:task", "b", "name").as_deref(), Some("B"));
    assert_eq!(attr_of(&xml, "bpmn:manualTask", "c", "name").as_deref(), Some("C"));
}

#[test]
fn test_id_shared_by_pool_and_element_is_rejected() {
    let doc = ProcessDocument::from_yaml(
        r#"
pools:
  x: {processRef: Proc, lanes: {l: L}}
elements:
  - {id: x, name: Clash, type: userTask, lane: l}
"#,
    )
    .unwrap();
    let err = export_bpmn(&doc, "c").unwrap_err();
    assert!(matches!(
        err,
        ExportError::Malformed(MalformedDocumentError::DuplicateId(ref id)) if id == "x"
    ));
}

#[test]
fn test_every_flow_is_emitted_once() {
    let doc = ProcessDocument::from_yaml(TWO_POOL_YAML).unwrap();
    let xml = export_bpmn(&doc, "c").unwrap();
    let flows: Vec<String> = xml_elements(&xml)
        .into_iter()
        .filter(|(n, _)| n == "bpmn:sequenceFlow")
        .map(|(_, attrs)| attrs[0].1.clone())
        .collect();
    assert_eq!(flows, vec!["f_brief", "f_cross", "f_relay", "f_close"]);
}

#[test]
fn test_cross_pool_flow_belongs_to_source_process() {
    let doc = ProcessDocument::from_yaml(TWO_POOL_YAML).unwrap();
    let defs = BpmnExporter::builder(&doc, "c").build().to_definitions().unwrap();

    let brand: Vec<&str> = defs.processes[0].flows.iter().map(|f| f.id.as_str()).collect();
    let field: Vec<&str> = defs.processes[1].flows.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(brand, vec!["f_brief", "f_cross"]);
    assert_eq!(field, vec!["f_relay", "f_close"]);
}

#[test]
fn test_flow_names_are_exported() {
    let xml = export_bpmn(&simple_document(), "c").unwrap();
    assert_eq!(attr_of(&xml, "bpmn:sequenceFlow", "f3", "name").as_deref(), Some("Email"));
    assert_eq!(attr_of(&xml, "bpmn:sequenceFlow", "f1", "name"), None);
}

#[test]
fn test_missing_process_ref_is_rejected() {
    let doc = ProcessDocument::from_yaml(
        "pools:\n  p:\n    lanes: {l: L}\nelements:\n  - {id: a, name: A, type: userTask, lane: l}\n",
    )
    .unwrap();
    let err = export_bpmn(&doc, "c").unwrap_err();
    assert!(matches!(
        err,
        ExportError::Malformed(MalformedDocumentError::MissingField { ref field, .. }) if field == "processRef"
    ));
}

#[test]
fn test_element_in_undeclared_lane_is_rejected() {
    let mut doc = simple_document();
    doc.node_mut("done").unwrap().lane = "lane_ghost".to_string();
    let err = export_bpmn(&doc, "c").unwrap_err();
    assert!(err.to_string().contains("lane_ghost"));
}

#[test]
fn test_empty_layout_leaves_plane_empty() {
    let doc = simple_document();
    let xml = BpmnExporter::builder(&doc, "c")
        .with_layout(LayoutMode::Empty)
        .build()
        .export()
        .unwrap();
    assert_eq!(occurrences(&xml, "bpmndi:BPMNShape"), 0);
    assert!(xml.contains("<bpmndi:BPMNPlane id=\"BPMNPlane_1\" bpmnElement=\"Collaboration_c\"/>"));
}

#[test]
fn test_placeholder_layout_covers_pools_lanes_nodes_and_flows() {
    let doc = simple_document();
    let defs = BpmnExporter::builder(&doc, "c").build().to_definitions().unwrap();
    // 1 pool + 2 lanes + 5 nodes
    assert_eq!(defs.diagram.shapes.len(), 8);
    assert_eq!(defs.diagram.edges.len(), 4);

    let xml = export_bpmn(&doc, "c").unwrap();
    assert_eq!(
        attr_of(&xml, "bpmndi:BPMNShape", "gw_di", "bpmnElement").as_deref(),
        Some("gw")
    );
    assert_eq!(occurrences(&xml, "<di:waypoint"), 8);
}

#[test]
fn test_special_characters_are_escaped() {
    let mut doc = simple_document();
    doc.node_mut("task_x").unwrap().name = "Q&A <draft> \"v2\"".to_string();
    let xml = export_bpmn(&doc, "c").unwrap();
    assert_eq!(
        attr_of(&xml, "bpmn:userTask", "task_x", "name").as_deref(),
        Some("Q&A <draft> \"v2\"")
    );
}

#[test]
fn test_campaign_id_is_sanitized_for_collaboration() {
    let doc = simple_document();
    let exporter = BpmnExporter::builder(&doc, "Cycle 11/2025").build();
    assert_eq!(exporter.collaboration_id(), "Collaboration_Cycle_11_2025");
}
