//! Property-based tests over generated process documents.
mod common;
use campaign_planner::prelude::*;
use common::*;
use indexmap::IndexMap;
use proptest::prelude::*;

const KINDS: &[&str] = &[
    "startEvent",
    "endEvent",
    "serviceTask",
    "userTask",
    "exclusiveGateway",
    "parallelGateway",
    "scriptTask",
    "mystery",
];

/// Documents with one pool, whose elements all sit in declared lanes and whose flows connect
/// declared elements.
fn arb_document() -> impl Strategy<Value = ProcessDocument> {
    (1usize..4, 0usize..12)
        .prop_flat_map(|(lanes, nodes)| {
            (
                Just(lanes),
                prop::collection::vec((0..lanes, 0..KINDS.len(), "[A-Za-z &<>\"']{0,12}"), nodes),
                prop::collection::vec((0..nodes.max(1), 0..nodes.max(1)), 0..=(nodes * 2)),
            )
        })
        .prop_map(|(lane_count, nodes, flows)| {
            let lanes: IndexMap<String, String> = (0..lane_count)
                .map(|i| (format!("lane_{}", i), format!("Lane {}", i)))
                .collect();
            let mut pools = IndexMap::new();
            pools.insert(
                "pool_gen".to_string(),
                Pool {
                    name: Some("Generated".to_string()),
                    process_ref: Some("Process_Gen".to_string()),
                    lanes: Some(lanes),
                },
            );
            let elements = nodes
                .iter()
                .enumerate()
                .map(|(i, (lane, kind, name))| Node {
                    id: format!("n{}", i),
                    name: name.clone(),
                    kind: Some(NodeType::from(KINDS[*kind])),
                    lane: format!("lane_{}", lane),
                    content: (i % 2 == 0).then(|| format!("note {}", name)),
                })
                .collect();
            let flows = flows
                .iter()
                .enumerate()
                .map(|(i, (s, t))| Flow {
                    id: format!("f{}", i),
                    source: format!("n{}", s),
                    target: format!("n{}", t),
                    name: None,
                })
                .collect();
            ProcessDocument {
                pools,
                elements,
                flows,
            }
        })
}

proptest! {
    #[test]
    fn test_export_is_deterministic_and_complete(doc in arb_document()) {
        let first = export_bpmn(&doc, "prop").unwrap();
        let second = export_bpmn(&doc, "prop").unwrap();
        prop_assert_eq!(&first, &second);

        prop_assert_eq!(occurrences(&first, "<bpmn:sequenceFlow"), doc.flows.len());
    }

    #[test]
    fn test_lanes_list_their_elements_in_order(doc in arb_document()) {
        let xml = export_bpmn(&doc, "prop").unwrap();
        for (lane_id, refs) in lane_refs(&xml) {
            let expected: Vec<String> = doc
                .nodes_in_lane(&lane_id)
                .map(|n| n.id.clone())
                .collect();
            prop_assert_eq!(refs, expected);
        }
    }

    #[test]
    fn test_yaml_round_trip_then_export_never_fails(doc in arb_document()) {
        let text = doc.to_yaml().unwrap();
        let reparsed = ProcessDocument::from_yaml(&text).unwrap();
        prop_assert_eq!(&reparsed, &doc);
        prop_assert!(export_bpmn(&reparsed, "prop").is_ok());
    }

    #[test]
    fn test_renderer_tolerates_dangling_flows(doc in arb_document(), ghost in "[a-z]{1,6}") {
        let mut doc = doc;
        doc.flows.push(Flow {
            id: "f_ghost".to_string(),
            source: format!("ghost_{}", ghost),
            target: "n0".to_string(),
            name: None,
        });
        let graph = render_graph(&doc, "prop", &RenderOptions::default());
        prop_assert_eq!(graph.edges.len(), doc.flows.len() - 1);
        prop_assert_eq!(graph.nodes().count(), doc.elements.len());
    }

    #[test]
    fn test_range_filter_matches_manual_count(
        sales in prop::collection::vec(0u32..1000, 0..30),
        lo in 0u32..1000,
        hi in 0u32..1000,
    ) {
        let values: Vec<f64> = sales.iter().map(|v| *v as f64).collect();
        let roster = roster_with_sales(&values);
        let audience = AudienceFilter::new()
            .between("last_cycle_sales", lo as f64, hi as f64)
            .apply(&roster)
            .unwrap();
        let expected = sales.iter().filter(|v| lo <= **v && **v <= hi).count();
        prop_assert_eq!(audience.count(), expected);
    }
}
