//! Common test utilities for building process documents and rosters.
use campaign_planner::prelude::*;
use campaign_planner::session::DEFAULT_PROCESS;

/// One pool, two lanes, a linear flow with a decision.
///
/// `task_x` is the task the rename tests target.
#[allow(dead_code)]
pub const SIMPLE_PROCESS_YAML: &str = r#"
pools:
  pool_crm:
    name: CRM Campaign
    processRef: Process_Crm
    lanes:
      lane_plan: Planning
      lane_send: Dispatch
elements:
  - {id: start, name: Kickoff, type: startEvent, lane: lane_plan}
  - {id: task_x, name: Old Name, type: userTask, lane: lane_plan, content: 'Pick the channels'}
  - {id: gw, name: Channel?, type: exclusiveGateway, lane: lane_send}
  - {id: send_mail, name: Send Email, type: serviceTask, lane: lane_send}
  - {id: done, name: Done, type: endEvent, lane: lane_send}
flows:
  - {id: f1, source: start, target: task_x}
  - {id: f2, source: task_x, target: gw}
  - {id: f3, source: gw, target: send_mail, name: Email}
  - {id: f4, source: send_mail, target: done}
"#;

/// Two pools; `f_cross` goes from the first pool into the second.
#[allow(dead_code)]
pub const TWO_POOL_YAML: &str = r#"
pools:
  pool_brand:
    name: Brand
    processRef: Process_Brand
    lanes:
      lane_brand: Brand Team
  pool_field:
    name: Field
    processRef: Process_Field
    lanes:
      lane_leaders: Leaders
      lane_agents: Agents
elements:
  - {id: b_start, name: Brief, type: startEvent, lane: lane_brand}
  - {id: b_task, name: Approve Copy, type: userTask, lane: lane_brand}
  - {id: l_task, name: Relay Message, type: userTask, lane: lane_leaders}
  - {id: a_task, name: Contact Customers, type: manualTask, lane: lane_agents}
  - {id: a_end, name: Cycle Closed, type: endEvent, lane: lane_agents}
flows:
  - {id: f_brief, source: b_start, target: b_task}
  - {id: f_cross, source: b_task, target: l_task}
  - {id: f_relay, source: l_task, target: a_task}
  - {id: f_close, source: a_task, target: a_end}
"#;

#[allow(dead_code)]
pub fn simple_document() -> ProcessDocument {
    ProcessDocument::from_yaml(SIMPLE_PROCESS_YAML).expect("fixture parses")
}

#[allow(dead_code)]
pub fn default_document() -> ProcessDocument {
    ProcessDocument::from_yaml(DEFAULT_PROCESS).expect("built-in process parses")
}

/// A roster with one agent per sales value, regions and tiers cycling through fixed lists.
#[allow(dead_code)]
pub fn roster_with_sales(sales: &[f64]) -> Roster {
    let regions = ["North", "South", "Southeast"];
    let tiers = ["Gold", "Silver"];
    let mut csv = String::from("agent_id,region,tier,last_cycle_sales,engagement_rate\n");
    for (i, value) in sales.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            1000 + i,
            regions[i % regions.len()],
            tiers[i % tiers.len()],
            value,
            50 + i
        ));
    }
    Roster::from_csv_str(&csv).expect("fixture roster parses")
}

/// Counts non-overlapping occurrences of `needle`.
#[allow(dead_code)]
pub fn occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Every element of an XML document in document order, as `(qualified name, attributes)`.
#[allow(dead_code)]
pub fn xml_elements(xml: &str) -> Vec<(String, Vec<(String, String)>)> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                let attrs = e
                    .attributes()
                    .map(|a| {
                        let a = a.expect("valid attribute");
                        (
                            String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                            a.unescape_value().unwrap().into_owned(),
                        )
                    })
                    .collect();
                out.push((name, attrs));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

/// `(lane id, flowNodeRef texts)` for every `bpmn:lane`, in document order.
#[allow(dead_code)]
pub fn lane_refs(xml: &str) -> Vec<(String, Vec<String>)> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut lanes: Vec<(String, Vec<String>)> = Vec::new();
    let mut in_ref = false;
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"bpmn:lane" => {
                let id = e
                    .try_get_attribute("id")
                    .unwrap()
                    .expect("lane has an id")
                    .unescape_value()
                    .unwrap()
                    .into_owned();
                lanes.push((id, Vec::new()));
            }
            Event::Start(e) if e.name().as_ref() == b"bpmn:flowNodeRef" => in_ref = true,
            Event::End(e) if e.name().as_ref() == b"bpmn:flowNodeRef" => in_ref = false,
            Event::Text(t) if in_ref => {
                let text = t.unescape().unwrap().into_owned();
                if let Some((_, refs)) = lanes.last_mut() {
                    refs.push(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    lanes
}

/// The value of `attr` on the first element named `name` whose `id` is `id`.
#[allow(dead_code)]
pub fn attr_of(xml: &str, name: &str, id: &str, attr: &str) -> Option<String> {
    xml_elements(xml)
        .into_iter()
        .filter(|(n, _)| n == name)
        .find(|(_, attrs)| attrs.iter().any(|(k, v)| k == "id" && v == id))
        .and_then(|(_, attrs)| attrs.into_iter().find(|(k, _)| k == attr).map(|(_, v)| v))
}
