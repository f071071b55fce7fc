use super::layout::{LayoutMode, placeholder_layout};
use super::{
    Collaboration, Definitions, Diagram, FlowElement, Lane, Participant, Process, SequenceFlow,
    TARGET_NS, writer,
};
use crate::error::{ExportError, MalformedDocumentError};
use crate::process::ProcessDocument;
use ahash::AHashMap;
use tracing::{debug, info};

/// Maps a [`ProcessDocument`] onto BPMN 2.0 XML.
pub struct BpmnExporter<'a> {
    document: &'a ProcessDocument,
    campaign_id: String,
    layout: LayoutMode,
}

pub struct BpmnExporterBuilder<'a> {
    document: &'a ProcessDocument,
    campaign_id: String,
    layout: LayoutMode,
}

impl<'a> BpmnExporterBuilder<'a> {
    pub fn new(document: &'a ProcessDocument, campaign_id: impl Into<String>) -> Self {
        Self {
            document,
            campaign_id: campaign_id.into(),
            layout: LayoutMode::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    pub fn build(self) -> BpmnExporter<'a> {
        BpmnExporter {
            document: self.document,
            campaign_id: self.campaign_id,
            layout: self.layout,
        }
    }
}

impl<'a> BpmnExporter<'a> {
    pub fn builder(
        document: &'a ProcessDocument,
        campaign_id: impl Into<String>,
    ) -> BpmnExporterBuilder<'a> {
        BpmnExporterBuilder::new(document, campaign_id)
    }

    /// `Collaboration_<campaign>`, with characters that are not valid in an XML id replaced.
    pub fn collaboration_id(&self) -> String {
        format!("Collaboration_{}", sanitize_id(&self.campaign_id))
    }

    /// Builds the typed model without serializing it.
    ///
    /// Each sequence flow is written once, inside the process that owns its source element.
    pub fn to_definitions(&self) -> Result<Definitions, ExportError> {
        let doc = self.document;
        doc.check_exportable()?;

        let collaboration_id = self.collaboration_id();
        let mut participants = Vec::with_capacity(doc.pools.len());
        let mut processes = Vec::with_capacity(doc.pools.len());
        let mut process_of_node: AHashMap<&str, usize> = AHashMap::new();

        for (pool_id, pool) in &doc.pools {
            let process_ref = pool.process_ref.clone().ok_or_else(|| {
                MalformedDocumentError::MissingField {
                    pool_id: pool_id.clone(),
                    field: "processRef".to_string(),
                }
            })?;

            participants.push(Participant {
                id: pool_id.clone(),
                name: pool.display_name(pool_id).to_string(),
                process_ref: process_ref.clone(),
            });

            let lanes = pool
                .lanes()
                .map(|(lane_id, lane_name)| Lane {
                    id: lane_id.to_string(),
                    name: lane_name.to_string(),
                    flow_node_refs: doc.nodes_in_lane(lane_id).map(|n| n.id.clone()).collect(),
                })
                .collect();

            let elements = doc
                .nodes_in_pool(pool)
                .map(|node| {
                    process_of_node
                        .entry(node.id.as_str())
                        .or_insert(processes.len());
                    FlowElement {
                        tag: node.bpmn_tag().to_string(),
                        id: node.id.clone(),
                        name: node.name.clone(),
                        documentation: node.documentation().map(str::to_string),
                    }
                })
                .collect();

            processes.push(Process {
                id: process_ref,
                is_executable: true,
                lanes,
                elements,
                flows: Vec::new(),
            });
        }

        for flow in &doc.flows {
            let owner = process_of_node
                .get(flow.source.as_str())
                .copied()
                .unwrap_or(0);
            if let Some(process) = processes.get_mut(owner) {
                process.flows.push(SequenceFlow {
                    id: flow.id.clone(),
                    name: flow.label().map(str::to_string),
                    source_ref: flow.source.clone(),
                    target_ref: flow.target.clone(),
                });
            }
        }

        let (shapes, edges) = match self.layout {
            LayoutMode::Empty => (Vec::new(), Vec::new()),
            LayoutMode::Placeholder => placeholder_layout(doc),
        };
        debug!(
            shapes = shapes.len(),
            edges = edges.len(),
            layout = ?self.layout,
            "computed diagram layout"
        );

        Ok(Definitions {
            id: "Definitions_1".to_string(),
            target_namespace: TARGET_NS.to_string(),
            collaboration: Collaboration {
                id: collaboration_id.clone(),
                participants,
            },
            processes,
            diagram: Diagram {
                id: "BPMNDiagram_1".to_string(),
                plane_id: "BPMNPlane_1".to_string(),
                plane_element: collaboration_id,
                shapes,
                edges,
            },
        })
    }

    /// Produces the complete BPMN XML document.
    pub fn export(&self) -> Result<String, ExportError> {
        let definitions = self.to_definitions()?;
        let xml = writer::write_definitions(&definitions)?;
        info!(
            campaign = %self.campaign_id,
            processes = definitions.processes.len(),
            bytes = xml.len(),
            "exported BPMN diagram"
        );
        Ok(xml)
    }
}

/// Exports `document` with the default placeholder layout.
pub fn export_bpmn(document: &ProcessDocument, campaign_id: &str) -> Result<String, ExportError> {
    BpmnExporter::builder(document, campaign_id).build().export()
}

fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
