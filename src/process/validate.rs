use super::ProcessDocument;
use crate::error::MalformedDocumentError;
use ahash::AHashSet;

impl ProcessDocument {
    /// Collects every structural problem of the document, in declaration order.
    pub fn diagnostics(&self) -> Vec<MalformedDocumentError> {
        let mut issues = self.export_diagnostics();

        let element_ids: AHashSet<&str> = self.elements.iter().map(|n| n.id.as_str()).collect();
        for flow in &self.flows {
            for (endpoint, node_id) in [("source", &flow.source), ("target", &flow.target)] {
                if !element_ids.contains(node_id.as_str()) {
                    issues.push(MalformedDocumentError::DanglingFlow {
                        flow_id: flow.id.clone(),
                        endpoint: endpoint.to_string(),
                        node_id: node_id.clone(),
                    });
                }
            }
        }

        issues
    }

    /// Fails with the first structural problem, if any.
    pub fn validate(&self) -> Result<(), MalformedDocumentError> {
        match self.diagnostics().into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }

    /// The subset of checks the BPMN export cannot do without: every pool carries
    /// `processRef` and `lanes`, every element sits in a declared lane, and no identifier is
    /// declared twice.
    pub fn check_exportable(&self) -> Result<(), MalformedDocumentError> {
        match self.export_diagnostics().into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }

    fn export_diagnostics(&self) -> Vec<MalformedDocumentError> {
        let mut issues = Vec::new();

        for (pool_id, pool) in &self.pools {
            if pool.process_ref.is_none() {
                issues.push(MalformedDocumentError::MissingField {
                    pool_id: pool_id.clone(),
                    field: "processRef".to_string(),
                });
            }
            if pool.lanes.is_none() {
                issues.push(MalformedDocumentError::MissingField {
                    pool_id: pool_id.clone(),
                    field: "lanes".to_string(),
                });
            }
        }

        for node in &self.elements {
            if self.lane_owner(&node.lane).is_none() {
                issues.push(MalformedDocumentError::UnknownLane {
                    element_id: node.id.clone(),
                    lane_id: node.lane.clone(),
                });
            }
        }

        let mut seen = AHashSet::new();
        for id in self.declared_ids() {
            if !seen.insert(id) {
                issues.push(MalformedDocumentError::DuplicateId(id.to_string()));
            }
        }

        issues
    }

    /// Every identifier the exported XML uses as an `id`: pools, process refs, lanes,
    /// elements and flows. They share one namespace.
    fn declared_ids(&self) -> impl Iterator<Item = &str> {
        let pools = self.pools.iter().flat_map(|(pool_id, pool)| {
            std::iter::once(pool_id.as_str())
                .chain(pool.process_ref.as_deref())
                .chain(pool.lanes().map(|(lane_id, _)| lane_id))
        });
        pools
            .chain(self.elements.iter().map(|n| n.id.as_str()))
            .chain(self.flows.iter().map(|f| f.id.as_str()))
    }
}
