use super::ProcessDocument;
use crate::error::ConversionError;

/// A trait for custom process descriptions that can be converted into a [`ProcessDocument`].
///
/// This is the extension point for feeding formats other than the YAML document into the
/// exporter and the renderer. The crate ships one implementation, the line-based
/// [`Outline`](crate::outline::Outline).
///
/// # Example
///
/// ```rust
/// use campaign_planner::error::ConversionError;
/// use campaign_planner::process::{Flow, IntoProcess, Node, NodeType, Pool, ProcessDocument};
/// use indexmap::IndexMap;
///
/// struct Checklist {
///     steps: Vec<String>,
/// }
///
/// impl IntoProcess for Checklist {
///     fn into_process(self) -> Result<ProcessDocument, ConversionError> {
///         if self.steps.is_empty() {
///             return Err(ConversionError::ValidationError("no steps".to_string()));
///         }
///         let mut lanes = IndexMap::new();
///         lanes.insert("lane_main".to_string(), "Main".to_string());
///         let mut pools = IndexMap::new();
///         pools.insert(
///             "pool_main".to_string(),
///             Pool {
///                 name: Some("Checklist".to_string()),
///                 process_ref: Some("Process_Checklist".to_string()),
///                 lanes: Some(lanes),
///             },
///         );
///
///         let elements: Vec<Node> = self
///             .steps
///             .iter()
///             .enumerate()
///             .map(|(i, step)| Node {
///                 id: format!("step_{}", i),
///                 name: step.clone(),
///                 kind: Some(NodeType::UserTask),
///                 lane: "lane_main".to_string(),
///                 content: None,
///             })
///             .collect();
///         let flows = elements
///             .windows(2)
///             .enumerate()
///             .map(|(i, pair)| Flow {
///                 id: format!("flow_{}", i),
///                 source: pair[0].id.clone(),
///                 target: pair[1].id.clone(),
///                 name: None,
///             })
///             .collect();
///
///         Ok(ProcessDocument { pools, elements, flows })
///     }
/// }
///
/// let doc = Checklist { steps: vec!["Brief".into(), "Send".into()] }
///     .into_process()
///     .unwrap();
/// assert_eq!(doc.flows.len(), 1);
/// ```
pub trait IntoProcess {
    /// Consumes the object and converts it into a process document.
    fn into_process(self) -> Result<ProcessDocument, ConversionError>;
}

impl IntoProcess for ProcessDocument {
    fn into_process(self) -> Result<ProcessDocument, ConversionError> {
        Ok(self)
    }
}
