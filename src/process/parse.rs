use super::ProcessDocument;
use crate::error::ParseError;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

impl ProcessDocument {
    /// Parses a process document from its YAML text.
    ///
    /// Only the syntax and the shape of the records are checked here; references between
    /// elements, lanes and flows are checked by [`ProcessDocument::validate`].
    pub fn from_yaml(text: &str) -> Result<Self, ParseError> {
        let document: ProcessDocument = serde_yaml::from_str(text)?;
        debug!(
            pools = document.pools.len(),
            elements = document.elements.len(),
            flows = document.flows.len(),
            "parsed process document"
        );
        Ok(document)
    }

    /// Loads a process document from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ParseError::new(format!("Could not read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&text)
    }

    /// Serializes the document back to YAML. Keys keep their declaration order.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl FromStr for ProcessDocument {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_yaml(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::NodeType;

    #[test]
    fn test_flow_style_and_block_style_agree() {
        let flow_style = "elements:\n  - {id: a, name: A, type: userTask, lane: l1}\n";
        let block_style = "elements:\n  - id: a\n    name: A\n    type: userTask\n    lane: l1\n";
        assert_eq!(
            ProcessDocument::from_yaml(flow_style).unwrap(),
            ProcessDocument::from_yaml(block_style).unwrap()
        );
    }

    #[test]
    fn test_unknown_type_is_kept_verbatim() {
        let doc =
            ProcessDocument::from_yaml("elements:\n  - {id: a, name: A, type: sendTask, lane: l}\n")
                .unwrap();
        assert_eq!(
            doc.elements[0].kind,
            Some(NodeType::Other("sendTask".to_string()))
        );
        assert!(doc.to_yaml().unwrap().contains("type: sendTask"));
    }

    #[test]
    fn test_syntax_error_carries_location() {
        let err = ProcessDocument::from_yaml("pools: [unclosed").unwrap_err();
        assert!(err.line.is_some());
    }
}
