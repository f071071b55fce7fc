//! Planner settings, loadable from a YAML file. Every field has a default, so a config file
//! only needs the keys it changes.
//!
//! ```yaml
//! campaign_id: Ekos_Cycle_12
//! columns:
//!   sales: last_cycle_sales
//! render:
//!   gateway_markers: false
//! export:
//!   layout: empty
//! ```

use crate::audience::RosterColumns;
use crate::bpmn::LayoutMode;
use crate::error::ConfigError;
use crate::graph::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub campaign_id: String,
    pub columns: RosterColumns,
    pub render: RenderOptions,
    pub export: ExportOptions,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            campaign_id: "Ekos_Cycle_11".to_string(),
            columns: RosterColumns::default(),
            render: RenderOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub layout: LayoutMode,
    pub bpmn_file_name: String,
    pub audience_file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            layout: LayoutMode::default(),
            bpmn_file_name: "crm_process.bpmn".to_string(),
            audience_file_name: "target_audience.csv".to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| ConfigError::Yaml(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&text)
    }
}
