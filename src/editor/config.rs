use crate::error::ConfigError;
use crate::graph::Size;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for a `WorkflowEditor`. Every field has a default, so a config
/// file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo snapshots kept.
    pub history_capacity: usize,
    pub node_width: f64,
    pub node_height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    /// Margin kept around the nodes by `fit_to_screen`, in canvas units.
    pub fit_padding: f64,
    /// `fit_to_screen` never zooms in further than this.
    pub max_fit_scale: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            node_width: 220.0,
            node_height: 100.0,
            min_zoom: 0.3,
            max_zoom: 3.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            fit_padding: 50.0,
            max_fit_scale: 2.0,
        }
    }
}

impl EditorConfig {
    pub fn node_size(&self) -> Size {
        Size {
            width: self.node_width,
            height: self.node_height,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
