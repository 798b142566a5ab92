use crate::error::WorkflowError;
use crate::geometry::{NodeGeometry, ZoomLimits};
use serde::{Deserialize, Serialize};
use std::fs;

/// Tunables for a [`Canvas`](crate::canvas::Canvas). Every field has a default,
/// so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub geometry: NodeGeometry,
    pub zoom_limits: ZoomLimits,
    /// Offset of duplicated nodes from their originals, in canvas units.
    pub duplicate_offset: (f64, f64),
    /// How close (canvas units) a release must be to a port to hit it.
    pub port_hit_radius: f64,
    /// Edge length of the square resize handle at a node's bottom-right corner.
    pub resize_handle_size: f64,
    /// Client-space margin kept around content by fit-to-content.
    pub fit_padding: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            geometry: NodeGeometry::default(),
            zoom_limits: ZoomLimits::default(),
            duplicate_offset: (40.0, 40.0),
            port_hit_radius: 10.0,
            resize_handle_size: 12.0,
            fit_padding: 40.0,
        }
    }
}

impl CanvasConfig {
    pub fn from_json(json: &str) -> Result<Self, WorkflowError> {
        serde_json::from_str(json).map_err(|e| WorkflowError::Parse(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, WorkflowError> {
        let content = fs::read_to_string(path).map_err(|e| WorkflowError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
