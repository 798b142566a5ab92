use super::{Position, Rect, Size};
use crate::model::{NodeKind, PortDirection, WorkflowNode};
use serde::{Deserialize, Serialize};

/// Size settings for a resizable node kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindGeometry {
    /// Configuration keys holding the current width and height.
    pub width_key: String,
    pub height_key: String,
    /// Used when the configuration carries no size yet.
    pub default_size: Size,
    /// Resizing never shrinks the node below this.
    pub min_size: Size,
}

impl KindGeometry {
    pub fn note() -> Self {
        Self {
            width_key: "noteWidth".to_string(),
            height_key: "noteHeight".to_string(),
            default_size: Size::new(200.0, 100.0),
            min_size: Size::new(100.0, 50.0),
        }
    }

    pub fn table() -> Self {
        Self {
            width_key: "tableWidth".to_string(),
            height_key: "tableHeight".to_string(),
            default_size: Size::new(320.0, 200.0),
            min_size: Size::new(200.0, 120.0),
        }
    }

    /// Current size stored in `node.configuration`, falling back per axis.
    pub fn configured_size(&self, node: &WorkflowNode) -> Size {
        Size {
            width: node
                .config_number(&self.width_key)
                .unwrap_or(self.default_size.width),
            height: node
                .config_number(&self.height_key)
                .unwrap_or(self.default_size.height),
        }
    }
}

/// The single source of node dimensions for hit testing, marquee overlap and
/// port placement. Whatever draws the nodes must agree with this table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeGeometry {
    pub standard_size: Size,
    pub note: KindGeometry,
    pub table: KindGeometry,
}

impl Default for NodeGeometry {
    fn default() -> Self {
        Self {
            standard_size: Size::new(200.0, 80.0),
            note: KindGeometry::note(),
            table: KindGeometry::table(),
        }
    }
}

impl NodeGeometry {
    /// Resize settings for `kind`; standard nodes have none.
    pub fn kind(&self, kind: NodeKind) -> Option<&KindGeometry> {
        match kind {
            NodeKind::Standard => None,
            NodeKind::Note => Some(&self.note),
            NodeKind::Table => Some(&self.table),
        }
    }

    pub fn size_of(&self, node: &WorkflowNode) -> Size {
        match self.kind(node.kind()) {
            Some(kind) => kind.configured_size(node),
            None => self.standard_size,
        }
    }

    /// Bounding box anchored at the node's position.
    pub fn bounds(&self, node: &WorkflowNode) -> Rect {
        Rect::new(node.position, self.size_of(node))
    }

    /// Anchor of a port: inputs on the left edge, outputs on the right edge,
    /// spread evenly along the node's height.
    pub fn port_position(
        &self,
        node: &WorkflowNode,
        port_id: &str,
        direction: PortDirection,
    ) -> Option<Position> {
        self.port_position_in(&self.bounds(node), node, port_id, direction)
    }

    /// Same as [`NodeGeometry::port_position`] for explicit node bounds, e.g.
    /// while a live resize or drag is in progress.
    pub fn port_position_in(
        &self,
        bounds: &Rect,
        node: &WorkflowNode,
        port_id: &str,
        direction: PortDirection,
    ) -> Option<Position> {
        let index = node.ports.index_of(port_id, direction)?;
        let count = node.ports.side(direction).len();
        let x = match direction {
            PortDirection::Input => bounds.x,
            PortDirection::Output => bounds.right(),
        };
        let spacing = bounds.height / (count + 1) as f64;
        Some(Position::new(x, bounds.y + spacing * (index + 1) as f64))
    }
}
