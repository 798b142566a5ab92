use crate::geometry::Position;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form, node-type specific settings. Resize writes its dimensions here
/// (`noteWidth`, `tableHeight`, ...); configuration panels own the rest.
pub type Configuration = Map<String, Value>;

/// Which side of a node a port sits on. Edges always run output → input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    pub fn is_input(self) -> bool {
        matches!(self, PortDirection::Input)
    }

    pub fn from_is_input(is_input: bool) -> Self {
        if is_input {
            PortDirection::Input
        } else {
            PortDirection::Output
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        }
    }
}

/// A named attachment point on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePort {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl NodePort {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }
}

/// Input and output ports of a node. List order only drives visual stacking.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodePorts {
    #[serde(default)]
    pub inputs: Vec<NodePort>,
    #[serde(default)]
    pub outputs: Vec<NodePort>,
}

impl NodePorts {
    pub fn side(&self, direction: PortDirection) -> &[NodePort] {
        match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        }
    }

    /// Index of `port_id` within the given side, if present.
    pub fn index_of(&self, port_id: &str, direction: PortDirection) -> Option<usize> {
        self.side(direction).iter().position(|p| p.id == port_id)
    }
}

/// Coarse classification of nodes, used for geometry and resize defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Standard,
    Note,
    Table,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub ports: NodePorts,
    #[serde(default)]
    pub configuration: Configuration,
}

impl WorkflowNode {
    pub fn kind(&self) -> NodeKind {
        match self.node_type.as_str() {
            "note" => NodeKind::Note,
            "table" => NodeKind::Table,
            _ => NodeKind::Standard,
        }
    }

    pub fn has_port(&self, port_id: &str, direction: PortDirection) -> bool {
        self.ports.index_of(port_id, direction).is_some()
    }

    /// Reads a numeric configuration entry.
    pub fn config_number(&self, key: &str) -> Option<f64> {
        self.configuration.get(key).and_then(Value::as_f64)
    }
}

/// A directed connection from an output port to an input port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source_node_id: String,
    pub source_port_id: String,
    pub target_node_id: String,
    pub target_port_id: String,
}

impl WorkflowEdge {
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_node_id == node_id || self.target_node_id == node_id
    }
}

/// The identifying 4-tuple of an edge, independent of its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeEndpoints {
    pub source_node_id: String,
    pub source_port_id: String,
    pub target_node_id: String,
    pub target_port_id: String,
}

impl EdgeEndpoints {
    pub fn into_edge(self, id: String) -> WorkflowEdge {
        WorkflowEdge {
            id,
            source_node_id: self.source_node_id,
            source_port_id: self.source_port_id,
            target_node_id: self.target_node_id,
            target_port_id: self.target_port_id,
        }
    }

    pub fn matches(&self, edge: &WorkflowEdge) -> bool {
        self.source_node_id == edge.source_node_id
            && self.source_port_id == edge.source_port_id
            && self.target_node_id == edge.target_node_id
            && self.target_port_id == edge.target_port_id
    }
}

/// The aggregate root. Unknown top-level keys survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Palette entry used when dropping a new node onto the canvas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    #[serde(rename = "type", default)]
    pub node_type: String,
    pub name: String,
    #[serde(default)]
    pub ports: NodePorts,
    #[serde(default)]
    pub configuration: Configuration,
}

impl NodeTemplate {
    pub fn instantiate(&self, id: String, position: Position) -> WorkflowNode {
        WorkflowNode {
            id,
            node_type: self.node_type.clone(),
            name: self.name.clone(),
            position,
            ports: self.ports.clone(),
            configuration: self.configuration.clone(),
        }
    }
}
