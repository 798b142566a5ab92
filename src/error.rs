use crate::canvas::{GestureKind, ResizeKind};
use thiserror::Error;

/// Viewport values the transform cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewportError {
    #[error("Zoom factor must be finite and greater than zero, got {0}")]
    InvalidZoom(f64),

    #[error("Pan offset must be finite, got ({pan_x}, {pan_y})")]
    InvalidPan { pan_x: f64, pan_y: f64 },
}

/// Reasons a gesture could not be started. Nothing is mutated when one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    #[error("The canvas is read-only")]
    ReadOnly,

    #[error("The canvas is disabled")]
    Disabled,

    #[error("Cannot start a {requested} gesture while a {active} gesture is in progress")]
    Busy {
        active: GestureKind,
        requested: GestureKind,
    },

    #[error("Node '{0}' does not exist in the workflow")]
    NodeNotFound(String),

    #[error("Node '{node_id}' has no {direction} port '{port_id}'")]
    PortNotFound {
        node_id: String,
        port_id: String,
        direction: &'static str,
    },

    #[error("Node '{node_id}' cannot be resized as a {kind:?}")]
    NotResizable { node_id: String, kind: ResizeKind },
}

/// Why a completed connection gesture did not produce an edge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionRejection {
    #[error("Node '{node_id}' has no {direction} port '{port_id}'")]
    MissingPort {
        node_id: String,
        port_id: String,
        direction: &'static str,
    },

    #[error("Both ends of the connection are {0} ports")]
    SameDirection(&'static str),

    #[error("Node '{0}' cannot be connected to itself")]
    SelfLoop(String),

    #[error("An identical edge from '{source_node_id}' to '{target_node_id}' already exists")]
    Duplicate {
        source_node_id: String,
        target_node_id: String,
    },
}

/// Errors raised while loading or saving workflows.
#[derive(Error, Debug, Clone)]
pub enum WorkflowError {
    #[error("Failed to parse workflow JSON: {0}")]
    Parse(String),

    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Node id '{0}' is used more than once")]
    DuplicateNodeId(String),

    #[error("Edge id '{0}' is used more than once")]
    DuplicateEdgeId(String),
}
