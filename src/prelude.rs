//! Prelude module for convenient imports
//!
//! Re-exports the types most embedders need: the canvas and its builder, the
//! host trait, the data model, geometry and errors.

// Canvas and gestures
pub use crate::canvas::{
    Canvas, CanvasBuilder, ConnectionState, ContextMenu, ContextTarget, Gesture, GestureKind,
    HitTarget, IdSet, MarqueeState, Modifiers, PointerButton, PointerEvent, PortRef, ResizeKind,
    Selection, Shortcut,
};

// Host contract
pub use crate::host::{CanvasHost, WorkflowHost};

// Data model
pub use crate::model::{
    EdgeEndpoints, IdGenerator, NodeKind, NodePort, NodePorts, NodeTemplate, PortDirection,
    Workflow, WorkflowEdge, WorkflowNode,
};

// Geometry
pub use crate::geometry::{ClientRect, NodeGeometry, Position, Rect, Size, Viewport, ZoomLimits};

// Configuration
pub use crate::config::CanvasConfig;

// Error types
pub use crate::error::{ConnectionRejection, GestureError, ViewportError, WorkflowError};
