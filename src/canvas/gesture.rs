use super::connection::ConnectionState;
use super::marquee::MarqueeState;
use super::navigate::{DragSession, PanSession};
use super::resize::{ResizeKind, ResizeSession};
use crate::model::PortDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        meta: false,
    };

    /// Any of the modifiers that extend a selection instead of replacing it.
    pub fn additive(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A pointer event in client space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    #[serde(default)]
    pub button: PointerButton,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// A port addressed by node, id and side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRef {
    pub node_id: String,
    pub port_id: String,
    pub direction: PortDirection,
}

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    Port(PortRef),
    ResizeHandle { node_id: String, kind: ResizeKind },
    Node(String),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Connect,
    Marquee,
    Resize,
    NodeDrag,
    Pan,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GestureKind::Connect => "connect",
            GestureKind::Marquee => "marquee",
            GestureKind::Resize => "resize",
            GestureKind::NodeDrag => "node drag",
            GestureKind::Pan => "pan",
        };
        f.write_str(name)
    }
}

/// The one pointer gesture currently in progress.
///
/// Keeping every transient state in a single slot means a second gesture can
/// only begin once the first has committed or been cancelled.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Connecting(ConnectionState),
    Marquee(MarqueeState),
    Resizing(ResizeSession),
    DraggingNodes(DragSession),
    Panning(PanSession),
}

impl Gesture {
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Gesture::Idle => None,
            Gesture::Connecting(_) => Some(GestureKind::Connect),
            Gesture::Marquee(_) => Some(GestureKind::Marquee),
            Gesture::Resizing(_) => Some(GestureKind::Resize),
            Gesture::DraggingNodes(_) => Some(GestureKind::NodeDrag),
            Gesture::Panning(_) => Some(GestureKind::Pan),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// Keyboard commands understood by [`Canvas::handle_shortcut`](super::Canvas::handle_shortcut).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shortcut {
    Delete,
    SelectAll,
    Duplicate,
    OpenConfig,
    Escape,
}
