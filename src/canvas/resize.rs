//! Drag-resize for free-form nodes (notes and tables).
//!
//! While the pointer moves, the new size lives only in the session and is
//! visible through [`Canvas::node_size`]. The workflow is replaced once, on
//! release.

use super::{Canvas, Gesture, GestureKind, PointerEvent};
use crate::error::GestureError;
use crate::geometry::{KindGeometry, Size};
use crate::host::CanvasHost;
use crate::model::NodeKind;
use serde_json::Value;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeKind {
    Note,
    Table,
}

impl ResizeKind {
    /// Resize mode for a node kind. Standard nodes have a fixed size.
    pub fn for_node(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Note => Some(ResizeKind::Note),
            NodeKind::Table => Some(ResizeKind::Table),
            NodeKind::Standard => None,
        }
    }
}

/// A resize in progress. `start_*` are captured at pointer-down and never
/// change; `current` is the live size.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub node_id: String,
    pub kind: ResizeKind,
    pub start_x: f64,
    pub start_y: f64,
    pub start_width: f64,
    pub start_height: f64,
    pub current: Size,
}

impl<H: CanvasHost> Canvas<H> {
    fn kind_geometry(&self, kind: ResizeKind) -> &KindGeometry {
        match kind {
            ResizeKind::Note => &self.config.geometry.note,
            ResizeKind::Table => &self.config.geometry.table,
        }
    }

    pub fn resize_session(&self) -> Option<&ResizeSession> {
        match &self.gesture {
            Gesture::Resizing(session) => Some(session),
            _ => None,
        }
    }

    pub fn start_note_resize(
        &mut self,
        node_id: &str,
        event: &PointerEvent,
    ) -> Result<(), GestureError> {
        self.start_resize(node_id, ResizeKind::Note, event)
    }

    pub fn start_table_resize(
        &mut self,
        node_id: &str,
        event: &PointerEvent,
    ) -> Result<(), GestureError> {
        self.start_resize(node_id, ResizeKind::Table, event)
    }

    pub fn start_resize(
        &mut self,
        node_id: &str,
        kind: ResizeKind,
        event: &PointerEvent,
    ) -> Result<(), GestureError> {
        self.mutation_gate()?;
        self.ensure_idle(GestureKind::Resize)?;
        let node = self.find_node(node_id)?;
        if ResizeKind::for_node(node.kind()) != Some(kind) {
            return Err(GestureError::NotResizable {
                node_id: node_id.to_string(),
                kind,
            });
        }
        let start = self.kind_geometry(kind).configured_size(node);

        self.gesture = Gesture::Resizing(ResizeSession {
            node_id: node_id.to_string(),
            kind,
            start_x: event.client_x,
            start_y: event.client_y,
            start_width: start.width,
            start_height: start.height,
            current: start,
        });
        debug!(node_id = %node_id, ?kind, width = start.width, height = start.height, "resize started");
        Ok(())
    }

    /// Applies a pointer move. Deltas are divided by zoom so the edge tracks
    /// the pointer at any zoom level; the result never drops below the kind's
    /// minimum size.
    pub fn update_resize(&mut self, event: &PointerEvent) {
        let zoom = self.viewport.zoom;
        let Gesture::Resizing(session) = &self.gesture else {
            return;
        };
        let min = self.kind_geometry(session.kind).min_size;
        let delta_x = (event.client_x - session.start_x) / zoom;
        let delta_y = (event.client_y - session.start_y) / zoom;
        let size = Size::new(
            session.start_width + delta_x,
            session.start_height + delta_y,
        )
        .max(min);

        if let Gesture::Resizing(session) = &mut self.gesture {
            session.current = size;
        }
        trace!(width = size.width, height = size.height, "resize moved");
        self.host.request_update();
    }

    /// Writes the final size into the node's configuration in one commit.
    pub fn end_resize(&mut self) -> bool {
        let Gesture::Resizing(session) = std::mem::take(&mut self.gesture) else {
            return false;
        };
        if self.workflow().node(&session.node_id).is_none() {
            debug!(node_id = %session.node_id, "resized node disappeared, dropping resize");
            self.host.request_update();
            return false;
        }

        let kind = self.kind_geometry(session.kind);
        let entries = [
            (kind.width_key.as_str(), Value::from(session.current.width)),
            (kind.height_key.as_str(), Value::from(session.current.height)),
        ];
        let next = self.workflow().with_configuration(&session.node_id, entries);
        self.commit(next);
        debug!(
            node_id = %session.node_id,
            width = session.current.width,
            height = session.current.height,
            "resize committed"
        );
        self.host.request_update();
        true
    }

    /// Abandons the resize; the node keeps its committed size.
    pub fn cancel_resize(&mut self) {
        if matches!(self.gesture, Gesture::Resizing(_)) {
            self.gesture = Gesture::Idle;
            debug!("resize cancelled");
            self.host.request_update();
        }
    }

    /// Size of a node as it should be drawn right now.
    pub fn node_size(&self, node_id: &str) -> Option<Size> {
        if let Gesture::Resizing(session) = &self.gesture {
            if session.node_id == node_id {
                return Some(session.current);
            }
        }
        let node = self.workflow().node(node_id)?;
        Some(self.config.geometry.size_of(node))
    }
}
