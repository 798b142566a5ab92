//! Moving things around: node drag, panning, zoom and fit-to-content.

use super::{Canvas, Gesture, GestureKind, PointerEvent};
use crate::error::GestureError;
use crate::geometry::{Position, Rect, Viewport};
use crate::host::CanvasHost;
use ahash::AHashMap;
use tracing::{debug, trace};

/// Nodes being dragged together with their positions at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub origins: AHashMap<String, Position>,
    pub start_x: f64,
    pub start_y: f64,
    /// Current offset in canvas units.
    pub delta_x: f64,
    pub delta_y: f64,
}

impl DragSession {
    pub fn moved(&self) -> bool {
        self.delta_x != 0.0 || self.delta_y != 0.0
    }

    fn positions(&self) -> AHashMap<String, Position> {
        self.origins
            .iter()
            .map(|(id, origin)| (id.clone(), origin.offset(self.delta_x, self.delta_y)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanSession {
    pub start_x: f64,
    pub start_y: f64,
    pub origin: Viewport,
}

impl<H: CanvasHost> Canvas<H> {
    /// Starts moving `node_id` together with the rest of the selection. An
    /// unselected node becomes the only selected one first.
    pub fn start_node_drag(
        &mut self,
        node_id: &str,
        event: &PointerEvent,
    ) -> Result<(), GestureError> {
        self.mutation_gate()?;
        self.ensure_idle(GestureKind::NodeDrag)?;
        self.find_node(node_id)?;

        if !self.selection.contains_node(node_id) {
            self.select_node(node_id, false);
        }

        let workflow = self.host.workflow();
        let origins: AHashMap<String, Position> = self
            .selection
            .nodes()
            .iter()
            .filter_map(|id| workflow.node(id))
            .map(|node| (node.id.clone(), node.position))
            .collect();

        debug!(node_id = %node_id, count = origins.len(), "node drag started");
        self.gesture = Gesture::DraggingNodes(DragSession {
            origins,
            start_x: event.client_x,
            start_y: event.client_y,
            delta_x: 0.0,
            delta_y: 0.0,
        });
        Ok(())
    }

    pub fn update_node_drag(&mut self, event: &PointerEvent) {
        let zoom = self.viewport.zoom;
        let Gesture::DraggingNodes(session) = &mut self.gesture else {
            return;
        };
        session.delta_x = (event.client_x - session.start_x) / zoom;
        session.delta_y = (event.client_y - session.start_y) / zoom;
        trace!(dx = session.delta_x, dy = session.delta_y, "node drag moved");
        self.host.request_update();
    }

    /// Commits the new positions. A click without movement commits nothing.
    pub fn end_node_drag(&mut self) -> bool {
        let Gesture::DraggingNodes(session) = std::mem::take(&mut self.gesture) else {
            return false;
        };
        if !session.moved() {
            return false;
        }

        let next = self.workflow().with_positions(&session.positions());
        self.commit(next);
        debug!(
            count = session.origins.len(),
            dx = session.delta_x,
            dy = session.delta_y,
            "node drag committed"
        );
        self.host.request_update();
        true
    }

    pub fn cancel_node_drag(&mut self) {
        if matches!(self.gesture, Gesture::DraggingNodes(_)) {
            self.gesture = Gesture::Idle;
            debug!("node drag cancelled");
            self.host.request_update();
        }
    }

    /// Position of a node as it should be drawn right now.
    pub fn node_position(&self, node_id: &str) -> Option<Position> {
        if let Gesture::DraggingNodes(session) = &self.gesture {
            if let Some(origin) = session.origins.get(node_id) {
                return Some(origin.offset(session.delta_x, session.delta_y));
            }
        }
        self.workflow().node(node_id).map(|n| n.position)
    }

    /// Starts panning. Allowed on read-only canvases.
    pub fn start_pan(&mut self, event: &PointerEvent) -> Result<(), GestureError> {
        self.ensure_idle(GestureKind::Pan)?;
        self.gesture = Gesture::Panning(PanSession {
            start_x: event.client_x,
            start_y: event.client_y,
            origin: self.viewport,
        });
        debug!("pan started");
        Ok(())
    }

    pub fn update_pan(&mut self, event: &PointerEvent) {
        let Gesture::Panning(session) = &self.gesture else {
            return;
        };
        self.viewport = session.origin.panned_by(
            event.client_x - session.start_x,
            event.client_y - session.start_y,
        );
        self.host.request_update();
    }

    pub fn end_pan(&mut self) {
        if matches!(self.gesture, Gesture::Panning(_)) {
            self.gesture = Gesture::Idle;
            debug!(pan_x = self.viewport.pan_x, pan_y = self.viewport.pan_y, "pan finished");
        }
    }

    /// Multiplies the zoom by `factor`, keeping the point under the pointer
    /// fixed. Non-positive factors are ignored.
    pub fn zoom_at(&mut self, event: &PointerEvent, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let next = self.viewport.zoomed_about(
            &self.bounds,
            event.client_x,
            event.client_y,
            self.viewport.zoom * factor,
            &self.config.zoom_limits,
        );
        if next != self.viewport {
            self.viewport = next;
            trace!(zoom = next.zoom, "zoomed");
            self.host.request_update();
        }
    }

    /// Frames every node inside the canvas. Returns false for an empty
    /// workflow or a canvas too small to fit anything.
    pub fn fit_to_content(&mut self) -> bool {
        let geometry = &self.config.geometry;
        let Some(content) = Rect::bounding(self.workflow().nodes.iter().map(|n| geometry.bounds(n)))
        else {
            return false;
        };
        let Some(next) = Viewport::fit_to(
            &content,
            &self.bounds,
            self.config.fit_padding,
            &self.config.zoom_limits,
        ) else {
            return false;
        };
        self.viewport = next;
        debug!(zoom = next.zoom, "fit to content");
        self.host.request_update();
        true
    }
}
