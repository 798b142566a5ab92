//! Rectangular drag-select.

use super::{Canvas, Gesture, GestureKind, IdSet, PointerEvent};
use crate::error::GestureError;
use crate::geometry::{NodeGeometry, Position, Rect};
use crate::host::CanvasHost;
use crate::model::{Workflow, WorkflowNode};
use tracing::{debug, trace};

/// Corners of the marquee in canvas space, in drag order.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeState {
    pub start_x: f64,
    pub start_y: f64,
    pub current_x: f64,
    pub current_y: f64,
    /// Whether the result is merged into the prior selection.
    pub additive: bool,
}

impl MarqueeState {
    /// Normalized rectangle; never has negative extents.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(
            Position::new(self.start_x, self.start_y),
            Position::new(self.current_x, self.current_y),
        )
    }
}

pub fn node_intersects_rect(geometry: &NodeGeometry, node: &WorkflowNode, rect: &Rect) -> bool {
    geometry.bounds(node).intersects(rect)
}

/// Ids of every node whose bounds overlap `rect`, in workflow order.
pub fn nodes_in_rect(workflow: &Workflow, geometry: &NodeGeometry, rect: &Rect) -> IdSet {
    workflow
        .nodes
        .iter()
        .filter(|node| node_intersects_rect(geometry, node, rect))
        .map(|node| node.id.clone())
        .collect()
}

/// Edges whose source and target are both in `nodes`. Geometric overlap with
/// the edge's path plays no part.
pub fn edges_within(workflow: &Workflow, nodes: &IdSet) -> IdSet {
    workflow
        .edges
        .iter()
        .filter(|edge| {
            nodes.contains(edge.source_node_id.as_str())
                && nodes.contains(edge.target_node_id.as_str())
        })
        .map(|edge| edge.id.clone())
        .collect()
}

impl<H: CanvasHost> Canvas<H> {
    pub fn marquee_state(&self) -> Option<&MarqueeState> {
        match &self.gesture {
            Gesture::Marquee(state) => Some(state),
            _ => None,
        }
    }

    /// Opens a marquee at the pointer. A non-additive marquee clears the
    /// selection right away, even if the pointer never moves.
    pub fn start_selection(
        &mut self,
        event: &PointerEvent,
        additive: bool,
    ) -> Result<(), GestureError> {
        self.mutation_gate()?;
        self.ensure_idle(GestureKind::Marquee)?;

        if !additive {
            self.selection.clear();
        }
        self.context_menu = None;

        let start = self.to_canvas(event);
        self.gesture = Gesture::Marquee(MarqueeState {
            start_x: start.x,
            start_y: start.y,
            current_x: start.x,
            current_y: start.y,
            additive,
        });
        debug!(x = start.x, y = start.y, additive, "marquee started");
        self.host.request_update();
        Ok(())
    }

    pub fn update_selection(&mut self, event: &PointerEvent) {
        let current = self.to_canvas(event);
        let Gesture::Marquee(state) = &mut self.gesture else {
            return;
        };
        state.current_x = current.x;
        state.current_y = current.y;
        trace!(x = current.x, y = current.y, "marquee moved");
        self.host.request_update();
    }

    /// Nodes and edges the marquee would select if released now.
    pub fn marquee_preview(&self) -> Option<(IdSet, IdSet)> {
        let state = self.marquee_state()?;
        let nodes = nodes_in_rect(self.workflow(), &self.config.geometry, &state.rect());
        let edges = edges_within(self.workflow(), &nodes);
        Some((nodes, edges))
    }

    /// Applies the marquee to the selection and closes it.
    pub fn end_selection(&mut self) {
        let Gesture::Marquee(state) = std::mem::take(&mut self.gesture) else {
            return;
        };

        let rect = state.rect();
        let nodes = nodes_in_rect(self.workflow(), &self.config.geometry, &rect);
        let edges = edges_within(self.workflow(), &nodes);
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            additive = state.additive,
            "marquee finished"
        );

        if state.additive {
            self.selection.extend(nodes, edges);
        } else {
            self.selection.replace(nodes, edges);
        }
        self.host.request_update();
    }

    /// Closes the marquee without touching the selection.
    pub fn cancel_selection(&mut self) {
        if matches!(self.gesture, Gesture::Marquee(_)) {
            self.gesture = Gesture::Idle;
            debug!("marquee cancelled");
            self.host.request_update();
        }
    }
}
