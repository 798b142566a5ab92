//! Drag-to-connect protocol.
//!
//! A connection starts on any port and may end on any port of another node
//! with the opposite direction. However the user drags, the stored edge always
//! runs from an output to an input.

use super::{Canvas, Gesture, GestureKind, PointerEvent};
use crate::error::{ConnectionRejection, GestureError};
use crate::geometry::Position;
use crate::host::CanvasHost;
use crate::model::{EdgeEndpoints, PortDirection, Workflow};
use serde::Serialize;
use tracing::{debug, trace};

/// Transient state of a connect gesture. `mouse_x`/`mouse_y` are in canvas
/// space and follow the pointer; the origin never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    pub source_node_id: String,
    pub source_port_id: String,
    pub source_is_input: bool,
    pub mouse_x: f64,
    pub mouse_y: f64,
}

impl ConnectionState {
    pub fn source_direction(&self) -> PortDirection {
        PortDirection::from_is_input(self.source_is_input)
    }

    pub fn pointer(&self) -> Position {
        Position::new(self.mouse_x, self.mouse_y)
    }
}

/// Validates a release on `target` and orients the edge output → input.
///
/// Checks run in a fixed order: both ports exist, direction, self-loop,
/// duplicate.
pub fn resolve_connection(
    state: &ConnectionState,
    target_node_id: &str,
    target_port_id: &str,
    target_direction: PortDirection,
    workflow: &Workflow,
) -> Result<EdgeEndpoints, ConnectionRejection> {
    // The workflow may have changed under the gesture, so the origin is re-checked too.
    ensure_port(
        workflow,
        &state.source_node_id,
        &state.source_port_id,
        state.source_direction(),
    )?;
    ensure_port(workflow, target_node_id, target_port_id, target_direction)?;

    if target_direction == state.source_direction() {
        return Err(ConnectionRejection::SameDirection(
            state.source_direction().as_str(),
        ));
    }

    if target_node_id == state.source_node_id {
        return Err(ConnectionRejection::SelfLoop(target_node_id.to_string()));
    }

    // Dragging from an input swaps the roles.
    let endpoints = if state.source_is_input {
        EdgeEndpoints {
            source_node_id: target_node_id.to_string(),
            source_port_id: target_port_id.to_string(),
            target_node_id: state.source_node_id.clone(),
            target_port_id: state.source_port_id.clone(),
        }
    } else {
        EdgeEndpoints {
            source_node_id: state.source_node_id.clone(),
            source_port_id: state.source_port_id.clone(),
            target_node_id: target_node_id.to_string(),
            target_port_id: target_port_id.to_string(),
        }
    };

    if workflow.contains_connection(&endpoints) {
        return Err(ConnectionRejection::Duplicate {
            source_node_id: endpoints.source_node_id,
            target_node_id: endpoints.target_node_id,
        });
    }

    Ok(endpoints)
}

fn ensure_port(
    workflow: &Workflow,
    node_id: &str,
    port_id: &str,
    direction: PortDirection,
) -> Result<(), ConnectionRejection> {
    if workflow
        .node(node_id)
        .is_some_and(|node| node.has_port(port_id, direction))
    {
        Ok(())
    } else {
        Err(ConnectionRejection::MissingPort {
            node_id: node_id.to_string(),
            port_id: port_id.to_string(),
            direction: direction.as_str(),
        })
    }
}

impl<H: CanvasHost> Canvas<H> {
    pub fn connection_state(&self) -> Option<&ConnectionState> {
        match &self.gesture {
            Gesture::Connecting(state) => Some(state),
            _ => None,
        }
    }

    /// Begins dragging a new edge out of `port_id`.
    pub fn start_connection(
        &mut self,
        node_id: &str,
        port_id: &str,
        direction: PortDirection,
        event: &PointerEvent,
    ) -> Result<(), GestureError> {
        self.mutation_gate()?;
        self.ensure_idle(GestureKind::Connect)?;
        let node = self.find_node(node_id)?;
        if !node.has_port(port_id, direction) {
            return Err(GestureError::PortNotFound {
                node_id: node_id.to_string(),
                port_id: port_id.to_string(),
                direction: direction.as_str(),
            });
        }

        let pointer = self.to_canvas(event);
        self.gesture = Gesture::Connecting(ConnectionState {
            source_node_id: node_id.to_string(),
            source_port_id: port_id.to_string(),
            source_is_input: direction.is_input(),
            mouse_x: pointer.x,
            mouse_y: pointer.y,
        });
        debug!(node_id = %node_id, port_id = %port_id, ?direction, "connection started");
        self.host.request_update();
        Ok(())
    }

    /// Moves the loose end of the edge. Does nothing outside a connect gesture.
    pub fn update_connection_position(&mut self, event: &PointerEvent) {
        let pointer = self.to_canvas(event);
        let Gesture::Connecting(state) = &mut self.gesture else {
            return;
        };
        state.mouse_x = pointer.x;
        state.mouse_y = pointer.y;
        trace!(x = pointer.x, y = pointer.y, "connection moved");
        self.host.request_update();
    }

    /// Releases the connection on `port_id`. Returns `true` only when a new
    /// edge was added; the gesture ends either way.
    pub fn complete_connection(
        &mut self,
        node_id: &str,
        port_id: &str,
        direction: PortDirection,
    ) -> bool {
        let Gesture::Connecting(state) = std::mem::take(&mut self.gesture) else {
            return false;
        };

        let created = match resolve_connection(&state, node_id, port_id, direction, self.workflow())
        {
            Ok(endpoints) => {
                let id = self.ids.next_id("edge", self.host.workflow());
                debug!(
                    edge_id = %id,
                    source = %endpoints.source_node_id,
                    target = %endpoints.target_node_id,
                    "connection created"
                );
                let next = self.workflow().with_edge(endpoints.into_edge(id));
                self.commit(next);
                true
            }
            Err(reason) => {
                debug!(%reason, "connection rejected");
                false
            }
        };
        self.host.request_update();
        created
    }

    pub fn cancel_connection(&mut self) {
        if matches!(self.gesture, Gesture::Connecting(_)) {
            self.gesture = Gesture::Idle;
            debug!("connection cancelled");
            self.host.request_update();
        }
    }

    /// Canvas-space anchor of a port, following any live resize or drag.
    pub fn port_position(
        &self,
        node_id: &str,
        port_id: &str,
        direction: PortDirection,
    ) -> Option<Position> {
        let node = self.workflow().node(node_id)?;
        let bounds = self.live_bounds(node);
        self.config
            .geometry
            .port_position_in(&bounds, node, port_id, direction)
    }

    /// Endpoints of the rubber-band edge drawn while connecting: the origin
    /// port's anchor and the pointer.
    pub fn connection_preview(&self) -> Option<(Position, Position)> {
        let state = self.connection_state()?;
        let origin = self.port_position(
            &state.source_node_id,
            &state.source_port_id,
            state.source_direction(),
        )?;
        Some((origin, state.pointer()))
    }
}
