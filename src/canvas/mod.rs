//! The canvas coordinator.
//!
//! [`Canvas`] owns the view state (viewport, selection, the active gesture) and
//! a [`CanvasHost`] that owns the workflow. Each controller lives in its own
//! submodule as an `impl` block on `Canvas`; this module wires pointer events to
//! them.

use crate::config::CanvasConfig;
use crate::error::{GestureError, ViewportError};
use crate::geometry::{ClientRect, Position, Rect, Viewport};
use crate::host::CanvasHost;
use crate::model::{IdGenerator, PortDirection, Workflow, WorkflowNode};
use tracing::debug;

pub mod connection;
mod gesture;
pub mod marquee;
pub mod navigate;
pub mod resize;
pub mod selection;

pub use connection::{ConnectionState, resolve_connection};
pub use gesture::{
    Gesture, GestureKind, HitTarget, Modifiers, PointerButton, PointerEvent, PortRef, Shortcut,
};
pub use marquee::MarqueeState;
pub use navigate::{DragSession, PanSession};
pub use resize::{ResizeKind, ResizeSession};
pub use selection::{ContextMenu, ContextTarget, IdSet, Selection};

pub struct Canvas<H: CanvasHost> {
    host: H,
    config: CanvasConfig,
    viewport: Viewport,
    bounds: ClientRect,
    selection: Selection,
    context_menu: Option<ContextMenu>,
    gesture: Gesture,
    ids: IdGenerator,
    readonly: bool,
    disabled: bool,
}

pub struct CanvasBuilder<H: CanvasHost> {
    host: H,
    config: CanvasConfig,
    viewport: Viewport,
    bounds: ClientRect,
    ids: IdGenerator,
    readonly: bool,
    disabled: bool,
}

impl<H: CanvasHost> CanvasBuilder<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: CanvasConfig::default(),
            viewport: Viewport::default(),
            bounds: ClientRect::default(),
            ids: IdGenerator::new(),
            readonly: false,
            disabled: false,
        }
    }

    pub fn config(mut self, config: CanvasConfig) -> Self {
        self.config = config;
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn bounds(mut self, bounds: ClientRect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Fails if the viewport would make the transform divide by zero.
    pub fn build(self) -> Result<Canvas<H>, ViewportError> {
        self.viewport.validate()?;
        Ok(Canvas {
            host: self.host,
            config: self.config,
            viewport: self.viewport,
            bounds: self.bounds,
            selection: Selection::default(),
            context_menu: None,
            gesture: Gesture::Idle,
            ids: self.ids,
            readonly: self.readonly,
            disabled: self.disabled,
        })
    }
}

impl<H: CanvasHost> Canvas<H> {
    pub fn builder(host: H) -> CanvasBuilder<H> {
        CanvasBuilder::new(host)
    }

    // --- Accessors ---

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn workflow(&self) -> &Workflow {
        self.host.workflow()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), ViewportError> {
        viewport.validate()?;
        self.viewport = viewport;
        self.host.request_update();
        Ok(())
    }

    pub fn bounds(&self) -> &ClientRect {
        &self.bounds
    }

    /// Updates the canvas element's client rectangle after a scroll or resize.
    pub fn set_bounds(&mut self, bounds: ClientRect) {
        self.bounds = bounds;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Converts an event's client coordinates into canvas space.
    pub fn to_canvas(&self, event: &PointerEvent) -> Position {
        self.viewport
            .client_to_canvas(&self.bounds, event.client_x, event.client_y)
    }

    // --- Shared guards ---

    /// Structural edits are refused on read-only or disabled canvases.
    pub(crate) fn mutation_gate(&self) -> Result<(), GestureError> {
        if self.readonly {
            return Err(GestureError::ReadOnly);
        }
        if self.disabled {
            return Err(GestureError::Disabled);
        }
        Ok(())
    }

    pub(crate) fn ensure_idle(&self, requested: GestureKind) -> Result<(), GestureError> {
        match self.gesture.kind() {
            Some(active) => Err(GestureError::Busy { active, requested }),
            None => Ok(()),
        }
    }

    pub(crate) fn find_node(&self, node_id: &str) -> Result<&WorkflowNode, GestureError> {
        self.workflow()
            .node(node_id)
            .ok_or_else(|| GestureError::NodeNotFound(node_id.to_string()))
    }

    /// Hands a new workflow to the host and announces the change.
    pub(crate) fn commit(&mut self, next: Workflow) {
        self.host.set_workflow(next);
        self.host.dispatch_workflow_changed();
    }

    // --- Live geometry ---

    /// Node bounds including any in-flight resize or drag.
    pub fn live_bounds(&self, node: &WorkflowNode) -> Rect {
        let position = self.node_position(&node.id).unwrap_or(node.position);
        let size = self
            .node_size(&node.id)
            .unwrap_or_else(|| self.config.geometry.size_of(node));
        Rect::new(position, size)
    }

    /// Square handle in the bottom-right corner of notes and tables.
    fn resize_handle(&self, node: &WorkflowNode) -> Option<(Rect, ResizeKind)> {
        let kind = ResizeKind::for_node(node.kind())?;
        let bounds = self.live_bounds(node);
        let size = self.config.resize_handle_size;
        let handle = Rect {
            x: bounds.right() - size,
            y: bounds.bottom() - size,
            width: size,
            height: size,
        };
        Some((handle, kind))
    }

    /// Nearest port within `port_hit_radius` of the pointer.
    pub fn port_at(&self, event: &PointerEvent) -> Option<PortRef> {
        let point = self.to_canvas(event);
        let radius = self.config.port_hit_radius;
        let mut best: Option<(f64, PortRef)> = None;

        for node in &self.workflow().nodes {
            let bounds = self.live_bounds(node);
            for direction in [PortDirection::Input, PortDirection::Output] {
                for port in node.ports.side(direction) {
                    let Some(anchor) =
                        self.config
                            .geometry
                            .port_position_in(&bounds, node, &port.id, direction)
                    else {
                        continue;
                    };
                    let distance = (anchor.x - point.x).hypot(anchor.y - point.y);
                    if distance <= radius && best.as_ref().is_none_or(|(d, _)| distance < *d) {
                        best = Some((
                            distance,
                            PortRef {
                                node_id: node.id.clone(),
                                port_id: port.id.clone(),
                                direction,
                            },
                        ));
                    }
                }
            }
        }
        best.map(|(_, port)| port)
    }

    /// Resolves what is under the pointer. Ports win over resize handles, which
    /// win over node bodies; later nodes are drawn on top and are tested first.
    pub fn hit_test(&self, event: &PointerEvent) -> HitTarget {
        if let Some(port) = self.port_at(event) {
            return HitTarget::Port(port);
        }
        let point = self.to_canvas(event);
        for node in self.workflow().nodes.iter().rev() {
            if let Some((handle, kind)) = self.resize_handle(node) {
                if handle.contains(point) {
                    return HitTarget::ResizeHandle {
                        node_id: node.id.clone(),
                        kind,
                    };
                }
            }
            if self.live_bounds(node).contains(point) {
                return HitTarget::Node(node.id.clone());
            }
        }
        HitTarget::Empty
    }

    // --- Pointer routing ---

    /// Starts whichever gesture the pointer-down location calls for.
    ///
    /// Middle button pans, secondary button opens the context menu, primary
    /// button connects, resizes, drags or starts a marquee depending on the
    /// hit target.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Result<HitTarget, GestureError> {
        let target = self.hit_test(event);
        match event.button {
            PointerButton::Middle => {
                self.start_pan(event)?;
                return Ok(target);
            }
            PointerButton::Secondary => {
                let context = match &target {
                    HitTarget::Node(id) | HitTarget::ResizeHandle { node_id: id, .. } => {
                        ContextTarget::Node(id.clone())
                    }
                    HitTarget::Port(port) => ContextTarget::Node(port.node_id.clone()),
                    HitTarget::Empty => ContextTarget::Canvas,
                };
                self.open_context_menu(context, event);
                return Ok(target);
            }
            PointerButton::Primary => {}
        }

        match &target {
            HitTarget::Port(port) => {
                self.start_connection(&port.node_id, &port.port_id, port.direction, event)?;
            }
            HitTarget::ResizeHandle { node_id, kind } => {
                self.start_resize(node_id, *kind, event)?;
            }
            HitTarget::Node(node_id) => {
                if event.modifiers.additive() {
                    self.toggle_node_selection(node_id);
                } else if self.mutation_gate().is_ok() {
                    self.start_node_drag(node_id, event)?;
                } else if !self.selection.contains_node(node_id) {
                    self.select_node(node_id, false);
                }
            }
            HitTarget::Empty => {
                let additive = event.modifiers.additive();
                if self.mutation_gate().is_ok() {
                    self.start_selection(event, additive)?;
                } else if !additive {
                    // No marquee on a locked canvas, but a click still deselects.
                    self.clear_selection();
                }
            }
        }
        Ok(target)
    }

    /// Feeds a pointer move to the active gesture, wherever the pointer is.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        match self.gesture.kind() {
            Some(GestureKind::Connect) => self.update_connection_position(event),
            Some(GestureKind::Marquee) => self.update_selection(event),
            Some(GestureKind::Resize) => self.update_resize(event),
            Some(GestureKind::NodeDrag) => self.update_node_drag(event),
            Some(GestureKind::Pan) => self.update_pan(event),
            None => {}
        }
    }

    /// Ends the active gesture. A connection released over a port is
    /// completed; released anywhere else it is cancelled.
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        match self.gesture.kind() {
            Some(GestureKind::Connect) => {
                self.update_connection_position(event);
                match self.port_at(event) {
                    Some(port) => {
                        self.complete_connection(&port.node_id, &port.port_id, port.direction);
                    }
                    None => self.cancel_connection(),
                }
            }
            Some(GestureKind::Marquee) => {
                self.update_selection(event);
                self.end_selection();
            }
            Some(GestureKind::Resize) => {
                self.update_resize(event);
                self.end_resize();
            }
            Some(GestureKind::NodeDrag) => {
                self.update_node_drag(event);
                self.end_node_drag();
            }
            Some(GestureKind::Pan) => {
                self.update_pan(event);
                self.end_pan();
            }
            None => {}
        }
    }

    /// Abandons the active gesture without committing anything.
    pub fn cancel_gesture(&mut self) {
        match self.gesture.kind() {
            Some(GestureKind::Connect) => self.cancel_connection(),
            Some(GestureKind::Marquee) => self.cancel_selection(),
            Some(GestureKind::Resize) => self.cancel_resize(),
            Some(GestureKind::NodeDrag) => self.cancel_node_drag(),
            Some(GestureKind::Pan) => self.end_pan(),
            None => {}
        }
    }

    /// Ends the active gesture ahead of a structural edit. Gesture state
    /// refers to ids that the edit may remove.
    pub(crate) fn interrupt_gesture(&mut self, command: &'static str) {
        if let Some(kind) = self.gesture.kind() {
            debug!(gesture = %kind, command, "gesture interrupted");
            self.cancel_gesture();
        }
    }

    /// Teardown hook: no gesture may outlive the component.
    pub fn host_disconnected(&mut self) {
        if let Some(kind) = self.gesture.kind() {
            debug!(gesture = %kind, "host disconnected, stopping gesture");
        }
        self.cancel_gesture();
        self.context_menu = None;
    }

    /// Runs a keyboard command. Returns whether it did anything.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> bool {
        match shortcut {
            Shortcut::Delete => self.delete_selected(),
            Shortcut::SelectAll => {
                self.select_all();
                true
            }
            Shortcut::Duplicate => !self.duplicate_selected().is_empty(),
            Shortcut::OpenConfig => self.open_config_for_selected().is_some(),
            Shortcut::Escape => {
                let active = !self.gesture.is_idle() || self.context_menu.is_some();
                self.cancel_gesture();
                self.close_context_menu();
                active
            }
        }
    }
}
