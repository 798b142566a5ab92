//! Node and edge selection, plus the commands that act on it.

use super::{Canvas, PointerEvent};
use crate::error::GestureError;
use crate::geometry::Position;
use crate::host::CanvasHost;
use crate::model::{NodeTemplate, Workflow, WorkflowNode};
use ahash::AHashSet;
use indexmap::IndexSet;
use tracing::debug;

/// Insertion-ordered id set. Order matters: the first selected node is the one
/// `open_config_for_selected` acts on.
pub type IdSet = IndexSet<String, ahash::RandomState>;

/// Selected node and edge ids.
///
/// `revision` increases on every mutation so hosts can cheaply detect change.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    nodes: IdSet,
    edges: IdSet,
    revision: u64,
}

impl Selection {
    pub fn nodes(&self) -> &IdSet {
        &self.nodes
    }

    pub fn edges(&self) -> &IdSet {
        &self.edges
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// First selected node in insertion order.
    pub fn first_node(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes = IdSet::default();
        self.edges = IdSet::default();
        self.revision += 1;
    }

    pub(crate) fn insert_node(&mut self, id: &str) {
        self.nodes.insert(id.to_string());
        self.revision += 1;
    }

    pub(crate) fn insert_edge(&mut self, id: &str) {
        self.edges.insert(id.to_string());
        self.revision += 1;
    }

    /// Flips membership. Removal keeps the order of the remaining ids.
    pub(crate) fn toggle_node(&mut self, id: &str) {
        if !self.nodes.shift_remove(id) {
            self.nodes.insert(id.to_string());
        }
        self.revision += 1;
    }

    pub(crate) fn toggle_edge(&mut self, id: &str) {
        if !self.edges.shift_remove(id) {
            self.edges.insert(id.to_string());
        }
        self.revision += 1;
    }

    pub(crate) fn replace(&mut self, nodes: IdSet, edges: IdSet) {
        self.nodes = nodes;
        self.edges = edges;
        self.revision += 1;
    }

    pub(crate) fn extend(&mut self, nodes: IdSet, edges: IdSet) {
        self.nodes.extend(nodes);
        self.edges.extend(edges);
        self.revision += 1;
    }

    /// Drops ids that no longer exist in `workflow`.
    pub(crate) fn retain_existing(&mut self, workflow: &Workflow) {
        let node_count = self.nodes.len();
        let edge_count = self.edges.len();
        self.nodes.retain(|id| workflow.node(id).is_some());
        self.edges.retain(|id| workflow.edge(id).is_some());
        if self.nodes.len() != node_count || self.edges.len() != edge_count {
            self.revision += 1;
        }
    }
}

/// What a context menu was opened on.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextTarget {
    Canvas,
    Node(String),
    Edge(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    /// Canvas-space anchor of the menu.
    pub position: Position,
    pub target: ContextTarget,
}

impl<H: CanvasHost> Canvas<H> {
    /// Selects a node. Without `additive` everything else is deselected first
    /// and any open context menu is closed.
    pub fn select_node(&mut self, id: &str, additive: bool) {
        if !additive {
            self.selection.clear();
            self.context_menu = None;
        }
        self.selection.insert_node(id);
        self.host.request_update();
    }

    pub fn toggle_node_selection(&mut self, id: &str) {
        self.selection.toggle_node(id);
        self.host.request_update();
    }

    pub fn select_edge(&mut self, id: &str, additive: bool) {
        if !additive {
            self.selection.clear();
            self.context_menu = None;
        }
        self.selection.insert_edge(id);
        self.host.request_update();
    }

    pub fn toggle_edge_selection(&mut self, id: &str) {
        self.selection.toggle_edge(id);
        self.host.request_update();
    }

    pub fn select_all(&mut self) {
        let workflow = self.host.workflow();
        let nodes: IdSet = workflow.nodes.iter().map(|n| n.id.clone()).collect();
        let edges: IdSet = workflow.edges.iter().map(|e| e.id.clone()).collect();
        self.selection.replace(nodes, edges);
        self.host.request_update();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.context_menu = None;
        self.host.request_update();
    }

    /// Removes one edge. Returns whether anything was removed.
    pub fn delete_edge(&mut self, id: &str) -> bool {
        if let Err(reason) = self.mutation_gate() {
            debug!(%reason, edge_id = %id, "delete edge ignored");
            return false;
        }
        if self.workflow().edge(id).is_none() {
            return false;
        }

        self.interrupt_gesture("delete edge");
        let edge_ids: AHashSet<&str> = [id].into_iter().collect();
        let next = self.workflow().without(&AHashSet::new(), &edge_ids);
        self.commit(next);
        self.selection.retain_existing(self.host.workflow());
        debug!(edge_id = %id, "edge deleted");
        self.host.request_update();
        true
    }

    /// Deletes every selected node and edge. Edges attached to a deleted node
    /// go too, whether or not they were selected.
    pub fn delete_selected(&mut self) -> bool {
        if let Err(reason) = self.mutation_gate() {
            debug!(%reason, "delete selection ignored");
            return false;
        }
        if self.selection.is_empty() {
            return false;
        }
        self.interrupt_gesture("delete selection");

        let next = {
            let node_ids: AHashSet<&str> =
                self.selection.nodes().iter().map(String::as_str).collect();
            let edge_ids: AHashSet<&str> =
                self.selection.edges().iter().map(String::as_str).collect();
            self.workflow().without(&node_ids, &edge_ids)
        };
        let removed_nodes = self.workflow().nodes.len() - next.nodes.len();
        let removed_edges = self.workflow().edges.len() - next.edges.len();

        self.commit(next);
        self.selection.clear();
        self.context_menu = None;
        debug!(removed_nodes, removed_edges, "selection deleted");
        self.host.request_update();
        true
    }

    /// Copies every selected node next to its original and selects the copies.
    /// Returns the new node ids in selection order.
    pub fn duplicate_selected(&mut self) -> Vec<String> {
        if let Err(reason) = self.mutation_gate() {
            debug!(%reason, "duplicate ignored");
            return Vec::new();
        }

        let (dx, dy) = self.config.duplicate_offset;
        let workflow = self.host.workflow();
        let originals: Vec<&WorkflowNode> = self
            .selection
            .nodes()
            .iter()
            .filter_map(|id| workflow.node(id))
            .collect();
        if originals.is_empty() {
            return Vec::new();
        }

        let ids = self.ids.next_ids("node", originals.len(), workflow);
        let copies: Vec<WorkflowNode> = originals
            .iter()
            .zip(&ids)
            .map(|(original, id)| WorkflowNode {
                id: id.clone(),
                node_type: original.node_type.clone(),
                name: format!("{} (copy)", original.name),
                position: original.position.offset(dx, dy),
                ports: original.ports.clone(),
                configuration: original.configuration.clone(),
            })
            .collect();

        let next = workflow.with_nodes(copies);
        self.interrupt_gesture("duplicate");
        self.commit(next);
        self.selection
            .replace(ids.iter().cloned().collect(), IdSet::default());
        debug!(count = ids.len(), "selection duplicated");
        self.host.request_update();
        ids
    }

    /// Opens the configuration panel of the first selected node.
    pub fn open_config_for_selected(&mut self) -> Option<String> {
        let id = self.selection.first_node()?.to_string();
        self.workflow().node(&id)?;
        self.host.open_node_config(&id);
        Some(id)
    }

    pub fn open_context_menu(&mut self, target: ContextTarget, event: &PointerEvent) {
        let position = self.to_canvas(event);
        match &target {
            ContextTarget::Node(id) if !self.selection.contains_node(id) => {
                self.selection.clear();
                self.selection.insert_node(id);
            }
            ContextTarget::Edge(id) if !self.selection.contains_edge(id) => {
                self.selection.clear();
                self.selection.insert_edge(id);
            }
            _ => {}
        }
        self.context_menu = Some(ContextMenu { position, target });
        self.host.request_update();
    }

    pub fn close_context_menu(&mut self) {
        if self.context_menu.take().is_some() {
            self.host.request_update();
        }
    }

    /// Drops a new node from `template` at the pointer and selects it.
    pub fn add_node(
        &mut self,
        template: &NodeTemplate,
        event: &PointerEvent,
    ) -> Result<String, GestureError> {
        self.mutation_gate()?;
        let position = self.to_canvas(event);
        let id = self.ids.next_id("node", self.host.workflow());
        let next = self
            .workflow()
            .with_nodes([template.instantiate(id.clone(), position)]);
        self.commit(next);
        self.select_node(&id, false);
        debug!(node_id = %id, node_type = %template.node_type, "node added");
        Ok(id)
    }
}
