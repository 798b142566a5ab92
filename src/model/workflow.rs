use super::definition::{EdgeEndpoints, Workflow, WorkflowEdge, WorkflowNode};
use crate::error::WorkflowError;
use crate::geometry::Position;
use ahash::{AHashMap, AHashSet};
use serde_json::Value;
use std::fs;

impl Workflow {
    /// Parses a workflow from JSON and checks that node and edge ids are unique.
    ///
    /// Beyond id uniqueness the graph is accepted as-is: dangling edges, cycles
    /// and unknown ports are left for downstream consumers.
    pub fn from_json(json: &str) -> Result<Self, WorkflowError> {
        let workflow: Workflow =
            serde_json::from_str(json).map_err(|e| WorkflowError::Parse(e.to_string()))?;
        workflow.check_unique_ids()?;
        Ok(workflow)
    }

    pub fn from_file(path: &str) -> Result<Self, WorkflowError> {
        let content = fs::read_to_string(path).map_err(|e| WorkflowError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, WorkflowError> {
        serde_json::to_string_pretty(self).map_err(|e| WorkflowError::Parse(e.to_string()))
    }

    fn check_unique_ids(&self) -> Result<(), WorkflowError> {
        let mut seen = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(WorkflowError::DuplicateNodeId(node.id.clone()));
            }
        }
        let mut seen = AHashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !seen.insert(edge.id.as_str()) {
                return Err(WorkflowError::DuplicateEdgeId(edge.id.clone()));
            }
        }
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&WorkflowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Whether `id` is taken by any node or edge.
    pub fn contains_id(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id) || self.edges.iter().any(|e| e.id == id)
    }

    /// Whether an edge with exactly these endpoints already exists.
    pub fn contains_connection(&self, endpoints: &EdgeEndpoints) -> bool {
        self.edges.iter().any(|e| endpoints.matches(e))
    }

    // --- Copy-on-write transforms ---
    // Each returns a new workflow and leaves `self` untouched.

    pub fn with_edge(&self, edge: WorkflowEdge) -> Workflow {
        let mut next = self.clone();
        next.edges.push(edge);
        next
    }

    pub fn with_nodes(&self, nodes: impl IntoIterator<Item = WorkflowNode>) -> Workflow {
        let mut next = self.clone();
        next.nodes.extend(nodes);
        next
    }

    /// Removes the given nodes and edges, plus every edge that references a
    /// removed node, in one pass.
    pub fn without(&self, node_ids: &AHashSet<&str>, edge_ids: &AHashSet<&str>) -> Workflow {
        Workflow {
            name: self.name.clone(),
            nodes: self
                .nodes
                .iter()
                .filter(|n| !node_ids.contains(n.id.as_str()))
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| {
                    !edge_ids.contains(e.id.as_str())
                        && !node_ids.contains(e.source_node_id.as_str())
                        && !node_ids.contains(e.target_node_id.as_str())
                })
                .cloned()
                .collect(),
            extra: self.extra.clone(),
        }
    }

    /// Writes `entries` into the configuration of node `id`. Unknown ids yield
    /// an unchanged copy.
    pub fn with_configuration<'a>(
        &self,
        id: &str,
        entries: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Workflow {
        let mut next = self.clone();
        if let Some(node) = next.nodes.iter_mut().find(|n| n.id == id) {
            for (key, value) in entries {
                node.configuration.insert(key.to_string(), value);
            }
        }
        next
    }

    /// Moves nodes to new positions.
    pub fn with_positions(&self, positions: &AHashMap<String, Position>) -> Workflow {
        let mut next = self.clone();
        for node in next.nodes.iter_mut() {
            if let Some(position) = positions.get(&node.id) {
                node.position = *position;
            }
        }
        next
    }
}
