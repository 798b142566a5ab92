//! Common test utilities for building workflows and canvases.
use workflow_canvas::prelude::*;

/// Standard node with the given input and output port ids.
#[allow(dead_code)]
pub fn port_node(id: &str, x: f64, y: f64, inputs: &[&str], outputs: &[&str]) -> WorkflowNode {
    WorkflowNode {
        id: id.to_string(),
        node_type: "task".to_string(),
        name: format!("Node {}", id),
        position: Position::new(x, y),
        ports: NodePorts {
            inputs: inputs.iter().map(|p| NodePort::new(*p)).collect(),
            outputs: outputs.iter().map(|p| NodePort::new(*p)).collect(),
        },
        configuration: Default::default(),
    }
}

/// Portless node of the given type, e.g. `"note"` or `"table"`.
#[allow(dead_code)]
pub fn typed_node(id: &str, node_type: &str, x: f64, y: f64) -> WorkflowNode {
    WorkflowNode {
        id: id.to_string(),
        node_type: node_type.to_string(),
        name: format!("Node {}", id),
        position: Position::new(x, y),
        ports: NodePorts::default(),
        configuration: Default::default(),
    }
}

#[allow(dead_code)]
pub fn edge(id: &str, source: &str, source_port: &str, target: &str, target_port: &str) -> WorkflowEdge {
    WorkflowEdge {
        id: id.to_string(),
        source_node_id: source.to_string(),
        source_port_id: source_port.to_string(),
        target_node_id: target.to_string(),
        target_port_id: target_port.to_string(),
    }
}

/// `A` (output `o1`) at (0,0) and `B` (input `i1`) at (300,0), no edges.
///
/// With the default geometry `A.o1` sits at (200,40) and `B.i1` at (300,40).
#[allow(dead_code)]
pub fn create_pair_workflow() -> Workflow {
    Workflow {
        name: "pair".to_string(),
        nodes: vec![
            port_node("A", 0.0, 0.0, &[], &["o1"]),
            port_node("B", 300.0, 0.0, &["i1"], &[]),
        ],
        ..Workflow::default()
    }
}

/// Chain `A -> B -> C` laid out left to right, 300 units apart.
#[allow(dead_code)]
pub fn create_chain_workflow() -> Workflow {
    Workflow {
        name: "chain".to_string(),
        nodes: vec![
            port_node("A", 0.0, 0.0, &[], &["o1"]),
            port_node("B", 300.0, 0.0, &["i1"], &["o1"]),
            port_node("C", 600.0, 0.0, &["i1"], &[]),
        ],
        edges: vec![
            edge("e1", "A", "o1", "B", "i1"),
            edge("e2", "B", "o1", "C", "i1"),
        ],
        ..Workflow::default()
    }
}

/// Canvas over `workflow` with an identity viewport at the client origin.
#[allow(dead_code)]
pub fn create_canvas(workflow: Workflow) -> Canvas<WorkflowHost> {
    Canvas::builder(WorkflowHost::new(workflow))
        .bounds(ClientRect::new(0.0, 0.0, 1280.0, 720.0))
        .build()
        .expect("default viewport is valid")
}

#[allow(dead_code)]
pub fn create_readonly_canvas(workflow: Workflow) -> Canvas<WorkflowHost> {
    Canvas::builder(WorkflowHost::new(workflow))
        .bounds(ClientRect::new(0.0, 0.0, 1280.0, 720.0))
        .readonly(true)
        .build()
        .expect("default viewport is valid")
}

#[allow(dead_code)]
pub fn create_zoomed_canvas(workflow: Workflow, zoom: f64) -> Canvas<WorkflowHost> {
    Canvas::builder(WorkflowHost::new(workflow))
        .bounds(ClientRect::new(0.0, 0.0, 1280.0, 720.0))
        .viewport(Viewport::new(0.0, 0.0, zoom).expect("valid zoom"))
        .build()
        .expect("valid viewport")
}

/// Primary-button pointer event at a client position.
#[allow(dead_code)]
pub fn at(x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(x, y)
}

/// Node ids of a selection, in order.
#[allow(dead_code)]
pub fn selected_nodes(canvas: &Canvas<WorkflowHost>) -> Vec<String> {
    canvas.selection().nodes().iter().cloned().collect()
}

#[allow(dead_code)]
pub fn selected_edges(canvas: &Canvas<WorkflowHost>) -> Vec<String> {
    canvas.selection().edges().iter().cloned().collect()
}
