//! Tests for the drag-to-connect protocol.
mod common;
use common::*;
use tracing_test::traced_test;
use workflow_canvas::canvas::resolve_connection;
use workflow_canvas::prelude::*;

fn edge_tuple(edge: &WorkflowEdge) -> (&str, &str, &str, &str) {
    (
        edge.source_node_id.as_str(),
        edge.source_port_id.as_str(),
        edge.target_node_id.as_str(),
        edge.target_port_id.as_str(),
    )
}

#[test]
fn test_output_to_input_creates_edge() {
    let mut canvas = create_canvas(create_pair_workflow());

    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
        .expect("connection should start");
    canvas.update_connection_position(&at(280.0, 40.0));

    let state = canvas.connection_state().expect("connection in progress");
    assert_eq!(state.source_node_id, "A");
    assert_eq!(state.source_port_id, "o1");
    assert!(!state.source_is_input);
    assert_eq!((state.mouse_x, state.mouse_y), (280.0, 40.0));

    assert!(canvas.complete_connection("B", "i1", PortDirection::Input));

    let edges = &canvas.workflow().edges;
    assert_eq!(edges.len(), 1);
    assert_eq!(edge_tuple(&edges[0]), ("A", "o1", "B", "i1"));
    assert_eq!(edges[0].id, "edge_1");
    assert!(canvas.connection_state().is_none());
    assert!(canvas.gesture().is_idle());
    assert_eq!(canvas.host().commits, 1);
    assert_eq!(canvas.host().changes, 1);
}

#[test]
fn test_dragging_from_input_still_stores_output_to_input() {
    let mut canvas = create_canvas(create_pair_workflow());

    canvas
        .start_connection("B", "i1", PortDirection::Input, &at(300.0, 40.0))
        .expect("connection should start");
    assert!(canvas.connection_state().expect("in progress").source_is_input);

    assert!(canvas.complete_connection("A", "o1", PortDirection::Output));

    let edges = &canvas.workflow().edges;
    assert_eq!(edges.len(), 1);
    assert_eq!(edge_tuple(&edges[0]), ("A", "o1", "B", "i1"));
}

#[test]
fn test_same_direction_is_rejected() {
    let mut canvas = create_canvas(create_chain_workflow());

    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
        .expect("connection should start");
    assert!(!canvas.complete_connection("B", "o1", PortDirection::Output));

    assert_eq!(canvas.workflow().edges.len(), 2);
    assert!(canvas.gesture().is_idle());
    assert_eq!(canvas.host().commits, 0);
}

#[test]
fn test_self_loop_is_rejected() {
    let mut canvas = create_canvas(create_chain_workflow());

    canvas
        .start_connection("B", "o1", PortDirection::Output, &at(500.0, 40.0))
        .expect("connection should start");
    assert!(!canvas.complete_connection("B", "i1", PortDirection::Input));

    assert_eq!(canvas.workflow().edges.len(), 2);
    assert!(canvas.connection_state().is_none());
    assert_eq!(canvas.host().commits, 0);
}

#[test]
fn test_duplicate_edge_is_suppressed() {
    let mut canvas = create_canvas(create_pair_workflow());

    for _ in 0..2 {
        canvas
            .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
            .expect("connection should start");
        canvas.complete_connection("B", "i1", PortDirection::Input);
    }
    // Same tuple approached from the input side.
    canvas
        .start_connection("B", "i1", PortDirection::Input, &at(300.0, 40.0))
        .expect("connection should start");
    assert!(!canvas.complete_connection("A", "o1", PortDirection::Output));

    assert_eq!(canvas.workflow().edges.len(), 1);
    assert_eq!(canvas.host().commits, 1);
}

#[test]
fn test_resolve_checks_direction_before_self_loop() {
    let mut workflow = create_chain_workflow();
    workflow.nodes.push(port_node("D", 900.0, 0.0, &["i1"], &[]));
    let state = ConnectionState {
        source_node_id: "B".to_string(),
        source_port_id: "o1".to_string(),
        source_is_input: false,
        mouse_x: 0.0,
        mouse_y: 0.0,
    };

    assert_eq!(
        resolve_connection(&state, "B", "o1", PortDirection::Output, &workflow),
        Err(ConnectionRejection::SameDirection("output"))
    );
    assert_eq!(
        resolve_connection(&state, "B", "i1", PortDirection::Input, &workflow),
        Err(ConnectionRejection::SelfLoop("B".to_string()))
    );
    assert_eq!(
        resolve_connection(&state, "C", "i1", PortDirection::Input, &workflow),
        Err(ConnectionRejection::Duplicate {
            source_node_id: "B".to_string(),
            target_node_id: "C".to_string(),
        })
    );

    let endpoints = resolve_connection(&state, "D", "i1", PortDirection::Input, &workflow)
        .expect("new connection");
    assert_eq!(endpoints.source_node_id, "B");
    assert_eq!(endpoints.target_node_id, "D");
    assert_eq!(endpoints.target_port_id, "i1");
}

#[test]
fn test_resolve_requires_existing_ports() {
    let workflow = create_chain_workflow();
    let state = ConnectionState {
        source_node_id: "A".to_string(),
        source_port_id: "o1".to_string(),
        source_is_input: false,
        mouse_x: 0.0,
        mouse_y: 0.0,
    };

    assert_eq!(
        resolve_connection(&state, "ghost", "nope", PortDirection::Input, &workflow),
        Err(ConnectionRejection::MissingPort {
            node_id: "ghost".to_string(),
            port_id: "nope".to_string(),
            direction: "input",
        })
    );
    // A has no inputs at all.
    assert_eq!(
        resolve_connection(&state, "A", "i1", PortDirection::Input, &workflow),
        Err(ConnectionRejection::MissingPort {
            node_id: "A".to_string(),
            port_id: "i1".to_string(),
            direction: "input",
        })
    );

    let orphan = ConnectionState {
        source_node_id: "gone".to_string(),
        ..state
    };
    assert_eq!(
        resolve_connection(&orphan, "C", "i1", PortDirection::Input, &workflow),
        Err(ConnectionRejection::MissingPort {
            node_id: "gone".to_string(),
            port_id: "o1".to_string(),
            direction: "output",
        })
    );
}

#[traced_test]
#[test]
fn test_release_on_unknown_port_creates_nothing() {
    let mut canvas = create_canvas(create_pair_workflow());

    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
        .expect("connection should start");
    assert!(!canvas.complete_connection("ghost", "nope", PortDirection::Input));
    assert!(canvas.gesture().is_idle());

    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
        .expect("connection should start");
    assert!(!canvas.complete_connection("B", "nope", PortDirection::Input));

    assert!(canvas.workflow().edges.is_empty());
    assert!(canvas.gesture().is_idle());
    assert_eq!(canvas.host().commits, 0);
    assert!(logs_contain("has no input port 'nope'"));
}

#[test]
fn test_deleting_the_origin_node_ends_the_connection() {
    let mut canvas = create_canvas(create_pair_workflow());

    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
        .expect("connection should start");
    canvas.select_node("A", false);
    assert!(canvas.handle_shortcut(Shortcut::Delete));

    assert!(canvas.gesture().is_idle());
    assert!(canvas.workflow().node("A").is_none());
    assert!(!canvas.complete_connection("B", "i1", PortDirection::Input));
    assert!(canvas.workflow().edges.is_empty());
    assert_eq!(canvas.host().commits, 1);
}

#[test]
fn test_update_and_complete_without_gesture_are_noops() {
    let mut canvas = create_canvas(create_pair_workflow());

    canvas.update_connection_position(&at(50.0, 50.0));
    assert!(canvas.connection_state().is_none());
    assert_eq!(canvas.host().updates, 0);

    assert!(!canvas.complete_connection("B", "i1", PortDirection::Input));
    assert!(canvas.workflow().edges.is_empty());
    assert_eq!(canvas.host().commits, 0);
}

#[test]
fn test_cancel_connection_discards_state() {
    let mut canvas = create_canvas(create_pair_workflow());
    let before = canvas.workflow().clone();

    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
        .expect("connection should start");
    canvas.cancel_connection();

    assert!(canvas.connection_state().is_none());
    assert_eq!(canvas.workflow(), &before);

    // Cancelling twice is harmless.
    canvas.cancel_connection();
    assert!(canvas.gesture().is_idle());
}

#[test]
fn test_start_connection_refusals() {
    let mut readonly = create_readonly_canvas(create_pair_workflow());
    assert_eq!(
        readonly.start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0)),
        Err(GestureError::ReadOnly)
    );
    assert!(readonly.connection_state().is_none());

    let mut canvas = create_canvas(create_pair_workflow());
    canvas.set_disabled(true);
    assert_eq!(
        canvas.start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0)),
        Err(GestureError::Disabled)
    );
    canvas.set_disabled(false);

    assert_eq!(
        canvas.start_connection("Z", "o1", PortDirection::Output, &at(0.0, 0.0)),
        Err(GestureError::NodeNotFound("Z".to_string()))
    );
    assert_eq!(
        canvas.start_connection("A", "o1", PortDirection::Input, &at(0.0, 0.0)),
        Err(GestureError::PortNotFound {
            node_id: "A".to_string(),
            port_id: "o1".to_string(),
            direction: "input",
        })
    );
    assert!(canvas.gesture().is_idle());
}

#[test]
fn test_second_gesture_is_refused_while_connecting() {
    let mut canvas = create_canvas(create_pair_workflow());
    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
        .expect("connection should start");

    assert_eq!(
        canvas.start_selection(&at(600.0, 400.0), false),
        Err(GestureError::Busy {
            active: GestureKind::Connect,
            requested: GestureKind::Marquee,
        })
    );
    assert_eq!(
        canvas.start_connection("B", "i1", PortDirection::Input, &at(300.0, 40.0)),
        Err(GestureError::Busy {
            active: GestureKind::Connect,
            requested: GestureKind::Connect,
        })
    );
    // The original gesture is untouched.
    assert_eq!(
        canvas.connection_state().expect("still connecting").source_node_id,
        "A"
    );
}

#[test]
fn test_pointer_routing_connects_ports() {
    let mut canvas = create_canvas(create_pair_workflow());

    let target = canvas.pointer_down(&at(200.0, 40.0)).expect("pointer down");
    assert_eq!(
        target,
        HitTarget::Port(PortRef {
            node_id: "A".to_string(),
            port_id: "o1".to_string(),
            direction: PortDirection::Output,
        })
    );

    canvas.pointer_move(&at(260.0, 45.0));
    assert_eq!(
        canvas.connection_preview(),
        Some((Position::new(200.0, 40.0), Position::new(260.0, 45.0)))
    );

    // Close enough to B.i1 at (300, 40).
    canvas.pointer_up(&at(302.0, 41.0));
    assert_eq!(canvas.workflow().edges.len(), 1);
    assert_eq!(edge_tuple(&canvas.workflow().edges[0]), ("A", "o1", "B", "i1"));
    assert!(canvas.gesture().is_idle());
}

#[test]
fn test_release_away_from_ports_cancels() {
    let mut canvas = create_canvas(create_pair_workflow());

    canvas.pointer_down(&at(200.0, 40.0)).expect("pointer down");
    canvas.pointer_up(&at(250.0, 300.0));

    assert!(canvas.workflow().edges.is_empty());
    assert!(canvas.gesture().is_idle());
    assert_eq!(canvas.host().commits, 0);
}

#[test]
fn test_connection_pointer_is_in_canvas_space() {
    let mut canvas = create_zoomed_canvas(create_pair_workflow(), 2.0);

    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(400.0, 80.0))
        .expect("connection should start");
    let state = canvas.connection_state().expect("connecting");
    assert_eq!(state.pointer(), Position::new(200.0, 40.0));

    canvas.update_connection_position(&at(500.0, 100.0));
    let (origin, pointer) = canvas.connection_preview().expect("preview");
    assert_eq!(origin, Position::new(200.0, 40.0));
    assert_eq!(pointer, Position::new(250.0, 50.0));
}

#[test]
fn test_generated_edge_ids_skip_taken_ids() {
    let mut workflow = create_pair_workflow();
    workflow.nodes.push(port_node("C", 600.0, 0.0, &["i1"], &[]));
    workflow.edges.push(edge("edge_1", "A", "o1", "C", "i1"));
    let mut canvas = create_canvas(workflow);

    canvas
        .start_connection("A", "o1", PortDirection::Output, &at(200.0, 40.0))
        .expect("connection should start");
    assert!(canvas.complete_connection("B", "i1", PortDirection::Input));

    let ids: Vec<&str> = canvas.workflow().edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["edge_1", "edge_2"]);
}

#[traced_test]
#[test]
fn test_rejection_reason_is_logged() {
    let mut canvas = create_canvas(create_chain_workflow());

    canvas
        .start_connection("B", "o1", PortDirection::Output, &at(500.0, 40.0))
        .expect("connection should start");
    canvas.complete_connection("B", "i1", PortDirection::Input);

    assert!(logs_contain("connection rejected"));
    assert!(logs_contain("cannot be connected to itself"));
}
