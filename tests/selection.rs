//! Tests for selection state and the commands that act on it.
mod common;
use common::*;
use serde_json::json;
use workflow_canvas::prelude::*;

#[test]
fn test_plain_select_replaces_selection_and_closes_menu() {
    let mut canvas = create_canvas(create_chain_workflow());

    canvas.open_context_menu(ContextTarget::Canvas, &at(10.0, 10.0));
    canvas.select_node("A", false);
    assert!(canvas.context_menu().is_none());

    canvas.select_node("B", true);
    assert_eq!(selected_nodes(&canvas), vec!["A", "B"]);

    canvas.select_edge("e1", false);
    assert!(selected_nodes(&canvas).is_empty());
    assert_eq!(selected_edges(&canvas), vec!["e1"]);

    canvas.select_edge("e2", true);
    canvas.select_node("C", true);
    assert_eq!(selected_edges(&canvas), vec!["e1", "e2"]);
    assert_eq!(selected_nodes(&canvas), vec!["C"]);
}

#[test]
fn test_toggle_twice_restores_selection() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.select_node("A", false);
    canvas.select_node("B", true);
    canvas.select_node("C", true);

    canvas.toggle_node_selection("B");
    assert_eq!(selected_nodes(&canvas), vec!["A", "C"]);
    canvas.toggle_node_selection("B");
    assert!(canvas.selection().contains_node("B"));
    assert_eq!(canvas.selection().nodes().len(), 3);

    canvas.toggle_edge_selection("e1");
    canvas.toggle_edge_selection("e1");
    assert!(canvas.selection().edges().is_empty());
}

#[test]
fn test_revision_increases_on_every_change() {
    let mut canvas = create_canvas(create_chain_workflow());
    let start = canvas.selection().revision();

    canvas.select_node("A", false);
    let after_select = canvas.selection().revision();
    assert!(after_select > start);

    canvas.toggle_node_selection("A");
    assert!(canvas.selection().revision() > after_select);
}

#[test]
fn test_delete_node_cascades_to_edges() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.select_node("B", false);

    assert!(canvas.delete_selected());

    let workflow = canvas.workflow();
    let ids: Vec<&str> = workflow.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "C"]);
    assert!(workflow.edges.is_empty());
    assert!(workflow.edges.iter().all(|e| !e.touches("B")));
    assert!(canvas.selection().is_empty());
    assert_eq!(canvas.host().commits, 1);
    assert_eq!(canvas.host().changes, 1);
}

#[test]
fn test_delete_selected_edge_only() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.select_edge("e1", false);

    assert!(canvas.delete_selected());
    assert_eq!(canvas.workflow().nodes.len(), 3);
    let ids: Vec<&str> = canvas.workflow().edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e2"]);

    // Nothing selected any more.
    assert!(!canvas.delete_selected());
    assert_eq!(canvas.host().commits, 1);
}

#[test]
fn test_delete_edge_by_id() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.select_edge("e2", false);
    canvas.select_node("A", true);

    assert!(canvas.delete_edge("e2"));
    assert!(canvas.workflow().edge("e2").is_none());
    assert!(!canvas.selection().contains_edge("e2"));
    assert!(canvas.selection().contains_node("A"));

    assert!(!canvas.delete_edge("missing"));
    assert_eq!(canvas.host().commits, 1);
}

#[test]
fn test_duplicate_creates_offset_copies_and_selects_them() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.select_node("A", false);
    canvas.select_node("B", true);

    let ids = canvas.duplicate_selected();
    assert_eq!(ids, vec!["node_1", "node_2"]);
    assert_eq!(selected_nodes(&canvas), ids);
    assert!(canvas.selection().edges().is_empty());

    let workflow = canvas.workflow();
    assert_eq!(workflow.nodes.len(), 5);
    assert_eq!(workflow.edges.len(), 2);

    let original = workflow.node("A").expect("original kept");
    let copy = workflow.node("node_1").expect("copy of A");
    assert_eq!(copy.name, "Node A (copy)");
    assert_eq!(copy.position, original.position.offset(40.0, 40.0));
    assert_eq!(copy.node_type, original.node_type);
    assert_eq!(copy.ports, original.ports);

    let copy_b = workflow.node("node_2").expect("copy of B");
    assert_eq!(copy_b.position, Position::new(340.0, 40.0));
}

#[test]
fn test_duplicate_copies_are_independent() {
    let mut note = typed_node("N", "note", 0.0, 0.0);
    note.configuration.insert("noteWidth".to_string(), json!(150.0));
    note.configuration.insert("text".to_string(), json!("hello"));
    let workflow = Workflow {
        nodes: vec![note],
        ..Workflow::default()
    };
    let mut canvas = create_canvas(workflow);
    canvas.select_node("N", false);

    let ids = canvas.duplicate_selected();
    assert_eq!(ids.len(), 1);
    let copy_id = ids[0].clone();
    assert_eq!(
        canvas.workflow().node(&copy_id).expect("copy").configuration["text"],
        json!("hello")
    );

    canvas
        .start_note_resize(&copy_id, &at(190.0, 140.0))
        .expect("resize should start");
    canvas.update_resize(&at(290.0, 140.0));
    assert!(canvas.end_resize());

    let workflow = canvas.workflow();
    assert_eq!(
        workflow.node(&copy_id).expect("copy").config_number("noteWidth"),
        Some(250.0)
    );
    assert_eq!(
        workflow.node("N").expect("original").config_number("noteWidth"),
        Some(150.0)
    );
}

#[test]
fn test_duplicate_with_no_selected_nodes_does_nothing() {
    let mut canvas = create_canvas(create_chain_workflow());
    assert!(canvas.duplicate_selected().is_empty());

    canvas.select_edge("e1", false);
    assert!(canvas.duplicate_selected().is_empty());
    assert_eq!(canvas.host().commits, 0);
}

#[test]
fn test_open_config_uses_first_selected_node() {
    let mut canvas = create_canvas(create_chain_workflow());
    assert_eq!(canvas.open_config_for_selected(), None);

    canvas.select_node("B", false);
    canvas.select_node("A", true);
    assert_eq!(canvas.open_config_for_selected(), Some("B".to_string()));
    assert_eq!(canvas.host().opened_config.as_deref(), Some("B"));
}

#[test]
fn test_readonly_allows_selection_but_blocks_edits() {
    let mut canvas = create_readonly_canvas(create_chain_workflow());

    canvas.select_node("B", false);
    canvas.select_edge("e1", true);
    assert_eq!(selected_nodes(&canvas), vec!["B"]);

    assert!(!canvas.delete_selected());
    assert!(!canvas.delete_edge("e1"));
    assert!(canvas.duplicate_selected().is_empty());
    assert_eq!(
        canvas.add_node(&NodeTemplate::default(), &at(0.0, 0.0)),
        Err(GestureError::ReadOnly)
    );

    assert_eq!(canvas.workflow(), &create_chain_workflow());
    assert_eq!(canvas.host().commits, 0);
    assert!(!canvas.selection().is_empty());
}

#[test]
fn test_select_all_and_clear() {
    let mut canvas = create_canvas(create_chain_workflow());

    canvas.select_all();
    assert_eq!(selected_nodes(&canvas), vec!["A", "B", "C"]);
    assert_eq!(selected_edges(&canvas), vec!["e1", "e2"]);

    canvas.clear_selection();
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_context_menu_selects_unselected_target() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.select_node("A", false);
    canvas.select_node("C", true);

    // Right-click on a selected node keeps the multi-selection.
    canvas.open_context_menu(ContextTarget::Node("C".to_string()), &at(620.0, 20.0));
    assert_eq!(selected_nodes(&canvas), vec!["A", "C"]);

    // Right-click on B's body through pointer routing.
    let event = at(350.0, 20.0).with_button(PointerButton::Secondary);
    let target = canvas.pointer_down(&event).expect("pointer down");
    assert_eq!(target, HitTarget::Node("B".to_string()));
    assert_eq!(selected_nodes(&canvas), vec!["B"]);

    let menu = canvas.context_menu().expect("menu open");
    assert_eq!(menu.target, ContextTarget::Node("B".to_string()));
    assert_eq!(menu.position, Position::new(350.0, 20.0));
    assert!(canvas.gesture().is_idle());

    canvas.close_context_menu();
    assert!(canvas.context_menu().is_none());
}

#[test]
fn test_context_menu_on_edge() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.open_context_menu(ContextTarget::Edge("e2".to_string()), &at(550.0, 40.0));

    assert_eq!(selected_edges(&canvas), vec!["e2"]);
    assert!(selected_nodes(&canvas).is_empty());
}

#[test]
fn test_shift_click_toggles_node() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.select_node("A", false);

    let shift_click = at(350.0, 20.0).with_modifiers(Modifiers::SHIFT);
    canvas.pointer_down(&shift_click).expect("pointer down");
    assert_eq!(selected_nodes(&canvas), vec!["A", "B"]);
    assert!(canvas.gesture().is_idle());

    canvas.pointer_down(&shift_click).expect("pointer down");
    assert_eq!(selected_nodes(&canvas), vec!["A"]);
}

#[test]
fn test_delete_during_node_drag_drops_the_drag() {
    let mut canvas = create_canvas(create_chain_workflow());

    canvas
        .start_node_drag("A", &at(50.0, 40.0))
        .expect("drag should start");
    canvas.update_node_drag(&at(150.0, 140.0));
    assert!(canvas.handle_shortcut(Shortcut::Delete));

    assert!(canvas.gesture().is_idle());
    assert!(!canvas.end_node_drag());
    assert!(canvas.workflow().node("A").is_none());
    assert_eq!(canvas.host().commits, 1);
}

#[test]
fn test_duplicate_and_edge_delete_end_active_gesture() {
    let mut canvas = create_canvas(create_chain_workflow());
    canvas.select_node("C", false);

    canvas
        .start_selection(&at(900.0, 500.0), true)
        .expect("marquee should start");
    assert_eq!(canvas.duplicate_selected().len(), 1);
    assert!(canvas.marquee_state().is_none());

    canvas
        .start_connection("B", "o1", PortDirection::Output, &at(500.0, 40.0))
        .expect("connection should start");
    assert!(canvas.delete_edge("e1"));
    assert!(canvas.connection_state().is_none());
    assert_eq!(canvas.workflow().edges.len(), 1);
}
