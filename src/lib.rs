//! # workflow-canvas - Headless Node-Graph Canvas Core
//!
//! **workflow-canvas** implements the interaction logic of a node-graph editor:
//! a pannable, zoomable surface where nodes are placed, typed ports are wired
//! together, and selections are made by click or marquee. It renders nothing.
//! A renderer reads the canvas state and forwards pointer events; the
//! component embedding the canvas owns the workflow and is told about every
//! committed change.
//!
//! ## Core Workflow
//!
//! 1.  **Implement a host**: [`host::CanvasHost`] owns the [`model::Workflow`] and
//!     receives replacements via `set_workflow`. [`host::WorkflowHost`] is a
//!     ready-made implementation.
//! 2.  **Build a canvas**: `Canvas::builder(host)` takes configuration, the
//!     initial viewport and the canvas element's client rectangle.
//! 3.  **Forward pointer events**: `pointer_down`, `pointer_move` and
//!     `pointer_up` hit-test and route to the connection, marquee, resize,
//!     drag and pan controllers. Each controller is also callable directly.
//! 4.  **Render**: read `selection()`, `connection_preview()`,
//!     `marquee_state()`, `node_position()` and `node_size()` each frame.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use workflow_canvas::prelude::*;
//!
//! let workflow = Workflow::from_json(&std::fs::read_to_string("flow.json")?)?;
//! let mut canvas = Canvas::builder(WorkflowHost::new(workflow))
//!     .bounds(ClientRect::new(0.0, 0.0, 1280.0, 720.0))
//!     .build()?;
//!
//! // Drag from the output port of one node onto the input port of another.
//! canvas.start_connection("A", "o1", PortDirection::Output, &PointerEvent::new(200.0, 40.0))?;
//! canvas.pointer_move(&PointerEvent::new(280.0, 40.0));
//! let created = canvas.complete_connection("B", "i1", PortDirection::Input);
//! assert!(created);
//! assert!(canvas.connection_state().is_none());
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod model;
pub mod prelude;
