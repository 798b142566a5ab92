use clap::Parser;
use itertools::Itertools;
use serde::Deserialize;
use std::fs;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use workflow_canvas::prelude::*;

// --- Script Format ---
// One JSON array of commands, replayed in order against the canvas.

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
enum Command {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    Shortcut {
        key: Shortcut,
    },
    SelectNode {
        id: String,
        #[serde(default)]
        additive: bool,
    },
    SelectEdge {
        id: String,
        #[serde(default)]
        additive: bool,
    },
    DeleteEdge {
        id: String,
    },
    #[serde(rename_all = "camelCase")]
    Zoom {
        client_x: f64,
        client_y: f64,
        factor: f64,
    },
    Fit,
    #[serde(rename_all = "camelCase")]
    AddNode {
        template: NodeTemplate,
        client_x: f64,
        client_y: f64,
    },
    Cancel,
}

/// Replays a script of pointer and keyboard commands against a workflow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON file
    workflow_path: String,
    /// Path to the command script JSON file
    script_path: String,

    /// Optional canvas configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Write the resulting workflow here instead of printing it
    #[arg(short, long)]
    output: Option<String>,

    /// Canvas width in client pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Canvas height in client pixels
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Treat the canvas as read-only
    #[arg(long)]
    readonly: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Loading ---
    let workflow = Workflow::from_file(&cli.workflow_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load workflow: {}", e)));
    let config = match &cli.config {
        Some(path) => CanvasConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => CanvasConfig::default(),
    };
    let script_json = fs::read_to_string(&cli.script_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read script file '{}': {}",
            &cli.script_path, e
        ))
    });
    let commands: Vec<Command> = serde_json::from_str(&script_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse script JSON: {}", e)));

    info!(
        nodes = workflow.nodes.len(),
        edges = workflow.edges.len(),
        commands = commands.len(),
        "loaded"
    );

    // --- 2. Canvas ---
    let mut canvas = Canvas::builder(WorkflowHost::new(workflow))
        .config(config)
        .bounds(ClientRect::new(0.0, 0.0, cli.width, cli.height))
        .readonly(cli.readonly)
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid canvas setup: {}", e)));

    // --- 3. Replay ---
    let replay_start = Instant::now();
    for (index, command) in commands.into_iter().enumerate() {
        apply(&mut canvas, index, command);
    }
    let replay_duration = replay_start.elapsed();
    canvas.host_disconnected();

    // --- 4. Results ---
    let selection = canvas.selection();
    let selected_nodes = selection.nodes().iter().join(", ");
    let selected_edges = selection.edges().iter().join(", ");
    let host = canvas.host();

    let json = host
        .workflow
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize workflow: {}", e)));
    match &cli.output {
        Some(path) => fs::write(path, json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write output '{}': {}", path, e))
        }),
        None => println!("{}", json),
    }

    eprintln!("\n--- Replay Summary ---");
    eprintln!("Nodes:              {}", host.workflow.nodes.len());
    eprintln!("Edges:              {}", host.workflow.edges.len());
    eprintln!("Selected nodes:     [{}]", selected_nodes);
    eprintln!("Selected edges:     [{}]", selected_edges);
    eprintln!("Commits:            {}", host.commits);
    eprintln!("Change events:      {}", host.changes);
    eprintln!("Render requests:    {}", host.updates);
    eprintln!("-----------------------------");
    eprintln!("Replay:             {:?}", replay_duration);
    eprintln!("Total Execution:    {:?}", total_start.elapsed());
}

fn apply(canvas: &mut Canvas<WorkflowHost>, index: usize, command: Command) {
    match command {
        Command::PointerDown(event) => {
            if let Err(e) = canvas.pointer_down(&event) {
                warn!(index, error = %e, "pointer down ignored");
            }
        }
        Command::PointerMove(event) => canvas.pointer_move(&event),
        Command::PointerUp(event) => canvas.pointer_up(&event),
        Command::Shortcut { key } => {
            canvas.handle_shortcut(key);
        }
        Command::SelectNode { id, additive } => canvas.select_node(&id, additive),
        Command::SelectEdge { id, additive } => canvas.select_edge(&id, additive),
        Command::DeleteEdge { id } => {
            canvas.delete_edge(&id);
        }
        Command::Zoom {
            client_x,
            client_y,
            factor,
        } => canvas.zoom_at(&PointerEvent::new(client_x, client_y), factor),
        Command::Fit => {
            canvas.fit_to_content();
        }
        Command::AddNode {
            template,
            client_x,
            client_y,
        } => {
            if let Err(e) = canvas.add_node(&template, &PointerEvent::new(client_x, client_y)) {
                warn!(index, error = %e, "add node ignored");
            }
        }
        Command::Cancel => canvas.cancel_gesture(),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
