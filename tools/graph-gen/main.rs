use ahash::AHashSet;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use workflow_canvas::prelude::*;

/// A CLI tool to generate random workflows for exercising the canvas
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// Number of nodes to generate
    #[arg(long, default_value_t = 50)]
    nodes: usize,

    /// Number of edges to attempt (duplicates and self-loops are skipped)
    #[arg(long, default_value_t = 80)]
    edges: usize,

    /// Nodes per grid row
    #[arg(long, default_value_t = 10)]
    columns: usize,

    /// Fraction of nodes generated as notes instead of standard nodes
    #[arg(long, default_value_t = 0.1)]
    notes: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.columns == 0 {
        eprintln!("Error: --columns must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.notes) {
        eprintln!("Error: --notes ({}) must be between 0 and 1", cli.notes);
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating workflow with {} nodes and up to {} edges...",
        cli.nodes, cli.edges
    );

    let nodes = generate_nodes(&mut rng, cli.nodes, cli.columns, cli.notes);
    let edges = generate_edges(&mut rng, &nodes, cli.edges);

    let workflow = Workflow {
        name: "Generated workflow".to_string(),
        nodes,
        edges,
        ..Workflow::default()
    };

    fs::write(&cli.output, workflow.to_json_pretty()?)?;

    println!(
        "Successfully generated {} nodes and {} edges to '{}'",
        workflow.nodes.len(),
        workflow.edges.len(),
        cli.output
    );

    Ok(())
}

/// Lays nodes out on a jittered grid, leaving room between columns for edges.
fn generate_nodes(
    rng: &mut StdRng,
    count: usize,
    columns: usize,
    note_ratio: f64,
) -> Vec<WorkflowNode> {
    (0..count)
        .map(|i| {
            let column = (i % columns) as f64;
            let row = (i / columns) as f64;
            let position = Position::new(
                column * 300.0 + rng.random_range(-20.0..20.0),
                row * 160.0 + rng.random_range(-20.0..20.0),
            );

            if rng.random_bool(note_ratio) {
                return WorkflowNode {
                    id: format!("node_{}", i),
                    node_type: "note".to_string(),
                    name: format!("Note {}", i),
                    position,
                    ports: NodePorts::default(),
                    configuration: Default::default(),
                };
            }

            let inputs = rng.random_range(1..=3);
            let outputs = rng.random_range(1..=2);
            WorkflowNode {
                id: format!("node_{}", i),
                node_type: "task".to_string(),
                name: format!("Task {}", i),
                position,
                ports: NodePorts {
                    inputs: (0..inputs).map(|p| NodePort::new(format!("in_{}", p))).collect(),
                    outputs: (0..outputs)
                        .map(|p| NodePort::new(format!("out_{}", p)))
                        .collect(),
                },
                configuration: Default::default(),
            }
        })
        .collect()
}

/// Picks random output → input pairs between distinct nodes.
fn generate_edges(rng: &mut StdRng, nodes: &[WorkflowNode], attempts: usize) -> Vec<WorkflowEdge> {
    let sources: Vec<&WorkflowNode> = nodes.iter().filter(|n| !n.ports.outputs.is_empty()).collect();
    let targets: Vec<&WorkflowNode> = nodes.iter().filter(|n| !n.ports.inputs.is_empty()).collect();
    if sources.is_empty() || targets.is_empty() {
        return Vec::new();
    }

    let mut seen = AHashSet::new();
    let mut edges = Vec::new();
    for _ in 0..attempts {
        let source = sources[rng.random_range(0..sources.len())];
        let target = targets[rng.random_range(0..targets.len())];
        if source.id == target.id {
            continue;
        }
        let source_port = &source.ports.outputs[rng.random_range(0..source.ports.outputs.len())];
        let target_port = &target.ports.inputs[rng.random_range(0..target.ports.inputs.len())];

        let endpoints = EdgeEndpoints {
            source_node_id: source.id.clone(),
            source_port_id: source_port.id.clone(),
            target_node_id: target.id.clone(),
            target_port_id: target_port.id.clone(),
        };
        if seen.insert(endpoints.clone()) {
            edges.push(endpoints.into_edge(format!("edge_{}", edges.len())));
        }
    }
    println!("-> Generated {} edges.", edges.len());
    edges
}
