use calcflow::library::WorkflowLibrary;
use calcflow::prelude::*;
use calcflow::report::render_html;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Inspect, order and report on calculator workflows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Calculator catalog JSON to use instead of the built-in one
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the order in which the workflow's calculators would run
    Order {
        /// Path to the workflow JSON file
        file: PathBuf,
    },
    /// List nodes, ports and connections
    Inspect {
        /// Path to the workflow JSON file
        file: PathBuf,
    },
    /// Write a static HTML report for the workflow
    Report {
        /// Path to the workflow JSON file
        file: PathBuf,
        /// Output file (defaults to <report id>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = "Workflow Report")]
        title: String,
    },
    /// List featured examples and library entries
    Examples {
        /// Only show entries matching this term
        #[arg(short, long)]
        search: Option<String>,
        /// Directory holding workflows.json and examples.json
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Write a featured example as a workflow file
    ExportExample {
        key: String,
        /// Output file (defaults to <key>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,calcflow=debug")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let catalog = match &cli.catalog {
        Some(path) => CalculatorCatalog::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load catalog: {}", e))
        }),
        None => CalculatorCatalog::builtin(),
    };

    match cli.command {
        Command::Order { file } => run_order(&load_graph(&file, &catalog)),
        Command::Inspect { file } => run_inspect(&load_graph(&file, &catalog)),
        Command::Report {
            file,
            output,
            title,
        } => run_report(&load_graph(&file, &catalog), output, &title),
        Command::Examples { search, dir } => run_examples(search.as_deref(), dir),
        Command::ExportExample { key, output } => run_export(&key, output),
    }
}

fn load_graph(path: &Path, catalog: &CalculatorCatalog) -> Graph {
    let doc = WorkflowDocument::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load workflow: {}", e)));
    Graph::from_document(&doc, catalog)
}

fn node_label(graph: &Graph, id: NodeId) -> String {
    graph
        .node(id)
        .map(|n| format!("{} ({})", n.name, id))
        .unwrap_or_else(|| id.to_string())
}

fn run_order(graph: &Graph) {
    if graph.is_empty() {
        println!("No nodes to execute");
        return;
    }
    match graph.execution_order() {
        Some(order) => {
            println!("Execution order ({} nodes):", order.len());
            for (i, id) in order.iter().enumerate() {
                println!("  {}. {}", i + 1, node_label(graph, *id));
            }
        }
        None => exit_with_error(&ExecutionError::CycleDetected.to_string()),
    }
}

fn run_inspect(graph: &Graph) {
    println!(
        "--- Workflow: {} nodes, {} connections ---",
        graph.nodes().len(),
        graph.connections().len()
    );
    for node in graph.nodes() {
        println!(
            "\n{} [{}/{}] at ({}, {})",
            node_label(graph, node.id),
            node.module_key,
            node.calc_key,
            node.position.x,
            node.position.y
        );
        for port in node.input_ports() {
            let value = node
                .input_values
                .get(&port.name)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("  in  {} {} ({}) = {}", port.index, port.label, port.port_type, value);
        }
        for port in node.output_ports() {
            let fan_out = graph.fan_out(node.id, port.index);
            println!(
                "  out {} {} ({}) -> {} target(s)",
                port.index, port.label, port.port_type, fan_out
            );
        }
        if node.has_error {
            println!("  error: {}", node.error_message);
        }
    }

    if !graph.connections().is_empty() {
        println!("\n--- Connections ---");
        for c in graph.connections() {
            println!(
                "  {}[{}] -> {}[{}]",
                node_label(graph, c.from_node),
                c.from_port,
                node_label(graph, c.to_node),
                c.to_port
            );
        }
    }
}

fn run_report(graph: &Graph, output: Option<PathBuf>, title: &str) {
    let report = WorkflowReport::from_graph(graph, title);
    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.html", report.report_id())));
    fs::write(&path, render_html(&report))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path.display(), e)));
    println!("Report written to {}", path.display());
    if let Some(error) = &report.error {
        println!("Note: {}", error);
    }
}

fn run_examples(search: Option<&str>, dir: Option<PathBuf>) {
    let library = match dir {
        Some(dir) => WorkflowLibrary::load_dir(dir),
        None => WorkflowLibrary::builtin(),
    };
    let results = library.search(search.unwrap_or(""));
    if results.is_empty() {
        println!("No matches found");
        return;
    }

    if !results.featured.is_empty() {
        println!("--- Featured examples ---");
        for example in &results.featured {
            println!("  {:<32} {}", example.key, example.name);
            println!("  {:<32} {}", "", example.description);
        }
    }
    if !results.workflows.is_empty() {
        println!("--- Workflows ---");
        for workflow in &results.workflows {
            println!("  {:<32} {} [{}]", workflow.id, workflow.title, workflow.domain);
            if !workflow.steps.is_empty() {
                println!("  {:<32} {}", "", workflow.steps.iter().join(" → "));
            }
        }
    }
    if !results.examples.is_empty() {
        println!("--- Examples ---");
        for example in &results.examples {
            println!("  {:<32} {} [{}]", example.id, example.title, example.domain);
        }
    }
}

fn run_export(key: &str, output: Option<PathBuf>) {
    let library = WorkflowLibrary::builtin();
    let example = library.featured(key).unwrap_or_else(|| {
        let keys = library.featured.iter().map(|e| e.key.as_str()).join(", ");
        exit_with_error(&format!("Unknown example '{}'. Available: {}", key, keys))
    });
    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.json", key)));
    example
        .workflow
        .save(&path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to export example: {}", e)));
    println!("Exported '{}' to {}", example.name, path.display());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
