//! ByteFlow - Main Entry Point
//!
//! Headless front end: run a saved graph, write the demo graph, or list the
//! operator catalog. Results go to stdout, logs to stderr.

use anyhow::{bail, Context, Result};
use byteflow::{
    config::{default_config_path, AppConfig},
    display::{self, ViewMode},
    pipeline::{Graph, NodeKind, Pipeline},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "byteflow")]
#[command(about = "Run byte transform graphs from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to ~/.config/byteflow/config.toml)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a graph document and print every sink
    Run {
        /// Graph document (JSON)
        graph: PathBuf,

        /// Text for the first Text Input node
        #[arg(short, long)]
        input: Option<String>,

        /// Set a named input node, e.g. --set "Key=secret"
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// How to print sink buffers (raw, hex, hexdump)
        #[arg(long, default_value = "hex")]
        view: ViewMode,
    },

    /// Write the demo graph to a file
    Demo {
        /// Output path for the document
        output: PathBuf,
    },

    /// List available node kinds
    Kinds,
}

fn init_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.logging.filter))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => bail!("expected NAME=VALUE, got '{}'", raw),
    }
}

fn run(
    config: &AppConfig,
    graph: PathBuf,
    input: Option<String>,
    set: Vec<String>,
    view: ViewMode,
) -> Result<()> {
    let mut pipeline = Pipeline::with_config(config.engine.clone());
    pipeline
        .load(&graph)
        .with_context(|| format!("Failed to load graph {}", graph.display()))?;

    let assignments = set
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>>>()?;
    let named: Vec<(&str, &[u8])> = assignments
        .iter()
        .map(|(name, value)| (*name, value.as_bytes()))
        .collect();

    let results = pipeline
        .execute(input.as_deref().map(str::as_bytes), &named)
        .context("Failed to run graph")?;

    for diagnostic in pipeline.diagnostics().entries() {
        eprintln!("warning: {}", diagnostic);
    }
    for (name, data) in &results {
        println!("{}", display::summary(name, data));
        if !data.is_empty() {
            let rendered = display::render(data, view);
            println!("{}", rendered.trim_end());
        }
    }
    Ok(())
}

fn list_kinds() {
    for kind in NodeKind::all() {
        let summary = kind.description().lines().next().unwrap_or_default();
        println!(
            "{:<14} {:<12} {:<34} {}",
            kind.category().display_name(),
            kind.display_name(),
            kind.type_id(),
            summary
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(default_config_path);
    let config = match &config_path {
        Some(path) => AppConfig::load_or_default(path),
        None => AppConfig::default(),
    };
    init_logging(&config);

    match cli.command {
        Commands::Run {
            graph,
            input,
            set,
            view,
        } => run(&config, graph, input, set, view),
        Commands::Demo { output } => {
            Graph::demo()
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote demo graph to {}", output.display());
            Ok(())
        }
        Commands::Kinds => {
            list_kinds();
            Ok(())
        }
    }
}
