//! Flowfolio CLI
//!
//! Loads a portfolio scenario (or the built-in example), then prints the
//! allocation tables, the node labels, or the flow graph as Sankey JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flowfolio_core::catalog::SectorCatalog;
use flowfolio_core::models::scenario::Scenario;
use flowfolio_core::models::settings::Settings;
use flowfolio_core::PortfolioPlanner;
use tracing::info;

mod render;

#[derive(Parser)]
#[command(name = "flowfolio")]
#[command(about = "Model a portfolio allocation and print its fund flow graph", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario JSON file with totals and allocations
    #[arg(short, long, env = "FLOWFOLIO_SCENARIO", conflicts_with = "example")]
    scenario: Option<String>,

    /// Use the built-in example 10k portfolio
    #[arg(long)]
    example: bool,

    /// Settings JSON file
    #[arg(long, env = "FLOWFOLIO_SETTINGS")]
    settings: Option<String>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, env = "FLOWFOLIO_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the flow graph as `{ nodes, links }` JSON
    Graph,
    /// Print both allocation collections with totals
    Allocations,
    /// Print the label text of every visible node
    Labels,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = match cli.settings.as_deref() {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("failed to load settings from {path}"))?,
        None => Settings::default(),
    };

    let scenario = match (cli.scenario.as_deref(), cli.example) {
        (Some(path), _) => Scenario::load_from_file(path)
            .with_context(|| format!("failed to load scenario from {path}"))?,
        (None, true) => Scenario::example(),
        (None, false) => Scenario {
            total_investment: settings.default_total_investment,
            ..Scenario::default()
        },
    };

    let mut planner = PortfolioPlanner::with_catalog(SectorCatalog::new_with_defaults(), settings)?;
    planner
        .apply_scenario(&scenario)
        .context("scenario rejected")?;
    info!(
        allocations = planner.get_allocations().len(),
        borrow_allocations = planner.get_borrow_allocations().len(),
        "scenario loaded"
    );

    match cli.command {
        Command::Graph => {
            let graph = planner.build_flow_graph()?;
            println!("{}", graph.to_json()?);
        }
        Command::Allocations => render::print_allocations(&planner),
        Command::Labels => render::print_labels(&planner.get_node_labels()?),
    }

    Ok(())
}
