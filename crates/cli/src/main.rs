use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::GenConfig;
use crate::pipeline::AnalysisOutput;

mod client;
mod config;
mod pipeline;
mod prompts;
mod report;
mod run;

#[derive(Parser)]
#[command(name = "flowspec")]
#[command(about = "Static source analysis and Playwright test generation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,

    /// Override generation model (FLOWSPEC_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Override generation API URL (FLOWSPEC_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a frontend source tree and report what was found
    Analyze(AnalyzeArgs),

    /// Run the full pipeline: analyze, generate flows, generate test suites
    Generate(GenerateArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Project directory to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Write the dependency graph as Graphviz DOT to this path
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// Project directory to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Base directory for run output
    #[arg(long, default_value = "run_files")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let json_output = matches!(&cli.command, Commands::Analyze(args) if args.json);
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet || json_output {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = GenConfig::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    match cli.command {
        Commands::Analyze(args) => run_analyze(args, &config),
        Commands::Generate(args) => run_generate(args, &config).await,
    }
}

fn run_analyze(args: AnalyzeArgs, config: &GenConfig) -> Result<()> {
    let root = args.path.canonicalize().context("Invalid project path")?;
    let analysis = pipeline::analyze_corpus(&root, config)?;

    if let Some(path) = &args.dot {
        std::fs::write(path, flowspec_graph::export_dot(&analysis.graph))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote dependency graph to {}", path.display());
    }

    let output = AnalysisOutput::from_analysis(&analysis);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Framework: {}", output.framework);
        println!(
            "Files: {} ({} graph nodes, {} edges)",
            output.files, output.nodes, output.edges
        );
        println!("Routes: {}", output.routes.len());
        for route in output.routes.iter().take(20) {
            println!("  {route}");
        }
        println!("API endpoints: {}", output.endpoints.len());
        for endpoint in output.endpoints.iter().take(20) {
            println!("  {endpoint}");
        }
        if !output.features.is_empty() {
            println!("Features: {}", output.features.join(", "));
        }
    }
    Ok(())
}

async fn run_generate(args: GenerateArgs, config: &GenConfig) -> Result<()> {
    let root = args.path.canonicalize().context("Invalid project path")?;
    let outcome = pipeline::run_generate(&root, &args.out_dir, config).await?;

    eprintln!(
        "Generated {} artifact(s) from {} flow(s): {} valid, {} invalid",
        outcome.artifacts, outcome.flows, outcome.valid, outcome.invalid
    );
    Ok(())
}
