//! CLI for compiling domain-agent responses
//!
//! Reads a compile request as JSON and writes the compilation result as JSON,
//! so orchestrators in other runtimes can call the compiler as a process.

use anyhow::{Context, Result};
use apqr_compiler::testing::{sample_responses, SAMPLE_QUERY};
use apqr_compiler::{CompilationResult, CompileRequest, Compiler, CompilerConfig};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "apqr-compile")]
#[command(about = "Synthesize LIMS/ERP/DMS responses into one APQR answer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a request file (`-` reads stdin)
    Compile {
        input: PathBuf,

        /// Compiler options as a JSON object
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Compile the built-in sample responses
    Demo {
        #[arg(long, default_value = SAMPLE_QUERY)]
        query: String,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            config,
            compact,
        } => {
            println!("{}", run_compile(&input, config.as_deref(), compact)?);
        }
        Commands::Demo { query } => {
            let result = Compiler::default().compile(&query, &sample_responses());
            print_report(&result)?;
        }
    }

    Ok(())
}

/// Compile the request at `input` and render the result as JSON.
fn run_compile(input: &Path, config: Option<&Path>, compact: bool) -> Result<String> {
    let config = load_config(config)?;
    let request = load_request(input)?;

    let result = Compiler::new(config).compile(&request.query, &request.responses);
    render_json(&result, compact)
}

fn load_config(path: Option<&Path>) -> Result<CompilerConfig> {
    match path {
        Some(path) => CompilerConfig::from_json(&read_input(path)?)
            .with_context(|| format!("Invalid config in {}", path.display())),
        None => Ok(CompilerConfig::default()),
    }
}

fn load_request(input: &Path) -> Result<CompileRequest> {
    CompileRequest::from_json(&read_input(input)?)
        .with_context(|| format!("Invalid compile request in {}", input.display()))
}

fn render_json(result: &CompilationResult, compact: bool) -> Result<String> {
    let output = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(output)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_report(result: &CompilationResult) -> Result<()> {
    let rule = "=".repeat(80);
    println!("{rule}\nCOMPILATION RESULT\n{rule}");
    println!("\nSUMMARY:\n{}", result.summary);
    println!("\nCITATIONS:");
    for citation in &result.citations {
        println!("  - {}", citation);
    }
    println!("\nDETAILS ({} items):", result.details.len());
    println!("{}", serde_json::to_string_pretty(&result.details)?);
    println!("\nMETADATA:");
    println!("{}", serde_json::to_string_pretty(&result.metadata)?);
    Ok(())
}
