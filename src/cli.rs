use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::engine::RequestParams;
use crate::template::TemplateProcessor;

#[derive(Parser)]
#[command(name = "stave")]
#[command(about = "Stave - server-page templates with an embedded script engine", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Interpreter step budget per render, 0 for no limit (overrides config)
    #[arg(long, global = true)]
    pub max_steps: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a document and print the result
    Render {
        /// Document to render
        path: PathBuf,

        /// Request parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// JSON object file with request parameters
        #[arg(long = "params-json")]
        params_json: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile a document without running it
    Check {
        /// Document to check
        path: PathBuf,
    },

    /// Show the segments, skeleton and unit source of a document
    Inspect {
        /// Document to inspect
        path: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration before any command so errors surface first
    let config = Config::builder()
        .config_path(cli.config)
        .max_steps(cli.max_steps)
        .build()?;

    init_logging(&config);

    let processor = TemplateProcessor::with_config(config.to_engine_config());

    match cli.command {
        Commands::Render {
            path,
            params,
            params_json,
            json,
        } => {
            let document = read_document(&path)?;

            let mut request = match params_json {
                Some(file) => load_params_json(&file)?,
                None => RequestParams::new(),
            };
            request.extend(params);

            let result = processor.process(&document, &request);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", result.result);
            }

            if result.error {
                std::process::exit(1);
            }
        }

        Commands::Check { path } => {
            let document = read_document(&path)?;
            let diagnostics = processor.check(&document);

            if diagnostics.is_empty() {
                println!("✓ {} compiles", path.display());
                return Ok(());
            }

            for diagnostic in &diagnostics {
                eprintln!("{}:{}", path.display(), diagnostic);
            }
            std::process::exit(1);
        }

        Commands::Inspect { path } => {
            let document = read_document(&path)?;
            let segments = crate::template::lex(&document);
            let synthesis = processor.prepare(&document);

            println!("Segments ({}):", segments.len());
            for (i, segment) in segments.iter().enumerate() {
                println!("  {:>3} {:<10} {:?}", i, format!("{:?}", segment.kind), segment.text);
            }
            println!("\nSkeleton:");
            println!("{}", synthesis.skeleton);
            println!("\nUnit source:");
            println!("{}", synthesis.unit_source);
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A host process may already have installed a subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse a `key=value` request parameter
fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

/// Read request parameters from a JSON object. Non-string values are kept as
/// their JSON text.
fn load_params_json(path: &Path) -> Result<RequestParams> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let serde_json::Value::Object(map) = value else {
        bail!("{} must contain a JSON object", path.display());
    };

    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}
