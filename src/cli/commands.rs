use crate::report::fail_if_errors;
use crate::sample::sample_value;
use crate::schema::load_schema;
use crate::validate::RawInput;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

/// Command-line interface for wirecheck
///
/// Provides commands for validating wire input against schema documents and
/// for printing example value trees.
#[derive(Parser)]
#[command(name = "wirecheck")]
#[command(about = "wirecheck CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for wirecheck
#[derive(Subcommand)]
pub enum Commands {
    /// Validate wire input against a schema document
    Check {
        /// Path to the schema document (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// JSON file holding the request body, or `-` for stdin
        #[arg(short, long)]
        body: Option<PathBuf>,

        /// Path parameters as name=value (repeatable)
        #[arg(short, long)]
        path: Vec<String>,

        /// Query parameters as name=value (repeatable)
        #[arg(short, long)]
        query: Vec<String>,
    },
    /// Print an example value tree for a schema document
    Sample {
        /// Path to the schema document (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn split_pair(raw: &str) -> anyhow::Result<(&str, &str)> {
    raw.split_once('=')
        .with_context(|| format!("parameter `{raw}` is not name=value"))
}

fn read_body(path: &PathBuf) -> anyhow::Result<serde_json::Value> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read body file {}", path.display()))?
    };
    serde_json::from_str(&content).context("request body is not valid JSON")
}

pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Check {
            schema,
            body,
            path,
            query,
        } => {
            let schema = load_schema(schema.to_string_lossy().as_ref())?;
            let mut input = RawInput::new();
            for raw in path {
                let (name, value) = split_pair(raw)?;
                input = input.path_param(name, value);
            }
            for raw in query {
                let (name, value) = split_pair(raw)?;
                input = input.query_param(name, value);
            }
            if let Some(body) = body {
                input = input.body(read_body(body)?);
            }
            match schema.validate(&input) {
                Ok(tree) => {
                    println!("{}", serde_json::to_string_pretty(&tree)?);
                    Ok(())
                }
                Err(errors) => {
                    fail_if_errors(errors);
                    Ok(())
                }
            }
        }
        Commands::Sample { schema } => {
            let schema = load_schema(schema.to_string_lossy().as_ref())?;
            println!("{}", serde_json::to_string_pretty(&sample_value(&schema))?);
            Ok(())
        }
    }
}
