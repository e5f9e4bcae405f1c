//! sqlweave: render query trees to dialect SQL.
//!
//! # Usage
//!
//! ```bash
//! # Render a JSON query tree for Informix
//! sqlweave render query.json --dialect informix
//!
//! # Read from stdin, print statements with their parameters as JSON
//! cat query.json | sqlweave render --format json
//!
//! # Type names per dialect
//! sqlweave types --dialect postgres
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use sqlweave::prelude::*;
use sqlweave::transpiler::types::format_type;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlweave")]
#[command(version)]
#[command(about = "Dialect-aware SQL rendering", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlweave render insert.json --dialect informix
    sqlweave render select.json -d sqlserver --pretty
    sqlweave dialects
    sqlweave types -d oracle")]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./sqlweave.toml, then the user config dir)
    #[arg(short, long, global = true, env = "SQLWEAVE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain SQL, one statement per block
    Text,
    /// Statements, purposes and parameters as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON query tree
    Render {
        /// Input file; reads stdin when omitted
        input: Option<PathBuf>,

        /// Target dialect (overrides the config file)
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Multi-line output
        #[arg(short, long)]
        pretty: bool,
    },
    /// List supported dialects
    Dialects,
    /// Show how each logical type is spelled in a dialect
    Types {
        #[arg(short, long, default_value = "generic")]
        dialect: Dialect,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sqlweave=debug" } else { "sqlweave=warn" };
    let filter = EnvFilter::try_from_env("SQLWEAVE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render {
            input,
            dialect,
            format,
            pretty,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(d) = dialect {
                config.dialect = d;
            }
            if pretty {
                config.pretty = true;
            }
            render(input.as_ref(), config, format)
        }
        Commands::Dialects => {
            show_dialects();
            Ok(())
        }
        Commands::Types { dialect } => show_types(dialect),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RenderConfig> {
    match path {
        Some(p) => RenderConfig::load(p).with_context(|| format!("loading {}", p.display())),
        None => RenderConfig::discover().context("loading config"),
    }
}

fn render(input: Option<&PathBuf>, config: RenderConfig, format: OutputFormat) -> Result<()> {
    let json = match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };
    let tree: QueryTree = serde_json::from_str(&json).context("parsing query tree")?;

    let renderer = Renderer::from_config(config)?;
    let batch = renderer.render(&tree)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
        OutputFormat::Text => {
            for (i, stmt) in batch.statements.iter().enumerate() {
                if batch.len() > 1 {
                    println!(
                        "{}",
                        format!("-- [{}/{}] {}", i + 1, batch.len(), describe(&stmt.purpose)).dimmed()
                    );
                }
                println!("{};", stmt.sql.white());
                for p in &stmt.params {
                    println!("  {} {} {}", p.marker.cyan(), "=>".dimmed(), p.command_name.yellow());
                }
            }
        }
    }
    Ok(())
}

fn describe(purpose: &StatementPurpose) -> String {
    match purpose {
        StatementPurpose::Operation => "operation".to_string(),
        StatementPurpose::OperationReturningIdentity { field } => {
            format!("operation returning {}", field)
        }
        StatementPurpose::SequenceTouch { sequence } => format!("touch sequence {}", sequence),
        StatementPurpose::IdentityRetrieval { field } => format!("read identity {}", field),
    }
}

fn show_dialects() {
    println!("{}", "Supported dialects".cyan().bold());
    for dialect in Dialect::ALL {
        let generator = dialect.generator();
        let pagination = generator.pagination();
        println!(
            "  {:<10} marker {:<6} take {:<26} skip {}",
            dialect.name().green(),
            generator.placeholder("p", 1),
            pagination.take,
            pagination.skip
        );
    }
}

fn show_types(dialect: Dialect) -> Result<()> {
    let generator = dialect.generator();
    println!("{} {}", "Type names for".cyan().bold(), dialect.name().green());
    for kind in DataKind::ALL {
        let ty = SqlDataType::from(*kind);
        let name = match format_type(generator.as_ref(), &ty) {
            Ok(name) => name,
            Err(e) => format!("{}", e).red().to_string(),
        };
        println!("  {:<16} {}", kind.to_string(), name);
    }
    Ok(())
}
