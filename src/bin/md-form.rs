//! MD Form CLI
//!
//! Command-line interface for translating model schemas into form schemas.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use md_form::{load_document, load_options, Pass, Pipeline, TranslateError, TranslateOptions};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "md-form")]
#[command(about = "Translate model schemas into form-field schemas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a model schema into a form schema
    Translate {
        /// Model schema file
        schema: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// JSON file overriding translation options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Stop after the named pass (see `md-form passes`)
        #[arg(long, value_parser = parse_pass)]
        stop_after: Option<Pass>,
    },

    /// List pipeline passes in execution order
    Passes,
}

fn parse_pass(s: &str) -> Result<Pass, String> {
    Pass::parse(s).ok_or_else(|| {
        let names: Vec<&str> = Pass::ALL.iter().map(Pass::name).collect();
        format!("unknown pass '{}', expected one of: {}", s, names.join(", "))
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Translate {
            schema,
            output,
            pretty,
            config,
            stop_after,
        } => run_translate(&schema, output, pretty, config.as_deref(), stop_after),
        Commands::Passes => {
            for pass in Pass::ALL {
                println!("{}", pass);
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_translate(
    schema_path: &Path,
    output: Option<PathBuf>,
    pretty: bool,
    config: Option<&Path>,
    stop_after: Option<Pass>,
) -> Result<(), u8> {
    let options = match config {
        Some(path) => load_options(path).map_err(report)?,
        None => TranslateOptions::default(),
    };

    let schema = load_document(schema_path).map_err(report)?;

    let pipeline = Pipeline::new(options);
    let form = match stop_after {
        Some(pass) => pipeline.run_until(&schema, pass),
        None => pipeline.run(&schema),
    }
    .map_err(report)?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&form)
    } else {
        serde_json::to_string(&form)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output)
                .map_err(|source| TranslateError::WriteError {
                    path: path.clone(),
                    source,
                })
                .map_err(report)?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

/// Print an error and map it to its exit code.
fn report(err: TranslateError) -> u8 {
    eprintln!("Error: {}", err);
    err.exit_code() as u8
}
