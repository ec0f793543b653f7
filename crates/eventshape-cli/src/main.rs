//! CLI for eventshape.
//!
//! Prints the composed field map of an event type and normalizes JSONL event
//! instances (from a file or stdin) into canonical wire payloads.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventshape_composer::{EventSchema, SchemaCatalog};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Inclusion config (JSON) overriding the built-in event type presets
    #[arg(long, global = true, env = "EVENTSHAPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List event types and which optional fields they carry
    EventTypes {
        /// Print the inclusion specs as a JSON object
        #[arg(long)]
        json: bool,
    },
    /// Print the field map of an event type as JSON
    Fields {
        /// Event type, e.g. PURCHASE
        event_type: String,
    },
    /// Normalize JSONL event instances into wire payloads (one per line)
    Normalize {
        /// Event type, e.g. PURCHASE
        event_type: String,

        /// Input file path (default: stdin)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Report failing lines and continue instead of stopping
        #[arg(long)]
        keep_going: bool,
    },
}

#[derive(Debug, Default, PartialEq, Eq)]
struct NormalizeSummary {
    normalized: usize,
    failed: usize,
}

fn load_catalog(config: Option<&Path>) -> Result<SchemaCatalog> {
    match config {
        Some(path) => SchemaCatalog::load(path)
            .with_context(|| format!("Failed to load inclusion config {:?}", path)),
        None => Ok(SchemaCatalog::presets()),
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(p) => Box::new(BufReader::new(
            File::open(p).with_context(|| format!("Failed to open input file {:?}", p))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

/// Normalizes each non-empty line of `reader`, writing one JSON payload per
/// line to `out`. Line numbers in errors are 1-based.
fn normalize_lines(
    schema: &EventSchema,
    reader: impl BufRead,
    mut out: impl Write,
    keep_going: bool,
) -> Result<NormalizeSummary> {
    let mut summary = NormalizeSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        match schema.normalize_json(&line) {
            Ok(payload) => {
                serde_json::to_writer(&mut out, &payload)?;
                writeln!(out)?;
                summary.normalized += 1;
            }
            Err(e) if keep_going => {
                eprintln!("line {line_no}: {e}");
                summary.failed += 1;
            }
            Err(e) => return Err(anyhow::Error::new(e).context(format!("line {line_no}"))),
        }
    }

    out.flush()?;
    Ok(summary)
}

fn describe_inclusions(catalog: &SchemaCatalog) -> Vec<String> {
    catalog
        .event_types()
        .into_iter()
        .filter_map(|name| {
            let spec = catalog.inclusion(&name)?;
            let fields: Vec<String> = spec
                .enabled()
                .map(|(field, inclusion)| format!("{}={inclusion}", field.key()))
                .collect();
            let fields = if fields.is_empty() {
                "-".to_string()
            } else {
                fields.join(" ")
            };
            Some(format!("{name}\t{fields}"))
        })
        .collect()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let catalog = load_catalog(cli.config.as_deref())?;

    match cli.command {
        Commands::EventTypes { json } => {
            if json {
                let specs: serde_json::Map<String, serde_json::Value> = catalog
                    .event_types()
                    .into_iter()
                    .filter_map(|name| {
                        let spec = catalog.inclusion(&name)?;
                        Some(serde_json::to_value(spec).map(|v| (name, v)))
                    })
                    .collect::<Result<_, _>>()?;
                println!("{}", serde_json::to_string_pretty(&specs)?);
            } else {
                for line in describe_inclusions(&catalog) {
                    println!("{line}");
                }
            }
        }
        Commands::Fields { event_type } => {
            let schema = catalog
                .schema(&event_type)
                .with_context(|| format!("Cannot compose schema for {event_type}"))?;
            println!("{}", serde_json::to_string_pretty(schema.fields())?);
        }
        Commands::Normalize {
            event_type,
            path,
            keep_going,
        } => {
            let schema = catalog
                .schema(&event_type)
                .with_context(|| format!("Cannot compose schema for {event_type}"))?;
            let reader = open_input(path.as_deref())?;
            let stdout = io::stdout();
            let summary = normalize_lines(&schema, reader, BufWriter::new(stdout.lock()), keep_going)?;

            eprintln!(
                "Normalized {} {} events ({} failed)",
                summary.normalized, event_type, summary.failed
            );
            if summary.failed > 0 {
                anyhow::bail!(
                    "{} of {} events failed normalization",
                    summary.failed,
                    summary.failed + summary.normalized
                );
            }
        }
    }

    Ok(())
}
