use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use meta_insight::exif::{redact, Redaction};
use meta_insight::{config, dictionary, pipeline, report};

#[derive(Parser, Debug)]
#[command(
    name = "meta-insight",
    version,
    about = "Metadata inspection and redaction for images — view file-system and EXIF metadata, export it, and write EXIF-free copies"
)]
struct Cli {
    /// Files or directories to inspect. Brace-wrapped drag-and-drop paths
    /// are accepted as-is.
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Hide fields whose value was not found
    #[arg(long)]
    skip_empty: bool,

    /// Export the metadata of a single input as Name: Value lines
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Write an EXIF-free copy of each supported image
    #[arg(long)]
    strip: bool,

    /// Output records as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    // Load config and apply CLI overrides
    let config = config::Config::load(cli.config.as_deref())?;
    let show_empty = config.display.show_empty_fields && !cli.skip_empty;

    // Validate inputs
    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    let inputs: Vec<PathBuf> = cli
        .paths
        .iter()
        .map(|raw| pipeline::normalize_input_path(raw))
        .collect();
    let files = pipeline::collect_files(&inputs);
    if files.is_empty() {
        anyhow::bail!("No files found in the specified paths.");
    }

    if cli.export.is_some() && files.len() > 1 {
        anyhow::bail!("--export expects a single input file, found {}.", files.len());
    }

    let total = files.len();
    let mut failed = 0;

    for (i, path) in files.iter().enumerate() {
        log::info!("[{}/{}] Reading: {}", i + 1, total, path.display());

        let record = pipeline::extract(path);

        if cli.json {
            let entries: Vec<serde_json::Value> = record
                .iter()
                .map(|(field, value)| {
                    serde_json::json!({
                        "name": field.label(),
                        "value": value.to_string(),
                        "explanation": dictionary::explanation(field.label()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            print!("{}", report::format_record(&record, show_empty));
        }

        if let Some(ref dest) = cli.export {
            let dest = if dest.extension().is_none() {
                dest.with_extension(&config.export.default_extension)
            } else {
                dest.clone()
            };
            match report::export_record(&record, &dest) {
                Ok(0) => log::info!("Nothing to export"),
                Ok(n) => log::info!("Exported {n} fields to {}", dest.display()),
                Err(e) => {
                    log::error!("  Export failed: {e}");
                    failed += 1;
                }
            }
        }

        if cli.strip {
            match redact(path, &config.redaction.output_marker) {
                Ok(Redaction::Cleared(output)) => {
                    log::info!("  Metadata removed. Copy saved at: {}", output.display());
                }
                Ok(Redaction::NoMetadata) => {
                    log::info!("  No metadata found in {}", path.display());
                }
                Err(e) => {
                    log::error!("  Could not redact {}: {e}", path.display());
                    failed += 1;
                }
            }
        }
    }

    if failed > 0 {
        log::warn!("Done with {failed} failure(s) out of {total} file(s)");
    }

    Ok(())
}
