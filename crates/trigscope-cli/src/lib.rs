//! CLI logic for the trigscope map analyzer.
//!
//! Reads a map file, builds its trigger graph and runs one command against it.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, FilterArgs};

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use log::{info, warn};

use trigscope::{
    MapAnalyzer, TrigscopeError,
    config::{AppConfig, DefinitionsConfig},
    export::{Exporter, json::JsonExporter, text},
};

/// Run the trigscope CLI application, writing command output to stdout.
///
/// # Errors
///
/// Returns `TrigscopeError` for:
/// - File I/O errors
/// - Configuration or definition loading errors
/// - Unknown node IDs for `show`
/// - Export errors
pub fn run(args: &Args) -> Result<(), TrigscopeError> {
    let stdout = io::stdout();
    execute(args, &mut stdout.lock())
}

/// Run the command of `args`, writing its output to `out`.
///
/// `graph --output` writes to the named file instead.
///
/// # Errors
///
/// See [`run`].
pub fn execute<W: Write>(args: &Args, out: &mut W) -> Result<(), TrigscopeError> {
    info!(input_path = args.input; "Processing map");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(path) = &args.definitions {
        app_config = AppConfig::new(
            DefinitionsConfig::new(Some(PathBuf::from(path))),
            app_config.resolver().clone(),
        );
    }

    let source = fs::read_to_string(&args.input)?;
    let analyzer = MapAnalyzer::from_config(app_config)?;

    if let Command::Inspect { id } = &args.command {
        let bundle = analyzer.inspect(&source, id);
        out.write_all(text::bundle_report(&bundle).as_bytes())?;
        return Ok(());
    }

    let parsed = analyzer.analyze(&source);
    for reportable in error_adapter::warning_reportables(&parsed.warnings, &source) {
        warn!("{}", error_adapter::render(&reportable));
    }

    match &args.command {
        Command::Graph {
            output,
            pretty,
            filter,
        } => match output {
            Some(path) => {
                let file = BufWriter::new(fs::File::create(path)?);
                JsonExporter::new(file)
                    .with_filter(filter.node_filter())
                    .with_pretty(*pretty)
                    .export_map(&parsed)?;
                info!(output_file = path; "Graph exported successfully");
            }
            None => {
                JsonExporter::new(&mut *out)
                    .with_filter(filter.node_filter())
                    .with_pretty(*pretty)
                    .export_map(&parsed)?;
            }
        },
        Command::Summary => {
            text::SummaryExporter::new(&mut *out).export_map(&parsed)?;
        }
        Command::Show { id } => {
            let report = analyzer.describe(&parsed, id)?;
            out.write_all(report.as_bytes())?;
        }
        Command::Search { query } => {
            for trigger in analyzer.search(&parsed, query) {
                writeln!(out, "{}\t{}", trigger.id(), trigger.label())?;
            }
        }
        Command::Inspect { .. } => {}
    }

    Ok(())
}
