use crate::args::{CliArguments, Command};
use anyhow::Context;
use clap::Parser;
use kicad_circuit::kicad::model::footprint_library::FootprintDocument;
use kicad_circuit::kicad::model::symbol_library::SymbolDocument;
use kicad_circuit::{convert_kicad_json_to_circuit_json, ConverterOptions, ResolvedPcbStyle};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

mod args;

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let data = tokio::fs::read_to_string(path).await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("'{}' is not a valid document", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliArguments::parse();
    init_tracing(log_level(cli.verbose, cli.quiet));

    match cli.command {
        Command::Convert { footprint, symbol, style, silkscreen_font_size, output, pretty } => {
            let footprint_document: FootprintDocument = read_document(&footprint).await?;
            let symbol_document: Option<SymbolDocument> = match &symbol {
                Some(path) => Some(read_document(path).await?),
                None => None,
            };

            let mut resolved_style = match &style {
                Some(path) => ResolvedPcbStyle::from_file(path).await?,
                None => ResolvedPcbStyle::default(),
            };
            resolved_style = resolved_style.merged_with(ResolvedPcbStyle { silkscreen_font_size });
            let options = ConverterOptions::with_style(resolved_style);

            let result = convert_kicad_json_to_circuit_json(&footprint_document, symbol_document.as_ref(), &options)
                .await
                .with_context(|| format!("Failed to convert footprint '{}'", footprint_document.footprint_name))?;

            for diagnostic in &result.diagnostics {
                warn!(element = diagnostic.element, layer = diagnostic.layer.as_deref(), "{}", diagnostic.message);
            }

            let json = result.to_json(pretty)?;
            match output {
                Some(directory) => {
                    tokio::fs::create_dir_all(&directory).await
                        .with_context(|| format!("Failed to create '{}'", directory.display()))?;
                    let file_name = format!("{}.circuit.json", sanitize_filename::sanitize(&footprint_document.footprint_name));
                    let path = directory.join(file_name);
                    tokio::fs::write(&path, json).await
                        .with_context(|| format!("Failed to write '{}'", path.display()))?;
                    info!(path = %path.display(), records = result.elements.len(), "wrote circuit json");
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}
