use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArguments {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Convert a footprint JSON document into circuit-json records
    Convert {
        footprint: PathBuf,

        /// Symbol JSON document used for schematic port hints
        #[arg(short, long)]
        symbol: Option<PathBuf>,

        /// Style JSON file with board-level overrides (e.g. {"silkscreenFontSize": 1.0})
        #[arg(long)]
        style: Option<PathBuf>,

        /// Font size for every silkscreen text, taking precedence over the style file
        #[arg(long)]
        silkscreen_font_size: Option<f64>,

        /// Directory to write `<footprint>.circuit.json` into; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}
