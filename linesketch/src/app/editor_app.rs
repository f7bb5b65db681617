use clap::Parser;

use super::EditorOperation;

/// command line editor for transit route sketches stored as modification
/// JSON files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct EditorApp {
    #[command(subcommand)]
    pub op: EditorOperation,
    /// modification JSON file to read and update in place
    #[arg(long)]
    pub modification_file: String,
    /// editor configuration file (.toml or .json), defaults apply when omitted
    #[arg(long)]
    pub configuration_file: Option<String>,
    /// GTFS bundle (.zip) or stops.txt with snap candidate stops
    #[arg(long)]
    pub stops_file: Option<String>,
}
