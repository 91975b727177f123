mod document;
mod repl;

use clap::{Parser, Subcommand};
use document::QueryFile;
use graphnorm_api::GraphSnapshot;
use graphnorm_core::{Config, Editor, Snapshot};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphnorm", version, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge one payload into an empty cache and print the resulting node.
    Merge(MergeArgs),
    /// Start an interactive REPL over an in-memory cache.
    Repl,
}

#[derive(Parser)]
struct MergeArgs {
    /// Path to a query document JSON file (see `document::QueryFile`).
    #[arg(long)]
    query: PathBuf,

    /// Path to the payload JSON file to merge.
    #[arg(long)]
    payload: PathBuf,

    /// Node id to print after merging (default: the well-known query root).
    #[arg(long, default_value = "QueryRoot")]
    show: String,
}

pub(crate) fn build_config() -> Result<Config, String> {
    Config::builder()
        .entity_id_for_node(document::default_entity_id_for_node)
        .build()
        .map_err(|e| e.to_string())
}

fn run_merge(args: MergeArgs) -> Result<(), String> {
    let query_raw = std::fs::read_to_string(&args.query)
        .map_err(|e| format!("failed to read query file {}: {e}", args.query.display()))?;
    let query_file: QueryFile = serde_json::from_str(&query_raw)
        .map_err(|e| format!("invalid query document: {e}"))?;
    let payload_raw = std::fs::read_to_string(&args.payload)
        .map_err(|e| format!("failed to read payload file {}: {e}", args.payload.display()))?;
    let payload: serde_json::Value =
        serde_json::from_str(&payload_raw).map_err(|e| format!("invalid payload JSON: {e}"))?;

    let config = build_config()?;
    let mut editor = Editor::new(config, Snapshot::empty());
    let report = editor
        .merge(&query_file.into_query(), payload)
        .map_err(|e| e.to_string())?;
    let result = editor.commit();

    println!(
        "merged: {} edited node(s), {} reference edit(s) applied, {} orphan(s) collected",
        report.edited_node_ids.len(),
        report.reference_edits_applied,
        report.orphans_collected
    );
    match result.snapshot.get(&args.show) {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value).unwrap()),
        None => println!("(node {:?} not found)", args.show),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Merge(args) => run_merge(args),
        Commands::Repl => repl::run_repl(),
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
