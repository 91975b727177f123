use crate::document::QueryFile;
use crate::build_config;
use graphnorm_api::GraphSnapshot;
use graphnorm_core::{Editor, Snapshot};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

fn load_query(path: &str) -> Result<QueryFile, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid query document: {e}"))
}

fn load_payload(path: &str) -> Result<serde_json::Value, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid payload JSON: {e}"))
}

fn run_command(line: &str, snapshot: &mut Snapshot) {
    let mut parts = line.splitn(3, char::is_whitespace);
    let Some(command) = parts.next() else {
        return;
    };

    match command {
        ".help" => {
            println!("Commands:");
            println!("  .exit, .quit              Exit the REPL");
            println!("  .help                     Show this help message");
            println!("  merge <query> <payload>   Merge a payload JSON file under a query document JSON file");
            println!("  get <id>                  Print a node's current value");
            println!("  edges <id>                Print a node's inbound/outbound edges");
            println!("  dump                      List every node id currently in the cache");
            println!("  roots                     List node ids with no inbound edge");
        }
        "merge" => {
            let (Some(query_path), Some(payload_path)) = (parts.next(), parts.next()) else {
                println!("Usage: merge <query.json> <payload.json>");
                return;
            };
            match (load_query(query_path), load_payload(payload_path)) {
                (Ok(query_file), Ok(payload)) => match build_config() {
                    Ok(config) => {
                        let mut editor = Editor::new(config, snapshot.clone());
                        match editor.merge(&query_file.into_query(), payload) {
                            Ok(report) => {
                                let result = editor.commit();
                                *snapshot = result.snapshot;
                                println!(
                                    "merged: {} edited, {} reference edit(s), {} orphan(s)",
                                    report.edited_node_ids.len(),
                                    report.reference_edits_applied,
                                    report.orphans_collected
                                );
                            }
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    Err(e) => println!("Error: {e}"),
                },
                (Err(e), _) | (_, Err(e)) => println!("Error: {e}"),
            }
        }
        "get" => {
            let Some(id) = parts.next() else {
                println!("Usage: get <id>");
                return;
            };
            match snapshot.get(id) {
                Some(value) => println!("{}", serde_json::to_string_pretty(&value).unwrap()),
                None => println!("(not found)"),
            }
        }
        "edges" => {
            let Some(id) = parts.next() else {
                println!("Usage: edges <id>");
                return;
            };
            match (snapshot.inbound(id), snapshot.outbound(id)) {
                (Some(inbound), Some(outbound)) => {
                    println!("inbound: {inbound:?}");
                    println!("outbound: {outbound:?}");
                }
                _ => println!("(not found)"),
            }
        }
        "dump" => {
            let mut ids = snapshot.node_ids();
            ids.sort();
            for id in ids {
                println!("{id}");
            }
        }
        "roots" => {
            let mut ids = snapshot.root_ids();
            ids.sort();
            for id in ids {
                println!("{id}");
            }
        }
        other => println!("Unknown command: {other} (try .help)"),
    }
}

pub fn run_repl() -> Result<(), String> {
    println!("graphnorm REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type .help for instructions, .exit to quit.\n");

    let mut rl = DefaultEditor::new().map_err(|e| e.to_string())?;
    let history_path = ".graphnorm_history";
    let _ = rl.load_history(history_path);

    let mut snapshot = Snapshot::empty();

    loop {
        match rl.readline("graphnorm> ") {
            Ok(line) => {
                let line = line.trim();
                let _ = rl.add_history_entry(line);
                if line.is_empty() {
                    continue;
                }
                match line {
                    ".exit" | ".quit" => {
                        let _ = rl.save_history(history_path);
                        println!("Bye!");
                        break;
                    }
                    _ => run_command(line, &mut snapshot),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                let _ = rl.save_history(history_path);
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    Ok(())
}
