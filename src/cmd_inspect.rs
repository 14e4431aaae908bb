//! `inspect` subcommand: parse a recorded snapshot offline.

use std::path::Path;

use serde_json::{Value, json};
use tracing::{debug, warn};

use pagepilot_dom::DomTree;
use pagepilot_runtime::StepLoopConfig;

use crate::cli::OutputFormat;

pub(crate) fn handle_inspect(
    snapshot: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(snapshot)?;
    let raw: Value = serde_json::from_str(&content)?;

    // Recorded driver output may wrap the tree.
    let payload = raw.get("element_tree").unwrap_or(&raw);

    let Some(tree) = DomTree::parse(payload) else {
        return Err(format!("{}: no parseable root node", snapshot.display()).into());
    };
    debug!(nodes = tree.len(), "Parsed snapshot");

    let index = match tree.element_index() {
        Ok(index) => index,
        Err(e) => {
            warn!(error = %e, "Snapshot rejected");
            return Err(e.into());
        }
    };

    match format {
        OutputFormat::Text => {
            let config = StepLoopConfig::default();
            let attributes: Vec<&str> = config.include_attributes.iter().map(String::as_str).collect();
            let rendered = tree.clickable_elements_to_string(&attributes);
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
            println!();
            println!("{} nodes, {} interactive elements", tree.len(), index.len());
        }
        OutputFormat::Json => {
            let targets: Vec<_> = index.indices().filter_map(|i| index.target(i)).collect();
            let out = json!({
                "nodes": tree.len(),
                "interactive": index.len(),
                "elements": targets,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
