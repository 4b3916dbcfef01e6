use std::path::Path;

use anyhow::Result;

use crate::commands::{load_catalog, load_config};

/// Execute the `graph` command: print the translated asset graph.
pub fn execute(definitions_path: &Path, json: bool) -> Result<()> {
    let config = load_config(definitions_path)?;
    let Some(catalog) = load_catalog(&config)? else {
        anyhow::bail!("No manifest configured; nothing to build a graph from");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("Assets ({}):", catalog.len());
    for node in catalog.nodes() {
        match &node.group {
            Some(group) => println!("  {}  [{group}]", node.key),
            None => println!("  {}", node.key),
        }
        if !node.description.is_empty() {
            if let Some(first_line) = node.description.lines().next() {
                println!("      {first_line}");
            }
        }
    }

    println!("Dependencies ({}):", catalog.edges().len());
    for (upstream, downstream) in catalog.edges() {
        println!("  {upstream} -> {downstream}");
    }
    Ok(())
}
