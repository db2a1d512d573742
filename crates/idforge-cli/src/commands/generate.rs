use anyhow::Result;
use colored::Colorize;
use idforge_core::{RecordStore, Secret};

use crate::output::OutputFormat;
use crate::output::json::print_json;

const RULE_WIDTH: usize = 50;

pub fn run(
    store: &RecordStore,
    secret: &Secret,
    name: &[String],
    format: OutputFormat,
) -> Result<()> {
    let name = name.join(" ");
    let entry = store.add(secret, &name)?;

    if format.is_json() {
        return print_json(&entry);
    }

    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("{}", "✓ New ID generated".green().bold());
    println!("{rule}");
    println!();
    println!("  Name: {}", entry.name);
    println!("  ID:   {}", entry.id.bold());
    println!();
    println!("  → Give this ID to {} so they can sign in to the app.", entry.name);
    println!("  {} Remember to update the app with 'idforge export'", "⚠".yellow());
    println!("{rule}");
    Ok(())
}
