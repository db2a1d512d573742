use anyhow::Result;
use colored::Colorize;
use idforge_core::{RecordStore, is_well_formed, normalize_id};
use serde_json::json;

use crate::output::OutputFormat;
use crate::output::json::print_json;

/// A missing ID is reported, not treated as a failure.
pub fn run(store: &RecordStore, id: &str, format: OutputFormat) -> Result<()> {
    let deleted = match store.delete(id) {
        Ok(entry) => Some(entry),
        Err(err) if !err.is_fatal() => None,
        Err(err) => return Err(err.into()),
    };

    if format.is_json() {
        return print_json(&json!({
            "deleted": deleted.is_some(),
            "id": normalize_id(id),
        }));
    }

    match deleted {
        Some(entry) => println!(
            "{} ID {} ({}) deleted.",
            "✓".green(),
            entry.id,
            entry.name
        ),
        None => {
            println!("{} ID {} not found.", "✗".red(), id.trim());
            if !is_well_formed(&normalize_id(id)) {
                println!("  IDs are up to 3 name letters followed by 12 hex digits.");
            }
        }
    }
    Ok(())
}
