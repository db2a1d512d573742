use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use idforge_core::{Entry, RecordStore};

use crate::output::OutputFormat;
use crate::output::json::print_json;

const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn run(store: &RecordStore, format: OutputFormat) -> Result<()> {
    let entries = store.list()?;

    if format.is_json() {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No IDs issued yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "ID", "Created", "Status"]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(&entry.id),
            Cell::new(entry.created_at.format(CREATED_FORMAT)),
            status_cell(entry),
        ]);
    }
    crate::output::table::print_table(table)?;

    println!("Total: {} ID(s)", entries.len());
    Ok(())
}

fn status_cell(entry: &Entry) -> Cell {
    if entry.active {
        Cell::new("✓ Active").fg(Color::Green)
    } else {
        Cell::new("✗ Inactive").fg(Color::Red)
    }
}
