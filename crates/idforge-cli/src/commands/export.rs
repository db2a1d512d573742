use anyhow::Result;
use idforge_core::RecordStore;

use crate::output::OutputFormat;
use crate::output::json::print_json;

/// Name of the allow-list constant in the client app.
pub const ALLOW_LIST_CONST: &str = "AUTHORIZED_IDS";

const RULE_WIDTH: usize = 60;

pub fn run(store: &RecordStore, format: OutputFormat) -> Result<()> {
    let ids = store.export_active()?;

    if format.is_json() {
        return print_json(&ids);
    }

    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("Copy this line into the app (constant {ALLOW_LIST_CONST}):");
    println!("{rule}");
    println!();
    println!("{}", allow_list_declaration(&ids)?);
    println!();
    println!("{rule}");
    Ok(())
}

/// Renders `const AUTHORIZED_IDS = ["A", "B"];`.
pub fn allow_list_declaration(ids: &[String]) -> Result<String> {
    let items = ids
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("const {ALLOW_LIST_CONST} = [{}];", items.join(", ")))
}
