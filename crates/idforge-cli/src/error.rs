use colored::Colorize;
use idforge_core::IdError;

use crate::config::SECRET_ENV;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    match err.downcast_ref::<IdError>() {
        Some(IdError::MissingSecret) => {
            eprintln!("\n{}", "Suggestion:".yellow().bold());
            eprintln!("  Provide the generation secret with:");
            eprintln!("  {} export {}=<secret>", "$".dimmed(), SECRET_ENV);
            eprintln!("  or set `secret` under [generator] in the config file.");
        }
        Some(IdError::CorruptStore { path, .. }) => {
            eprintln!("\n{}", "Suggestion:".yellow().bold());
            eprintln!(
                "  Inspect or restore {} from a backup; it was left untouched.",
                path.display()
            );
        }
        Some(IdError::InvalidArgument(_)) => {
            eprintln!("\n{}", "Usage:".yellow().bold());
            eprintln!("  {} idforge generate <name>", "$".dimmed());
        }
        _ => {}
    }

    std::process::exit(1);
}
