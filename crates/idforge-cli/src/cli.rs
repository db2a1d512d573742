use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Parser)]
#[command(name = "idforge")]
#[command(
    version,
    about = "idforge - issue access IDs and export the allow-list for the client app",
    after_help = "Only IDs issued with the operator secret are valid in the app.\n\
                  Never share the secret or the record file; people only need their own ID."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Record file path (defaults to <data dir>/idforge/authorized_ids.json)
    #[arg(long, global = true, env = "IDFORGE_STORE")]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Issue a new ID for a person
    #[command(after_help = "Example: idforge generate Marie")]
    Generate {
        /// Display name; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List every issued ID
    List,

    /// Remove an ID from the allow-list
    #[command(after_help = "Example: idforge delete MAR1A2B3C4D5E6F")]
    Delete {
        /// ID to remove (case-insensitive)
        id: String,
    },

    /// Print the active IDs as a constant for the client app
    Export,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
