mod cli_config;

pub use cli_config::{CliConfig, SECRET_ENV};
