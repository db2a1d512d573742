pub mod delete;
pub mod export;
pub mod generate;
pub mod list;
