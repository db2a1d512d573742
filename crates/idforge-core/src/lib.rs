//! Core of idforge: access-token generation and the JSON record store.

pub mod error;
pub mod generator;
pub mod models;
pub mod paths;
pub mod store;

pub use error::{IdError, Result};
pub use generator::{Secret, generate_id, is_well_formed, normalize_id};
pub use models::{Entry, Store};
pub use store::RecordStore;
