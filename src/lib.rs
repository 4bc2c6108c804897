pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CsvEntry, LocalStorage};
pub use config::TomlConfig;
pub use crate::core::{engine::CatalogEngine, export::CatalogExporter, Catalog, DataStore, LoadSummary};
pub use domain::{Film, Genre, Person, RecordKind, Runtime, Subscription};
pub use utils::error::{CatalogError, Result};
