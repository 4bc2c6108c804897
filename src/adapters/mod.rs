// Adapters layer: concrete implementations for external systems (tokenizer, storage).

pub mod csv_entry;
pub mod storage;

pub use csv_entry::{CsvEntry, DEFAULT_DELIMITER};
pub use storage::LocalStorage;
