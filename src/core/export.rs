use crate::adapters::csv_entry::CsvEntry;
use crate::core::store::{DataStore, VERSION};
use crate::domain::film::Film;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::Serialize;
use std::path::Path;

pub const FILMS_FILE: &str = "films.csv";
pub const FREE_FILMS_FILE: &str = "free_films.csv";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub version: &'static str,
    pub people: usize,
    pub subscriptions: usize,
    pub films: usize,
    pub free_films: usize,
    pub free_film_names: Vec<String>,
}

impl CatalogSummary {
    pub fn from_store(store: &DataStore) -> Self {
        Self {
            version: VERSION,
            people: store.people_count(),
            subscriptions: store.subscriptions_count(),
            films: store.films_count(),
            free_films: store.free_films_count(),
            free_film_names: store.catalog.list_free().map(|f| f.name.clone()).collect(),
        }
    }
}

/// Writes catalog snapshots through a [`Storage`].
pub struct CatalogExporter<S: Storage> {
    storage: S,
    delimiter: u8,
}

impl<S: Storage> CatalogExporter<S> {
    pub fn new(storage: S, delimiter: u8) -> Self {
        Self { storage, delimiter }
    }

    /// Writes one file per requested format at the storage root.
    pub async fn export(&self, store: &DataStore, formats: &[String]) -> Result<Vec<String>> {
        self.export_to(store, "", formats).await
    }

    /// Writes one file per requested format under `dir` and returns the written paths.
    pub async fn export_to(&self, store: &DataStore, dir: &str, formats: &[String]) -> Result<Vec<String>> {
        let mut written = Vec::new();

        if formats.iter().any(|f| f == "csv") {
            let films = self.render(store.catalog.iter())?;
            written.push(self.write(dir, FILMS_FILE, films.as_bytes()).await?);

            let free = self.render(store.catalog.list_free())?;
            written.push(self.write(dir, FREE_FILMS_FILE, free.as_bytes()).await?);
        }

        if formats.iter().any(|f| f == "json") {
            let summary = CatalogSummary::from_store(store);
            let json = serde_json::to_string_pretty(&summary)?;
            written.push(self.write(dir, SUMMARY_FILE, json.as_bytes()).await?);
        }

        tracing::info!("Exported {} file(s): {}", written.len(), written.join(", "));
        Ok(written)
    }

    async fn write(&self, dir: &str, file: &str, data: &[u8]) -> Result<String> {
        let path = Path::new(dir).join(file).to_string_lossy().into_owned();
        self.storage.write_file(&path, data).await?;
        Ok(path)
    }

    fn render<'a>(&self, films: impl Iterator<Item = &'a Film>) -> Result<String> {
        let mut out = String::new();
        for film in films {
            let entry: CsvEntry = film.to_entry();
            out.push_str(&entry.to_line(self.delimiter)?);
            out.push('\n');
        }
        Ok(out)
    }
}
