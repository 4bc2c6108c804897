use crate::adapters::csv_entry::CsvEntry;
use crate::core::catalog::Catalog;
use crate::core::people::People;
use crate::core::subscriptions::Subscriptions;
use crate::domain::film::Film;
use crate::domain::model::{Genre, RecordKind};
use crate::domain::person::Person;
use crate::domain::ports::Storage;
use crate::domain::subscription::Subscription;
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Records accepted by one load call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub lines: usize,
    pub people: usize,
    pub subscriptions: usize,
    pub films: usize,
}

/// Everything loaded from an input file: people, subscriptions and the film catalog.
#[derive(Debug, Default)]
pub struct DataStore {
    pub people: People,
    pub subscriptions: Subscriptions,
    pub catalog: Catalog,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.people.clear();
        self.catalog.teardown();
        self.subscriptions.clear();
    }

    /// Loads every non-blank line of `content`, stopping at the first rejected one.
    ///
    /// Lines accepted before the failure stay loaded.
    pub fn load_str(&mut self, content: &str, reset: bool, delimiter: u8) -> Result<LoadSummary> {
        if reset {
            self.clear();
        }

        let mut summary = LoadSummary::default();
        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let entry = match CsvEntry::parse_line(line, delimiter) {
                Ok(Some(entry)) => entry,
                Ok(None) => continue,
                Err(e) => return Err(e.at_line(line_no, line)),
            };

            let kind = self.add_entry(&entry).map_err(|e| {
                tracing::warn!("Rejected line {}: {}", line_no, e);
                e.at_line(line_no, line)
            })?;

            summary.lines += 1;
            match kind {
                RecordKind::Person => summary.people += 1,
                RecordKind::Subscription => summary.subscriptions += 1,
                RecordKind::Film => summary.films += 1,
            }
        }

        tracing::info!(
            "Loaded {} lines ({} people, {} subscriptions, {} films)",
            summary.lines,
            summary.people,
            summary.subscriptions,
            summary.films
        );
        Ok(summary)
    }

    /// Reads `path` through `storage` and loads it.
    pub async fn load_from<S: Storage>(
        &mut self,
        storage: &S,
        path: &str,
        reset: bool,
        delimiter: u8,
    ) -> Result<LoadSummary> {
        tracing::debug!("Reading input file: {}", path);
        let bytes = storage.read_file(path).await?;
        let content = String::from_utf8(bytes)
            .map_err(|e| CatalogError::invalid_format("input", path, e.to_string()))?;
        self.load_str(&content, reset, delimiter)
    }

    /// Dispatches one entry on its kind tag.
    pub fn add_entry(&mut self, entry: &CsvEntry) -> Result<RecordKind> {
        let kind = entry
            .record_kind()
            .ok_or_else(|| CatalogError::InvalidEntryType(entry.kind.clone()))?;

        match kind {
            RecordKind::Person => self.add_person(entry)?,
            RecordKind::Subscription => self.add_subscription(entry)?,
            RecordKind::Film => self.add_film(entry)?,
        }
        Ok(kind)
    }

    pub fn add_person(&mut self, entry: &CsvEntry) -> Result<()> {
        let person = Person::parse(entry)?;
        self.people.add(person)
    }

    pub fn add_subscription(&mut self, entry: &CsvEntry) -> Result<()> {
        let subscription = Subscription::parse(entry)?;
        self.subscriptions.add(&self.people, subscription)
    }

    pub fn add_film(&mut self, entry: &CsvEntry) -> Result<()> {
        let film = Film::parse(entry)?;
        self.catalog.add_film(film).map(|_| ())
    }

    pub fn people_count(&self) -> usize {
        self.people.len()
    }

    pub fn subscriptions_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn films_count(&self) -> usize {
        self.catalog.count()
    }

    pub fn free_films_count(&self) -> usize {
        self.catalog.free_count()
    }

    pub fn get_subscription(&self, id: u32) -> Result<CsvEntry> {
        self.subscriptions
            .get(id)
            .map(Subscription::to_entry)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Subscription, id.to_string()))
    }

    pub fn get_film(&self, name: &str) -> Result<CsvEntry> {
        self.catalog
            .find_by_name(name)
            .map(Film::to_entry)
            .ok_or_else(|| CatalogError::not_found(RecordKind::Film, name))
    }

    pub fn get_free_films(&self) -> Vec<CsvEntry> {
        self.catalog.list_free().map(Film::to_entry).collect()
    }

    pub fn get_films_by_genre(&self, genre: Genre) -> Vec<CsvEntry> {
        self.catalog.films_by_genre(genre).map(Film::to_entry).collect()
    }
}
