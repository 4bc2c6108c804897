use crate::core::export::CatalogExporter;
use crate::core::store::DataStore;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;

/// Reads the input through `storage`, loads it and exports the result when configured.
pub struct CatalogEngine<S: Storage + Clone, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage + Clone, C: ConfigProvider> CatalogEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub async fn run(&self) -> Result<DataStore> {
        tracing::info!("Loading {}", self.config.input_path());

        let mut store = DataStore::new();
        store
            .load_from(
                &self.storage,
                self.config.input_path(),
                true,
                self.config.delimiter(),
            )
            .await?;

        tracing::info!(
            "Catalog ready: {} films ({} free), {} people, {} subscriptions",
            store.films_count(),
            store.free_films_count(),
            store.people_count(),
            store.subscriptions_count()
        );

        if let Some(output_path) = self.config.output_path() {
            tracing::info!("Exporting to {}", output_path);
            let exporter = CatalogExporter::new(self.storage.clone(), self.config.delimiter());
            exporter
                .export_to(&store, output_path, self.config.output_formats())
                .await?;
        }

        Ok(store)
    }
}
