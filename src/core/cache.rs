use crate::domain::model::{Set, SetCards, SetList};
use crate::domain::ports::{CatalogClient, Storage};
use crate::utils::error::{MtgaError, Result};
use crate::utils::validation::validate_set_code;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const SETS_DATA: &str = ".mtga_sets.json";

pub fn set_data_file(set_code: &str) -> String {
    format!(".mtga_set_{}.json", set_code)
}

/// Read-through cache of catalog responses, one JSON file per document.
pub struct SetCache<C: CatalogClient, S: Storage> {
    catalog: C,
    storage: S,
}

impl<C: CatalogClient, S: Storage> SetCache<C, S> {
    pub fn new(catalog: C, storage: S) -> Self {
        Self { catalog, storage }
    }

    pub async fn get_sets(&self, refresh: bool) -> Result<Vec<Set>> {
        if let Some(list) = self.read_cached::<SetList>(SETS_DATA, refresh).await? {
            return Ok(list.sets);
        }

        let sets = self.catalog.fetch_sets().await?;
        let list = SetList { sets };
        self.persist(SETS_DATA, &list).await?;
        Ok(list.sets)
    }

    pub async fn get_set(&self, set_code: &str, refresh: bool) -> Result<SetCards> {
        validate_set_code(set_code)?;
        let file = set_data_file(set_code);

        if let Some(set) = self.read_cached::<SetCards>(&file, refresh).await? {
            return Ok(set);
        }

        let set = self.catalog.fetch_set_cards(set_code).await?;
        self.persist(&file, &set).await?;
        Ok(set)
    }

    async fn read_cached<T: DeserializeOwned>(&self, file: &str, refresh: bool) -> Result<Option<T>> {
        if refresh {
            tracing::info!("Refresh requested, bypassing cache for {}", file);
            return Ok(None);
        }
        if !self.storage.exists(file).await {
            tracing::debug!("Cache miss: {}", self.storage.describe(file));
            return Ok(None);
        }

        let data = self.storage.read_file(file).await?;
        let value = serde_json::from_slice(&data).map_err(|source| MtgaError::CacheCorruptError {
            path: self.storage.describe(file),
            source,
        })?;
        tracing::debug!("Cache hit: {}", self.storage.describe(file));
        Ok(Some(value))
    }

    async fn persist<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let data = serde_json::to_vec(value)?;
        self.storage.write_file(file, &data).await?;
        tracing::debug!(
            "Cached {} bytes at {}",
            data.len(),
            self.storage.describe(file)
        );
        Ok(())
    }
}
