use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{CatalogItem, MovieId};

/// Holds the catalog as last fetched from the recommendation service
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    items: Arc<Vec<CatalogItem>>,
    index: Arc<HashMap<MovieId, usize>>,
    version: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl CatalogStore {
    /// Creates an empty, not yet loaded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole catalog with a freshly fetched one
    pub fn replace(&mut self, items: Vec<CatalogItem>) {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            // first occurrence wins if the service ever repeats an id
            index.entry(item.id).or_insert(position);
        }

        self.items = Arc::new(items);
        self.index = Arc::new(index);
        self.version += 1;
        self.loaded_at = Some(Utc::now());
    }

    /// Items in catalog order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Shared handle to the current catalog
    pub fn snapshot(&self) -> Arc<Vec<CatalogItem>> {
        Arc::clone(&self.items)
    }

    pub fn get(&self, id: MovieId) -> Option<&CatalogItem> {
        self.index.get(&id).map(|position| &self.items[*position])
    }

    /// Looks up ids in the given order, skipping ids the catalog does not know
    pub fn resolve(&self, ids: &[MovieId]) -> Vec<CatalogItem> {
        ids.iter().filter_map(|id| self.get(*id)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a catalog has been loaded in this session, even an empty one
    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}
