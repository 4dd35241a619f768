use serde::Serialize;

use crate::{
    models::{CatalogItem, MovieId, PreferenceSet, PreferenceStatus, ViewState},
    store::CatalogStore,
};

/// A recommended movie together with the user's current rating of it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub status: PreferenceStatus,
}

/// Attaches like/dislike status to each recommendation
///
/// Order and membership come from the recommendation service and are kept
/// as-is. Call again whenever the list or the preferences change; nothing is
/// cached here.
pub fn annotate(recommendations: &[CatalogItem], preferences: &PreferenceSet) -> Vec<AnnotatedItem> {
    recommendations
        .iter()
        .map(|item| AnnotatedItem {
            status: preferences.status(item.id),
            item: item.clone(),
        })
        .collect()
}

/// Turns a ranked id list into catalog items, dropping ids not in the catalog
pub fn resolve(ranked_ids: &[MovieId], catalog: &CatalogStore) -> Vec<CatalogItem> {
    catalog.resolve(ranked_ids)
}

/// Render state for the recommendation list
pub fn render(
    recommendations: &[CatalogItem],
    preferences: &PreferenceSet,
) -> ViewState<AnnotatedItem> {
    if preferences.is_empty() {
        return ViewState::NoPreferences;
    }
    ViewState::from_items(annotate(recommendations, preferences))
}
