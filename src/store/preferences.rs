use std::sync::Arc;

use crate::models::{MovieId, PreferenceSet};

/// Owns the current user's liked/disliked sets
///
/// Ids are not checked against the catalog. Mutations are local and
/// optimistic; mirroring them to the recommendation service is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    current: Arc<PreferenceSet>,
    version: u64,
}

impl PreferenceStore {
    /// Creates a store with empty preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Likes a movie, dropping any earlier dislike of it
    pub fn mark_liked(&mut self, id: MovieId) {
        let next = self.current.with_liked(id);
        self.swap(next);
        tracing::debug!(movie_id = %id, "Marked movie liked");
    }

    /// Dislikes a movie, dropping any earlier like of it
    pub fn mark_disliked(&mut self, id: MovieId) {
        let next = self.current.with_disliked(id);
        self.swap(next);
        tracing::debug!(movie_id = %id, "Marked movie disliked");
    }

    /// Read-only snapshot; later mutations never show through it
    pub fn current_preferences(&self) -> Arc<PreferenceSet> {
        Arc::clone(&self.current)
    }

    /// Bulk-replaces the preferences, e.g. with what the service has on record
    ///
    /// The lists are stored as given. Overlap between them is logged but left
    /// in place; only a later like/dislike of an overlapping id clears it.
    pub fn replace_preferences(&mut self, liked: Vec<MovieId>, disliked: Vec<MovieId>) {
        let next = PreferenceSet::from_lists(liked, disliked);

        let overlapping = next.overlapping();
        if !overlapping.is_empty() {
            tracing::warn!(
                overlapping = ?overlapping,
                "Liked and disliked movies overlap in supplied preferences"
            );
        }

        self.swap(next);
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn swap(&mut self, next: PreferenceSet) {
        if next != *self.current {
            self.current = Arc::new(next);
            self.version += 1;
        }
    }
}
