use serde::{Deserialize, Serialize};

use super::MovieId;

/// Current like/dislike status of a single catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceStatus {
    Liked,
    Disliked,
    Unrated,
}

/// The liked and disliked movie ids of one user
///
/// Values are never edited in place: `with_liked` and `with_disliked` return a
/// new set, which lets the preference store swap whole snapshots. Ids keep the
/// order in which they were first rated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    #[serde(rename = "liked_movies")]
    liked: Vec<MovieId>,
    #[serde(rename = "disliked_movies")]
    disliked: Vec<MovieId>,
}

impl PreferenceSet {
    /// Creates an empty preference set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from caller supplied lists without re-validating them
    pub fn from_lists(liked: Vec<MovieId>, disliked: Vec<MovieId>) -> Self {
        Self { liked, disliked }
    }

    pub fn liked(&self) -> &[MovieId] {
        &self.liked
    }

    pub fn disliked(&self) -> &[MovieId] {
        &self.disliked
    }

    pub fn is_liked(&self, id: MovieId) -> bool {
        self.liked.contains(&id)
    }

    pub fn is_disliked(&self, id: MovieId) -> bool {
        self.disliked.contains(&id)
    }

    /// Status of a movie; a liked entry wins if the sets were supplied overlapping
    pub fn status(&self, id: MovieId) -> PreferenceStatus {
        if self.is_liked(id) {
            PreferenceStatus::Liked
        } else if self.is_disliked(id) {
            PreferenceStatus::Disliked
        } else {
            PreferenceStatus::Unrated
        }
    }

    /// Number of rated movies (likes plus dislikes)
    pub fn total_rated(&self) -> usize {
        self.liked.len() + self.disliked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty()
    }

    /// Ids present in both lists; always empty for sets built through mutations
    pub fn overlapping(&self) -> Vec<MovieId> {
        self.liked
            .iter()
            .filter(|id| self.disliked.contains(id))
            .copied()
            .collect()
    }

    pub fn is_disjoint(&self) -> bool {
        self.overlapping().is_empty()
    }

    /// Returns a copy of this set with `id` liked and removed from the dislikes
    pub fn with_liked(&self, id: MovieId) -> Self {
        if self.is_liked(id) && !self.is_disliked(id) {
            return self.clone();
        }

        let mut liked: Vec<MovieId> = self.liked.iter().copied().filter(|m| *m != id).collect();
        liked.push(id);
        let disliked = self.disliked.iter().copied().filter(|m| *m != id).collect();

        Self { liked, disliked }
    }

    /// Returns a copy of this set with `id` disliked and removed from the likes
    pub fn with_disliked(&self, id: MovieId) -> Self {
        if self.is_disliked(id) && !self.is_liked(id) {
            return self.clone();
        }

        let mut disliked: Vec<MovieId> =
            self.disliked.iter().copied().filter(|m| *m != id).collect();
        disliked.push(id);
        let liked = self.liked.iter().copied().filter(|m| *m != id).collect();

        Self { liked, disliked }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<MovieId> {
        raw.iter().copied().map(MovieId).collect()
    }

    #[test]
    fn test_new_set_is_empty() {
        let set = PreferenceSet::new();
        assert!(set.is_empty());
        assert_eq!(set.total_rated(), 0);
        assert_eq!(set.status(MovieId(1)), PreferenceStatus::Unrated);
    }

    #[test]
    fn test_with_liked_moves_from_disliked() {
        let set = PreferenceSet::from_lists(ids(&[1]), ids(&[2, 3]));
        let updated = set.with_liked(MovieId(2));

        assert_eq!(updated.liked(), ids(&[1, 2]).as_slice());
        assert_eq!(updated.disliked(), ids(&[3]).as_slice());
        assert!(updated.is_disjoint());
        // original snapshot untouched
        assert_eq!(set.disliked(), ids(&[2, 3]).as_slice());
    }

    #[test]
    fn test_with_liked_keeps_first_rating_order() {
        let set = PreferenceSet::from_lists(ids(&[1, 2]), vec![]);
        let updated = set.with_liked(MovieId(1));
        assert_eq!(updated, set);
    }

    #[test]
    fn test_with_disliked_is_symmetric() {
        let set = PreferenceSet::from_lists(ids(&[5, 6]), vec![]);
        let updated = set.with_disliked(MovieId(5));

        assert_eq!(updated.liked(), ids(&[6]).as_slice());
        assert_eq!(updated.disliked(), ids(&[5]).as_slice());
        assert_eq!(updated.status(MovieId(5)), PreferenceStatus::Disliked);
    }

    #[test]
    fn test_overlapping_reports_shared_ids() {
        let set = PreferenceSet::from_lists(ids(&[1, 2]), ids(&[2, 3]));
        assert_eq!(set.overlapping(), ids(&[2]));
        assert!(!set.is_disjoint());
    }

    #[test]
    fn test_mutation_repairs_overlap_for_touched_id() {
        let set = PreferenceSet::from_lists(ids(&[4]), ids(&[4]));
        let updated = set.with_disliked(MovieId(4));
        assert!(updated.is_disjoint());
        assert_eq!(updated.disliked(), ids(&[4]).as_slice());
    }

    #[test]
    fn test_serializes_with_service_field_names() {
        let set = PreferenceSet::from_lists(ids(&[1]), ids(&[2]));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["liked_movies"], serde_json::json!([1]));
        assert_eq!(json["disliked_movies"], serde_json::json!([2]));
    }
}
