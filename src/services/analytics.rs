//! Analytics aggregation over the catalog and the user's preference set.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{AnalyticsSnapshot, CatalogItem, FrequencyTable, MovieId, PreferenceSet};

/// Builds the analytics snapshot
///
/// Liked ids the catalog does not contain are ignored for distributions and
/// the average rating, but still count as ratings. An empty catalog or empty
/// preferences yield zeroed metrics.
pub fn compute(catalog: &[CatalogItem], preferences: &PreferenceSet) -> AnalyticsSnapshot {
    let liked_ids: HashSet<MovieId> = preferences.liked().iter().copied().collect();
    let liked_items: Vec<&CatalogItem> = catalog
        .iter()
        .filter(|item| liked_ids.contains(&item.id))
        .collect();

    let mut genre_distribution = FrequencyTable::new();
    let mut year_distribution = FrequencyTable::new();
    let mut director_distribution = FrequencyTable::new();
    for item in &liked_items {
        genre_distribution.increment(item.genre.clone());
        year_distribution.increment(item.year);
        director_distribution.increment(item.director.clone());
    }

    let favorite_genre = genre_distribution
        .most_frequent()
        .cloned()
        .unwrap_or_default();

    let average_rating = if liked_items.is_empty() {
        0.0
    } else {
        let total: f64 = liked_items.iter().map(|item| item.rating).sum();
        round_one_decimal(total / liked_items.len() as f64)
    };

    let liked = preferences.liked().len();
    let disliked = preferences.disliked().len();

    AnalyticsSnapshot {
        total_movies: catalog.len(),
        liked_movies: liked,
        disliked_movies: disliked,
        favorite_genre,
        average_rating,
        positive_rating_rate: positive_rating_rate(liked, disliked),
        genre_distribution,
        year_distribution,
        director_distribution,
    }
}

/// Likes as a percentage of all ratings, 0 when nothing has been rated
pub fn positive_rating_rate(liked: usize, disliked: usize) -> f64 {
    let rated = liked + disliked;
    if rated == 0 {
        return 0.0;
    }
    round_one_decimal(liked as f64 / rated as f64 * 100.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One row of a Top-N view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry<K> {
    pub value: K,
    pub count: usize,
}

/// Top-N rows of a frequency table, most frequent first
pub fn top_n<K: PartialEq + Clone>(table: &FrequencyTable<K>, n: usize) -> Vec<RankedEntry<K>> {
    table
        .top_n(n)
        .into_iter()
        .map(|(value, count)| RankedEntry { value, count })
        .collect()
}

/// The `n` most recent release years among liked movies, newest first
pub fn recent_years(table: &FrequencyTable<i32>, n: usize) -> Vec<RankedEntry<i32>> {
    let mut years: Vec<RankedEntry<i32>> = table
        .iter()
        .map(|(year, count)| RankedEntry {
            value: *year,
            count,
        })
        .collect();
    years.sort_by(|a, b| b.value.cmp(&a.value));
    years.truncate(n);
    years
}

/// Everything the insights view shows, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    #[serde(flatten)]
    pub snapshot: AnalyticsSnapshot,
    /// Liked movies in the favorite genre
    pub favorite_genre_count: usize,
    pub top_genres: Vec<RankedEntry<String>>,
    pub top_directors: Vec<RankedEntry<String>>,
    pub top_years: Vec<RankedEntry<i32>>,
    pub current_recommendations: usize,
}

impl InsightsReport {
    pub fn new(snapshot: AnalyticsSnapshot, n: usize, current_recommendations: usize) -> Self {
        let favorite_genre_count = snapshot
            .genre_distribution
            .count(&snapshot.favorite_genre);

        Self {
            favorite_genre_count,
            top_genres: top_n(&snapshot.genre_distribution, n),
            top_directors: top_n(&snapshot.director_distribution, n),
            top_years: recent_years(&snapshot.year_distribution, n),
            current_recommendations,
            snapshot,
        }
    }
}
