use serde::ser::{Serialize, SerializeMap, Serializer};

/// Occurrence counts that remember the order in which keys were first seen
///
/// Iteration, serialization and tie-breaking all follow that insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`
    pub fn increment(&mut self, key: K) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    pub fn count(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, count)| (k, *count))
    }

    /// Key with the strictly highest count; the earliest inserted key wins ties
    pub fn most_frequent(&self) -> Option<&K> {
        let mut best: Option<(&K, usize)> = None;
        for (key, count) in self.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((key, count)),
            }
        }
        best.map(|(key, _)| key)
    }

    /// The `n` most frequent entries, highest count first
    ///
    /// Equal counts keep insertion order.
    pub fn top_n(&self, n: usize) -> Vec<(K, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
        ranked.truncate(n);
        ranked
    }
}

impl<K: Serialize> Serialize for FrequencyTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Derived metrics over the catalog and the user's preferences
///
/// Pure projection: rebuilt whenever either input changes, never mutated.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct AnalyticsSnapshot {
    pub total_movies: usize,
    pub liked_movies: usize,
    pub disliked_movies: usize,
    /// Empty when nothing is liked
    pub favorite_genre: String,
    /// Mean rating of liked movies to one decimal, 0 when nothing is liked
    pub average_rating: f64,
    /// Share of ratings that are likes, as a percentage to one decimal
    pub positive_rating_rate: f64,
    pub genre_distribution: FrequencyTable<String>,
    pub year_distribution: FrequencyTable<i32>,
    pub director_distribution: FrequencyTable<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(keys: &[&str]) -> FrequencyTable<String> {
        let mut table = FrequencyTable::new();
        for key in keys {
            table.increment(key.to_string());
        }
        table
    }

    #[test]
    fn test_increment_counts_occurrences() {
        let table = table(&["Drama", "Action", "Drama"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.count(&"Drama".to_string()), 2);
        assert_eq!(table.count(&"Action".to_string()), 1);
        assert_eq!(table.count(&"Horror".to_string()), 0);
    }

    #[test]
    fn test_most_frequent_tie_goes_to_first_seen() {
        let table = table(&["Action", "Comedy", "Action", "Comedy"]);
        assert_eq!(table.most_frequent(), Some(&"Action".to_string()));
    }

    #[test]
    fn test_most_frequent_of_empty_table() {
        let table: FrequencyTable<String> = FrequencyTable::new();
        assert_eq!(table.most_frequent(), None);
    }

    #[test]
    fn test_top_n_orders_by_count_then_insertion() {
        let table = table(&["Sci-Fi", "Drama", "Crime", "Drama", "Crime", "Horror"]);
        let top = table.top_n(3);
        assert_eq!(
            top,
            vec![
                ("Drama".to_string(), 2),
                ("Crime".to_string(), 2),
                ("Sci-Fi".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_n_larger_than_table() {
        let table = table(&["Drama"]);
        assert_eq!(table.top_n(5).len(), 1);
        assert!(table.top_n(0).is_empty());
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut years = FrequencyTable::new();
        years.increment(2010);
        years.increment(1994);
        years.increment(2010);

        let json = serde_json::to_string(&years).unwrap();
        assert_eq!(json, r#"{"2010":2,"1994":1}"#);
    }
}
