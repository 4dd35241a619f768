//! Filter/sort pipeline over the loaded catalog.
//!
//! Pure and synchronous. Stages run in a fixed order: text search, genre,
//! year, director, minimum rating, then a stable sort.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::{CatalogItem, FilterCriteria, FilterOptions, SortKey};

/// Runs the catalog through every filter stage and sorts the survivors
///
/// An empty result is a valid outcome, not an error.
pub fn apply(catalog: &[CatalogItem], criteria: &FilterCriteria) -> Vec<CatalogItem> {
    let needle = criteria.search.to_lowercase();

    let mut filtered: Vec<CatalogItem> = catalog
        .iter()
        .filter(|item| matches_search(item, &needle))
        .filter(|item| {
            criteria
                .genre
                .as_ref()
                .map_or(true, |genre| item.genre == *genre)
        })
        .filter(|item| criteria.year.map_or(true, |year| item.year == year))
        .filter(|item| {
            criteria
                .director
                .as_ref()
                .map_or(true, |director| item.director == *director)
        })
        .filter(|item| criteria.min_rating <= 0.0 || item.rating >= criteria.min_rating)
        .cloned()
        .collect();

    if let Some(sort_by) = criteria.sort_by {
        // slice::sort_by is stable, ties keep catalog order
        filtered.sort_by(|a, b| compare(a, b, sort_by));
    }

    filtered
}

/// Distinct genre, year and director values present in the catalog
pub fn options(catalog: &[CatalogItem]) -> FilterOptions {
    let mut genres: Vec<String> = catalog.iter().map(|m| m.genre.clone()).collect();
    genres.sort_by(|a, b| compare_text(a, b));
    genres.dedup();

    let mut years: Vec<i32> = catalog.iter().map(|m| m.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();

    let mut directors: Vec<String> = catalog.iter().map(|m| m.director.clone()).collect();
    directors.sort_by(|a, b| compare_text(a, b));
    directors.dedup();

    FilterOptions {
        genres,
        years,
        directors,
    }
}

fn matches_search(item: &CatalogItem, needle: &str) -> bool {
    needle.is_empty()
        || item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.director.to_lowercase().contains(needle)
}

fn compare(a: &CatalogItem, b: &CatalogItem, sort_by: SortKey) -> Ordering {
    match sort_by {
        SortKey::Title => compare_text(&a.title, &b.title),
        SortKey::Year => b.year.cmp(&a.year),
        SortKey::Rating => b.rating.total_cmp(&a.rating),
        SortKey::Genre => compare_text(&a.genre, &b.genre),
    }
}

/// Locale-style ordering: base letters first, then accents, then case
///
/// Accented letters sort next to their base letter, and a lowercase string
/// sorts before its capitalised form.
fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| with_accents(a).cmp(with_accents(b)))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn with_accents(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieId;

    fn movie(id: u64, title: &str, genre: &str, year: i32, director: &str, rating: f64) -> CatalogItem {
        CatalogItem {
            id: MovieId(id),
            title: title.to_string(),
            genre: genre.to_string(),
            year,
            director: director.to_string(),
            description: format!("{} is a {} film.", title, genre.to_lowercase()),
            rating,
            poster_url: None,
            trailer_id: None,
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            movie(1, "The Shawshank Redemption", "Drama", 1994, "Frank Darabont", 9.3),
            movie(2, "The Dark Knight", "Action", 2008, "Christopher Nolan", 9.0),
            movie(3, "Inception", "Sci-Fi", 2010, "Christopher Nolan", 8.8),
            movie(4, "Forrest Gump", "Drama", 1994, "Robert Zemeckis", 8.8),
            movie(5, "Superbad", "Comedy", 2007, "Greg Mottola", 7.6),
            movie(6, "Interstellar", "Sci-Fi", 2014, "Christopher Nolan", 8.6),
            movie(7, "Parasite", "Thriller", 2019, "Bong Joon-ho", 8.5),
            movie(8, "The Green Mile", "Drama", 1999, "Frank Darabont", 8.6),
            movie(9, "Mad Max: Fury Road", "Action", 2015, "George Miller", 8.1),
            movie(10, "The Hangover", "Comedy", 2009, "Todd Phillips", 7.7),
        ]
    }

    fn ids(items: &[CatalogItem]) -> Vec<u64> {
        items.iter().map(|m| m.id.0).collect()
    }

    #[test]
    fn test_empty_criteria_returns_catalog_unchanged() {
        let catalog = catalog();
        let result = apply(&catalog, &FilterCriteria::default());
        assert_eq!(result, catalog);
    }

    #[test]
    fn test_genre_filter_returns_exact_matches() {
        let result = apply(&catalog(), &FilterCriteria::default().with_genre("Drama"));
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|m| m.genre == "Drama"));
        assert_eq!(ids(&result), vec![1, 4, 8]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        // director match
        let result = apply(&catalog(), &FilterCriteria::default().with_search("NOLAN"));
        assert_eq!(ids(&result), vec![2, 3, 6]);

        // title match
        let result = apply(&catalog(), &FilterCriteria::default().with_search("mile"));
        assert_eq!(ids(&result), vec![8]);

        // description match
        let result = apply(&catalog(), &FilterCriteria::default().with_search("thriller film"));
        assert_eq!(ids(&result), vec![7]);
    }

    #[test]
    fn test_year_and_director_filters() {
        let result = apply(&catalog(), &FilterCriteria::default().with_year(1994));
        assert_eq!(ids(&result), vec![1, 4]);

        let result = apply(
            &catalog(),
            &FilterCriteria::default().with_director("Frank Darabont"),
        );
        assert_eq!(ids(&result), vec![1, 8]);

        // director equality is exact, not a substring match
        let result = apply(&catalog(), &FilterCriteria::default().with_director("Nolan"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_min_rating_is_inclusive() {
        let result = apply(&catalog(), &FilterCriteria::default().with_min_rating(8.8));
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_min_rating_keeps_zero_rated_items() {
        let items = vec![movie(1, "Unrated", "Drama", 2020, "Nobody", 0.0)];
        let result = apply(&items, &FilterCriteria::default().with_min_rating(0.0));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_filters_compose() {
        let criteria = FilterCriteria::default()
            .with_search("christopher")
            .with_genre("Sci-Fi")
            .with_min_rating(8.7);
        let result = apply(&catalog(), &criteria);
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let result = apply(&catalog(), &FilterCriteria::default().with_genre("Western"));
        assert!(result.is_empty());

        let result = apply(&[], &FilterCriteria::default().sorted_by(SortKey::Rating));
        assert!(result.is_empty());
    }

    #[test]
    fn test_sort_by_rating_is_stable() {
        let result = apply(&catalog(), &FilterCriteria::default().sorted_by(SortKey::Rating));
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 6, 8, 7, 9, 10, 5]);
    }

    #[test]
    fn test_sort_by_year_descending_is_stable() {
        let result = apply(
            &catalog(),
            &FilterCriteria::default()
                .with_genre("Drama")
                .sorted_by(SortKey::Year),
        );
        assert_eq!(ids(&result), vec![8, 1, 4]);
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let items = vec![
            movie(1, "beta", "Drama", 2000, "X", 5.0),
            movie(2, "Alpha", "Drama", 2000, "X", 5.0),
            movie(3, "alpha", "Drama", 2000, "X", 5.0),
            movie(4, "Gamma", "Drama", 2000, "X", 5.0),
        ];
        let result = apply(&items, &FilterCriteria::default().sorted_by(SortKey::Title));
        assert_eq!(ids(&result), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_sort_by_title_places_accents_with_base_letter() {
        let items = vec![
            movie(1, "Amistad", "Drama", 1997, "X", 7.3),
            movie(2, "Zodiac", "Thriller", 2007, "X", 7.7),
            movie(3, "Amélie", "Romance", 2001, "X", 8.3),
            movie(4, "Amelie", "Romance", 2001, "X", 8.3),
            movie(5, "Éclair", "Drama", 2001, "X", 6.0),
        ];
        let result = apply(&items, &FilterCriteria::default().sorted_by(SortKey::Title));
        assert_eq!(ids(&result), vec![4, 3, 1, 5, 2]);
    }

    #[test]
    fn test_sort_by_genre_ignores_accents() {
        let items = vec![
            movie(1, "A", "Thriller", 2000, "X", 5.0),
            movie(2, "B", "Drame", 2000, "X", 5.0),
            movie(3, "C", "Comédie", 2000, "X", 5.0),
        ];
        let result = apply(&items, &FilterCriteria::default().sorted_by(SortKey::Genre));
        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_by_genre_ascending() {
        let result = apply(&catalog(), &FilterCriteria::default().sorted_by(SortKey::Genre));
        let genres: Vec<&str> = result.iter().map(|m| m.genre.as_str()).collect();
        assert_eq!(
            genres,
            vec![
                "Action", "Action", "Comedy", "Comedy", "Drama", "Drama", "Drama", "Sci-Fi",
                "Sci-Fi", "Thriller"
            ]
        );
        assert_eq!(ids(&result)[..2], [2, 9]);
    }

    #[test]
    fn test_options_are_distinct_and_ordered() {
        let options = options(&catalog());
        assert_eq!(
            options.genres,
            vec!["Action", "Comedy", "Drama", "Sci-Fi", "Thriller"]
        );
        assert_eq!(options.years[0], 2019);
        assert_eq!(options.years.iter().filter(|y| **y == 1994).count(), 1);
        assert_eq!(options.directors.len(), 7);
        assert_eq!(options.directors[0], "Bong Joon-ho");
    }
}
