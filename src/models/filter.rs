use serde::{Deserialize, Serialize};

/// Ordering applied at the end of the filter pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending, case-insensitive
    Title,
    /// Newest first
    Year,
    /// Highest first
    Rating,
    /// Ascending, case-insensitive
    Genre,
}

impl SortKey {
    /// Parses a query parameter value, `None` for anything unrecognized
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "title" => Some(SortKey::Title),
            "year" => Some(SortKey::Year),
            "rating" => Some(SortKey::Rating),
            "genre" => Some(SortKey::Genre),
            _ => None,
        }
    }
}

/// Validated filter and sort settings for one pipeline run
///
/// `FilterCriteria::default()` matches everything and keeps catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against title, description and director
    pub search: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    /// Inclusive lower bound on rating; 0 disables the rating filter
    pub min_rating: f64,
    /// `None` keeps catalog order
    pub sort_by: Option<SortKey>,
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn sorted_by(mut self, sort_by: SortKey) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

/// Raw filter input as it arrives from a query string
///
/// Every field is optional text. Conversion into [`FilterCriteria`] never
/// fails: values that do not parse are treated as unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub director: Option<String>,
    pub min_rating: Option<String>,
    pub sort_by: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<FilterQuery> for FilterCriteria {
    fn from(query: FilterQuery) -> Self {
        let year = query
            .year
            .as_deref()
            .and_then(|y| y.trim().parse::<i32>().ok());

        let min_rating = query
            .min_rating
            .as_deref()
            .and_then(|r| r.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(0.0);

        let sort_by = query.sort_by.as_deref().and_then(SortKey::from_param);

        FilterCriteria {
            search: query.search.unwrap_or_default(),
            genre: non_empty(query.genre),
            year,
            director: non_empty(query.director),
            min_rating,
            sort_by,
        }
    }
}

/// Distinct values available for the genre, year and director filters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub genres: Vec<String>,
    pub years: Vec<i32>,
    pub directors: Vec<String>,
}
