use serde::Serialize;

/// Render state of a derived list
///
/// Keeps "still loading", "failed" and "nothing matched" apart so a client can
/// show a distinct message for each.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewState<T> {
    Loading,
    Failed { message: String },
    /// The user has not rated anything yet, so there is nothing to base results on
    NoPreferences,
    Empty,
    Ready { items: Vec<T> },
}

impl<T> ViewState<T> {
    /// `Ready` for a non-empty list, `Empty` otherwise
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready { items }
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ViewState::Ready { items } => items,
            _ => &[],
        }
    }
}
