//! Session-owned stores for the loaded catalog and the user's preferences.
//!
//! Both stores are cheap to clone: their payloads sit behind `Arc` and every
//! mutation swaps in a new payload, so a clone taken by a reader is a stable
//! snapshot. Each store carries a version that changes only when its content
//! does, which is what derived-state memoization keys on.

pub mod catalog;
pub mod preferences;

pub use catalog::CatalogStore;
pub use preferences::PreferenceStore;
