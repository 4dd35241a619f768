//! Client-side preference and insight engine for a movie recommendation service.
//!
//! Loads the catalog and the user's likes/dislikes from the recommendation
//! service, filters and sorts the catalog locally, derives preference analytics
//! and annotates the service's recommendation lists, exposing all of it over a
//! small JSON API.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
