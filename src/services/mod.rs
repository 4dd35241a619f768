pub mod analytics;
pub mod filter;
pub mod providers;
pub mod recommendations;
pub mod session_sync;
