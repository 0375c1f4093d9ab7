//! steam-sale - Polls the Steam storefront and prints the daily deals.
//!
//! Fetches the listing page, follows each deal to its detail page for a clean
//! game name, and renders a sorted, deduplicated table. In loop mode the
//! listing is re-fetched on an interval and re-printed whenever it changes.

pub mod commands;
pub mod config;
pub mod format;
pub mod steam;

pub use commands::{SnapshotFetcher, Watcher};
pub use config::Config;
pub use steam::{SaleItem, SaleSnapshot, SteamClient, StoreFetch};
