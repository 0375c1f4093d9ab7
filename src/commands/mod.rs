//! Command implementations.

pub mod dump;
pub mod fetch;
pub mod watch;

pub use dump::dump_store_html;
pub use fetch::SnapshotFetcher;
pub use watch::Watcher;
