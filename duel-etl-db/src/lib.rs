//! SQLite cache for card metadata fetched from the remote provider.
//!
//! Provides schema creation, write operations, and read queries
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{OperationError, clear_cards, insert_fetch_log, upsert_card, upsert_cards};
pub use queries::{CacheStats, FetchLogRow, cache_stats, card_count, find_card, last_fetch};
pub use schema::{SchemaError, open_database, open_memory};
