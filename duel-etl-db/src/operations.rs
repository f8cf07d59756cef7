//! Write operations on the metadata cache.

use duel_etl_core::CardMetadata;
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Insert or update one card.
pub fn upsert_card(conn: &Connection, card: &CardMetadata) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO cards (konami_id, name, frame_type)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(konami_id) DO UPDATE SET
             name = excluded.name,
             frame_type = excluded.frame_type",
        params![card.konami_id, card.name, card.frame_type],
    )?;
    Ok(())
}

/// Insert or update many cards in a single transaction.
///
/// Either every card is written or none is. Returns the number written.
pub fn upsert_cards(conn: &Connection, cards: &[CardMetadata]) -> Result<usize, OperationError> {
    let tx = conn.unchecked_transaction()?;
    for card in cards {
        upsert_card(&tx, card)?;
    }
    tx.commit()?;
    Ok(cards.len())
}

/// Delete every cached card. Returns the number removed.
pub fn clear_cards(conn: &Connection) -> Result<usize, OperationError> {
    let removed = conn.execute("DELETE FROM cards", [])?;
    Ok(removed)
}

/// Record a completed bulk fetch. Returns the log row ID.
pub fn insert_fetch_log(
    conn: &Connection,
    source: &str,
    card_count: usize,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO fetch_log (source, card_count) VALUES (?1, ?2)",
        params![source, card_count as i64],
    )?;
    Ok(conn.last_insert_rowid())
}
