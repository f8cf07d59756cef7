//! Read queries for the metadata cache.

use duel_etl_core::CardMetadata;
use rusqlite::{Connection, params};

use crate::operations::OperationError;

/// Look up one card by identity.
pub fn find_card(
    conn: &Connection,
    konami_id: u32,
) -> Result<Option<CardMetadata>, OperationError> {
    let mut stmt =
        conn.prepare("SELECT konami_id, name, frame_type FROM cards WHERE konami_id = ?1")?;
    let result = stmt.query_row(params![konami_id], |row| {
        Ok(CardMetadata {
            konami_id: row.get(0)?,
            name: row.get(1)?,
            frame_type: row.get(2)?,
        })
    });
    match result {
        Ok(card) => Ok(Some(card)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn card_count(conn: &Connection) -> Result<i64, OperationError> {
    let count = conn.query_row("SELECT COUNT(*) FROM cards", [], |r| r.get(0))?;
    Ok(count)
}

/// One row of the fetch log.
#[derive(Debug, Clone)]
pub struct FetchLogRow {
    pub source: String,
    pub card_count: i64,
    pub fetched_at: String,
}

/// Most recent bulk fetch, if any.
pub fn last_fetch(conn: &Connection) -> Result<Option<FetchLogRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT source, card_count, fetched_at FROM fetch_log ORDER BY id DESC LIMIT 1",
    )?;
    let result = stmt.query_row([], |row| {
        Ok(FetchLogRow {
            source: row.get(0)?,
            card_count: row.get(1)?,
            fetched_at: row.get(2)?,
        })
    });
    match result {
        Ok(row) => Ok(Some(row)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Summary statistics for the cache.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub cards: i64,
    /// Card count per frame type, largest first.
    pub frame_types: Vec<(String, i64)>,
    pub last_fetch: Option<FetchLogRow>,
}

pub fn cache_stats(conn: &Connection) -> Result<CacheStats, OperationError> {
    let cards = card_count(conn)?;

    let mut stmt = conn.prepare(
        "SELECT frame_type, COUNT(*) FROM cards
         GROUP BY frame_type ORDER BY COUNT(*) DESC, frame_type",
    )?;
    let frame_types = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CacheStats {
        cards,
        frame_types,
        last_fetch: last_fetch(conn)?,
    })
}
