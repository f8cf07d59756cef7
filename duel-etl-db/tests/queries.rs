use duel_etl_core::CardMetadata;
use duel_etl_db::*;

#[test]
fn find_missing_card() {
    let conn = open_memory().unwrap();
    assert!(find_card(&conn, 1).unwrap().is_none());
}

#[test]
fn find_existing_card() {
    let conn = open_memory().unwrap();
    let card = CardMetadata::new(4041, "Dark Magician", "normal");
    upsert_card(&conn, &card).unwrap();
    assert_eq!(find_card(&conn, 4041).unwrap(), Some(card));
}

#[test]
fn stats_on_empty_cache() {
    let conn = open_memory().unwrap();
    let stats = cache_stats(&conn).unwrap();
    assert_eq!(stats.cards, 0);
    assert!(stats.frame_types.is_empty());
    assert!(stats.last_fetch.is_none());
}

#[test]
fn stats_group_by_frame_type() {
    let conn = open_memory().unwrap();
    upsert_cards(
        &conn,
        &[
            CardMetadata::new(1, "A", "effect"),
            CardMetadata::new(2, "B", "effect"),
            CardMetadata::new(3, "C", "normal"),
            CardMetadata::new(4, "D", "xyz"),
        ],
    )
    .unwrap();
    insert_fetch_log(&conn, "ygoprodeck", 4).unwrap();

    let stats = cache_stats(&conn).unwrap();
    assert_eq!(stats.cards, 4);
    assert_eq!(
        stats.frame_types,
        vec![
            ("effect".to_string(), 2),
            ("normal".to_string(), 1),
            ("xyz".to_string(), 1),
        ]
    );
    let last = stats.last_fetch.unwrap();
    assert_eq!(last.source, "ygoprodeck");
    assert_eq!(last.card_count, 4);
}

#[test]
fn last_fetch_is_most_recent() {
    let conn = open_memory().unwrap();
    insert_fetch_log(&conn, "first", 1).unwrap();
    insert_fetch_log(&conn, "second", 2).unwrap();
    assert_eq!(last_fetch(&conn).unwrap().unwrap().source, "second");
}
