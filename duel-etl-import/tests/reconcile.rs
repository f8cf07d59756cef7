use duel_etl_core::{CharaSlot, CardMetadata, Dataset, ImageCategory, ImageSlot};
use duel_etl_db::{open_memory, upsert_cards};
use duel_etl_import::{SilentProgress, reconcile_dataset};

const FULL: [ImageSlot; 3] = [ImageSlot::Small, ImageSlot::Medium, ImageSlot::Large];

#[test]
fn names_come_from_the_cache() {
    let conn = open_memory().unwrap();
    upsert_cards(
        &conn,
        &[
            CardMetadata::new(4064, "Kuriboh", "effect"),
            CardMetadata::new(14064, "Kuriboh", "effect"),
            CardMetadata::new(4041, "Dark Magician", "normal"),
        ],
    )
    .unwrap();

    let mut ids = Dataset::new();
    ids.record_image(ImageCategory::Card, "4064", &FULL, "a");
    ids.record_image(ImageCategory::Card, "4041", &FULL, "b");
    ids.record_image(ImageCategory::Card, "14064", &FULL, "c");
    ids.record_image(ImageCategory::Sleeve, "1070001", &[ImageSlot::Small], "s");
    ids.character_mut(411).set(CharaSlot::Icon, "ch");

    let (data, stats) = reconcile_dataset(ids.clone(), &conn, &SilentProgress).unwrap();
    assert_eq!(
        data.card.keys().collect::<Vec<_>>(),
        vec!["Kuriboh", "Dark Magician", "Kuriboh (alt 1)"]
    );
    assert_eq!(data.card["Kuriboh (alt 1)"].id, "14064");
    assert_eq!(stats.suffixed, 1);

    assert_eq!(data.sleeve, ids.sleeve);
    assert_eq!(data.playmat, ids.playmat);
    assert_eq!(data.character, ids.character);
}

#[test]
fn reconciliation_is_repeatable() {
    let conn = open_memory().unwrap();
    let metadata: Vec<CardMetadata> = (0..50)
        .map(|i| CardMetadata::new(i, format!("Card {}", i % 7), "effect"))
        .collect();
    upsert_cards(&conn, &metadata).unwrap();

    let mut ids = Dataset::new();
    for i in (0..50u32).rev() {
        ids.record_image(ImageCategory::Card, &i.to_string(), &FULL, "x");
    }

    let (first, _) = reconcile_dataset(ids.clone(), &conn, &SilentProgress).unwrap();
    let (second, _) = reconcile_dataset(ids, &conn, &SilentProgress).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.card.len(), 50);
    // Highest identity comes first in scan order, so it keeps the bare name.
    assert_eq!(first.card["Card 0"].id, "49");
}
