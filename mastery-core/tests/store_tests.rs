use mastery_core::order::is_dense;
use mastery_core::{
    CardDraft, CardSide, CoreError, Deck, DeckDraft, Store, Topic, DEFAULT_COLOR_INDEX,
    DEFAULT_TOPIC_NAME,
};

#[test]
fn new_deck_is_seeded_and_shown_first() {
    let mut s = Store::new();
    let a = s.create_deck(DeckDraft::named("A")).unwrap();
    let b = s.create_deck(DeckDraft::named("B")).unwrap();
    assert_eq!(a.topics.len(), 1);
    assert_eq!(a.topics[0].name, DEFAULT_TOPIC_NAME);
    assert_eq!(b.order, 1);
    let names: Vec<_> = s.decks().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["B", "A"]);
}

#[test]
fn deck_drafts_are_validated() {
    let mut s = Store::new();
    assert_eq!(
        s.create_deck(DeckDraft::named("  ")).unwrap_err(),
        CoreError::FormIncomplete("deck name")
    );
    let mut clear = DeckDraft::named("Clear");
    clear.color_index = 0;
    assert!(matches!(s.create_deck(clear.clone()), Err(CoreError::Invalid(_))));
    clear.image = Some(vec![1, 2, 3]);
    assert!(s.create_deck(clear).is_ok());
    assert!(s.create_deck(DeckDraft::named("x".repeat(41))).is_err());
}

#[test]
fn deleting_a_deck_drops_everything_under_it() {
    let mut s = Store::new();
    let keep = s.create_deck(DeckDraft::named("Keep")).unwrap();
    let gone = s.create_deck(DeckDraft::named("Gone")).unwrap();
    let topic = s.add_topic(gone.id, "Cells").unwrap();
    let card = s.add_card(topic.id, CardDraft::text("Q", "A")).unwrap();

    s.delete_deck(gone.id).unwrap();
    assert_eq!(s.decks().len(), 1);
    assert_eq!(s.decks()[0].id, keep.id);
    assert_eq!(s.decks()[0].order, 0);
    assert_eq!(s.topic(topic.id).unwrap_err(), CoreError::NotFound("topic"));
    assert_eq!(s.card(card.id).unwrap_err(), CoreError::NotFound("card"));
}

#[test]
fn last_topic_cannot_be_deleted() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    let only = deck.topics[0].id;
    assert_eq!(s.delete_topic(only).unwrap_err(), CoreError::LastTopic);
    assert_eq!(s.deck(deck.id).unwrap().topics.len(), 1);

    let second = s.add_topic(deck.id, "Genetics").unwrap();
    assert_eq!(second.order, 1);
    s.delete_topic(only).unwrap();
    let deck = s.deck(deck.id).unwrap();
    assert_eq!(deck.topics.len(), 1);
    assert_eq!(deck.topics[0].order, 0);
    assert_eq!(s.delete_topic(second.id).unwrap_err(), CoreError::LastTopic);
}

#[test]
fn topic_names_must_not_be_blank() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    assert_eq!(
        s.add_topic(deck.id, " ").unwrap_err(),
        CoreError::FormIncomplete("topic name")
    );
    let t = deck.topics[0].id;
    assert!(s.rename_topic(t, "").is_err());
    assert_eq!(s.rename_topic(t, "Cells").unwrap().name, "Cells");
}

#[test]
fn topic_reorder_keeps_dense_orders() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    let a = s.add_topic(deck.id, "A").unwrap();
    s.add_topic(deck.id, "B").unwrap();
    s.move_topic(a.id, 0).unwrap();
    let topics = &s.deck(deck.id).unwrap().topics;
    assert_eq!(topics[0].id, a.id);
    assert!(is_dense(topics));
    assert!(matches!(
        s.move_topic(a.id, 3),
        Err(CoreError::InvalidIndex { index: 3, len: 3 })
    ));
}

#[test]
fn card_round_trip() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    let topic = deck.topics[0].id;
    let card = s.add_card(topic, CardDraft::text("Q", "A")).unwrap();
    let read = s.card(card.id).unwrap();
    assert_eq!(read.front.text, "Q");
    assert_eq!(read.back.text, "A");
    assert!(read.front.image.is_none());
    assert!(read.back.image.is_none());
}

#[test]
fn incomplete_cards_are_rejected() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    let topic = deck.topics[0].id;
    assert_eq!(
        s.add_card(topic, CardDraft::text("Q", "  ")).unwrap_err(),
        CoreError::FormIncomplete("back side")
    );
    let image_only = CardDraft {
        front: CardSide::new("", Some(vec![9])),
        back: CardSide::text("A"),
    };
    assert!(s.add_card(topic, image_only).is_ok());
}

#[test]
fn deleting_a_card_removes_only_that_card() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    let topic = deck.topics[0].id;
    let a = s.add_card(topic, CardDraft::text("1", "1")).unwrap();
    let b = s.add_card(topic, CardDraft::text("2", "2")).unwrap();
    let c = s.add_card(topic, CardDraft::text("3", "3")).unwrap();

    let removed = s.delete_card(b.id).unwrap();
    assert_eq!(removed.front.text, "2");
    let ids: Vec<_> = s.topic(topic).unwrap().cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, [a.id, c.id]);
}

#[test]
fn moving_cards_keeps_creation_order() {
    let mut s = Store::new();
    let bio = s.create_deck(DeckDraft::named("Bio")).unwrap();
    let chem = s.create_deck(DeckDraft::named("Chem")).unwrap();
    let from = bio.topics[0].id;
    let to = chem.topics[0].id;

    let pause = || std::thread::sleep(std::time::Duration::from_millis(2));
    let first = s.add_card(from, CardDraft::text("old", "x")).unwrap();
    pause();
    let middle = s.add_card(to, CardDraft::text("mid", "x")).unwrap();
    pause();
    let last = s.add_card(from, CardDraft::text("new", "x")).unwrap();

    assert_eq!(s.move_cards(&[last.id, first.id], to).unwrap(), 2);
    assert!(s.topic(from).unwrap().cards.is_empty());
    let ids: Vec<_> = s.topic(to).unwrap().cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, [first.id, middle.id, last.id]);
    assert_eq!(s.topic_of_card(first.id).unwrap().id, to);
}

#[test]
fn moving_unknown_cards_moves_nothing() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    let from = deck.topics[0].id;
    let to = s.add_topic(deck.id, "Other").unwrap().id;
    let card = s.add_card(from, CardDraft::text("Q", "A")).unwrap();
    let before = s.clone();
    assert_eq!(
        s.move_cards(&[card.id, uuid::Uuid::new_v4()], to).unwrap_err(),
        CoreError::NotFound("card")
    );
    assert_eq!(s, before);
}

#[test]
fn loading_repairs_bad_data() {
    let mut d1 = Deck::new("One", 99, None, 5);
    d1.topics.clear();
    let mut d2 = Deck::new("Two", 2, None, 5);
    let mut extra = Topic::new("Extra", 7);
    extra.created_at = d2.topics[0].created_at;
    d2.topics.push(extra);

    let s = Store::from_decks(vec![d1, d2]);
    assert!(is_dense(s.decks()));
    for deck in s.decks() {
        assert!(!deck.topics.is_empty());
        assert!(is_dense(&deck.topics));
    }
    let one = s.decks().iter().find(|d| d.name == "One").unwrap();
    assert_eq!(one.color_index, DEFAULT_COLOR_INDEX);
    let two = s.decks().iter().find(|d| d.name == "Two").unwrap();
    assert_eq!(two.topics[0].name, "Extra");
}

#[test]
fn newest_topic_and_card_count() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let cells = s.add_topic(deck.id, "Cells").unwrap();
    s.add_card(cells.id, CardDraft::text("Q1", "A1")).unwrap();
    s.add_card(cells.id, CardDraft::text("Q2", "A2")).unwrap();
    s.add_card(deck.topics[0].id, CardDraft::text("Q3", "A3")).unwrap();

    let deck = s.deck(deck.id).unwrap();
    assert_eq!(deck.recently_added_topic().map(|t| t.id), Some(cells.id));
    assert_eq!(deck.card_count(), 3);
}

#[test]
fn absent_images_are_left_out_of_json() {
    let side = CardSide::text("Q");
    assert_eq!(serde_json::to_string(&side).unwrap(), r#"{"text":"Q"}"#);

    let with_image = CardSide::new("", Some(vec![7]));
    let back: CardSide = serde_json::from_str(&serde_json::to_string(&with_image).unwrap()).unwrap();
    assert_eq!(back, with_image);
}

#[test]
fn older_json_without_optional_fields_loads() {
    let mut s = Store::new();
    let deck = s.create_deck(DeckDraft::named("Bio")).unwrap();
    let mut value = serde_json::to_value(&deck).unwrap();
    assert!(value.get("image").is_none());
    value["topics"][0]
        .as_object_mut()
        .unwrap()
        .remove("cards");

    let loaded: Deck = serde_json::from_value(value).unwrap();
    assert_eq!(loaded.id, deck.id);
    assert!(loaded.image.is_none());
    assert!(loaded.topics[0].cards.is_empty());
}
