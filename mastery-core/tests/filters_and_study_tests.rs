use mastery_core::{
    filter_by_name, Card, CardSide, CoreError, Deck, Face, StudySession,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn deck(name: &str) -> Deck {
    Deck::new(name, 1, None, 0)
}

#[test]
fn blank_query_keeps_everything_in_order() {
    let decks = vec![deck("Math"), deck("Biology"), deck("Art")];
    for q in ["", "   "] {
        let out = filter_by_name(&decks, q);
        assert_eq!(out, decks);
    }
}

#[test]
fn prefix_match_ignores_case() {
    let decks = vec![deck("Biology")];
    for q in ["bio", "BIO", "Bio", "  bio "] {
        let out = filter_by_name(&decks, q);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Biology");
    }
}

#[test]
fn only_prefixes_match() {
    let decks = vec![deck("Biology"), deck("Microbiology"), deck("Biochem")];
    let out = filter_by_name(&decks, "bio");
    let names: Vec<_> = out.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Biology", "Biochem"]);
    assert!(filter_by_name(&decks, "chem").is_empty());
}

fn cards(texts: &[&str]) -> Vec<Card> {
    texts
        .iter()
        .map(|t| Card::new(CardSide::text(*t), CardSide::text(format!("{t}!"))))
        .collect()
}

#[test]
fn empty_topic_cannot_be_studied() {
    assert_eq!(StudySession::new(Vec::new()).unwrap_err(), CoreError::EmptySession);
}

#[test]
fn session_is_a_permutation() {
    let input = cards(&["a", "b", "c", "d", "e"]);
    let mut rng = StdRng::seed_from_u64(7);
    let s = StudySession::with_rng(input.clone(), &mut rng).unwrap();
    let mut got: Vec<_> = s.cards().iter().map(|c| c.id).collect();
    let mut want: Vec<_> = input.iter().map(|c| c.id).collect();
    got.sort();
    want.sort();
    assert_eq!(got, want);
    assert_eq!(s.cursor(), 0);
    assert_eq!(s.face(), Face::Front);
}

#[test]
fn navigation_three_cards() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut s = StudySession::with_rng(cards(&["a", "b", "c"]), &mut rng).unwrap();

    s.retreat();
    assert_eq!(s.cursor(), 0);
    assert!(!s.can_retreat());

    s.flip();
    assert_eq!(s.face(), Face::Back);
    let back_text = s.current_side().text.clone();
    assert!(back_text.ends_with('!'));

    s.advance();
    assert_eq!(s.cursor(), 1);
    assert_eq!(s.face(), Face::Front);

    s.advance();
    assert_eq!(s.cursor(), 2);
    assert!(!s.can_advance());
    s.flip();
    s.advance();
    assert_eq!(s.cursor(), 2);
    assert_eq!(s.face(), Face::Back);

    s.retreat();
    assert_eq!(s.cursor(), 1);
    assert_eq!(s.face(), Face::Front);
}

#[test]
fn stepping_past_either_end_keeps_the_face() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut s = StudySession::with_rng(cards(&["a", "b", "c"]), &mut rng).unwrap();

    s.flip();
    s.retreat();
    assert_eq!((s.cursor(), s.face()), (0, Face::Back));

    s.advance();
    s.advance();
    s.flip();
    s.advance();
    assert_eq!((s.cursor(), s.face()), (2, Face::Back));
}

#[test]
fn flip_twice_returns_to_front() {
    let mut s = StudySession::new(cards(&["solo"])).unwrap();
    let (card, face) = s.current();
    assert_eq!(card.front.text, "solo");
    assert_eq!(face, Face::Front);
    s.flip();
    assert_eq!(s.current_side().text, "solo!");
    s.flip();
    assert_eq!(s.face(), Face::Front);
    assert_eq!(s.len(), 1);
}
