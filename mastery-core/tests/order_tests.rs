use mastery_core::order::{append, is_dense, move_index, move_to, normalize, remove_at, Ordered};
use mastery_core::{CoreError, Topic};

fn topics(names: &[&str]) -> Vec<Topic> {
    let mut v = Vec::new();
    for n in names {
        append(&mut v, Topic::new(*n, 0));
    }
    v
}

fn names(v: &[Topic]) -> Vec<&str> {
    v.iter().map(|t| t.name.as_str()).collect()
}

fn orders(v: &[Topic]) -> Vec<usize> {
    v.iter().map(|t| t.order()).collect()
}

#[test]
fn append_puts_newest_first() {
    let v = topics(&["a", "b", "c"]);
    assert_eq!(names(&v), ["c", "b", "a"]);
    assert_eq!(orders(&v), [2, 1, 0]);
}

#[test]
fn remove_shifts_higher_orders_down() {
    let mut v = topics(&["a", "b", "c", "d"]);
    // display: d c b a
    let gone = remove_at(&mut v, 1).unwrap();
    assert_eq!(gone.name, "c");
    assert_eq!(names(&v), ["d", "b", "a"]);
    assert_eq!(orders(&v), [2, 1, 0]);
}

#[test]
fn remove_out_of_range_leaves_items_alone() {
    let mut v = topics(&["a", "b"]);
    let before = v.clone();
    assert_eq!(
        remove_at(&mut v, 2).unwrap_err(),
        CoreError::InvalidIndex { index: 2, len: 2 }
    );
    assert_eq!(v, before);
}

#[test]
fn move_down_and_up() {
    let mut v = topics(&["a", "b", "c", "d"]);
    let d = v[0].id;
    move_to(&mut v, d, 2).unwrap();
    assert_eq!(names(&v), ["c", "b", "d", "a"]);
    assert_eq!(orders(&v), [3, 2, 1, 0]);

    let a = v[3].id;
    move_to(&mut v, a, 0).unwrap();
    assert_eq!(names(&v), ["a", "c", "b", "d"]);
    assert!(is_dense(&v));
}

#[test]
fn move_only_touches_the_span() {
    let mut v = topics(&["a", "b", "c", "d", "e"]);
    let untouched_head = v[0].clone();
    let untouched_tail = v[4].clone();
    move_index(&mut v, 1, 3).unwrap();
    assert_eq!(v[0], untouched_head);
    assert_eq!(v[4], untouched_tail);
    assert_eq!(orders(&v), [4, 3, 2, 1, 0]);
}

#[test]
fn move_to_same_position_changes_nothing() {
    let mut v = topics(&["a", "b", "c"]);
    let before = v.clone();
    let id = v[1].id;
    move_to(&mut v, id, 1).unwrap();
    assert_eq!(v, before);
}

#[test]
fn repeating_a_move_is_idempotent() {
    let mut v = topics(&["a", "b", "c"]);
    let id = v[0].id;
    move_to(&mut v, id, 2).unwrap();
    let once = v.clone();
    move_to(&mut v, id, 2).unwrap();
    assert_eq!(v, once);
}

#[test]
fn move_rejects_bad_destination() {
    let mut v = topics(&["a", "b"]);
    let before = v.clone();
    let id = v[0].id;
    assert_eq!(
        move_to(&mut v, id, 5).unwrap_err(),
        CoreError::InvalidIndex { index: 5, len: 2 }
    );
    assert!(matches!(
        move_index(&mut v, 7, 0),
        Err(CoreError::InvalidIndex { index: 7, .. })
    ));
    assert_eq!(v, before);
}

#[test]
fn single_item_move_in_place_is_fine() {
    let mut v = topics(&["only"]);
    let id = v[0].id;
    move_to(&mut v, id, 0).unwrap();
    assert_eq!(orders(&v), [0]);
}

#[test]
fn mixed_operations_stay_dense() {
    let mut v = topics(&["a", "b", "c", "d", "e", "f"]);
    move_index(&mut v, 5, 0).unwrap();
    remove_at(&mut v, 2).unwrap();
    append(&mut v, Topic::new("g", 0));
    move_index(&mut v, 0, 4).unwrap();
    remove_at(&mut v, 0).unwrap();
    move_index(&mut v, 3, 1).unwrap();
    assert_eq!(v.len(), 5);
    assert!(is_dense(&v));
    assert_eq!(orders(&v), [4, 3, 2, 1, 0]);
}

#[test]
fn normalize_repairs_gaps_and_duplicates() {
    let mut v = topics(&["a", "b", "c"]);
    v[0].order = 9;
    v[1].order = 4;
    v[2].order = 4;
    assert!(!is_dense(&v));
    assert!(normalize(&mut v));
    assert_eq!(names(&v), ["c", "b", "a"]);
    assert!(is_dense(&v));
    assert!(!normalize(&mut v));
}
