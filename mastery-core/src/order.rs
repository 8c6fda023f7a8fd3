//! Dense sibling ordering for decks and topics.
//!
//! Siblings are stored in display order: the highest `order` comes first and the last
//! element has order 0. Every operation here leaves the orders as exactly
//! `{0, .., len - 1}`.

use crate::{CoreError, Deck, Topic};
use uuid::Uuid;

pub trait Ordered {
    fn id(&self) -> Uuid;
    fn order(&self) -> usize;
    fn set_order(&mut self, order: usize);
}

impl Ordered for Deck {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order(&self) -> usize {
        self.order
    }
    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl Ordered for Topic {
    fn id(&self) -> Uuid {
        self.id
    }
    fn order(&self) -> usize {
        self.order
    }
    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

pub fn position<T: Ordered>(items: &[T], id: Uuid) -> Option<usize> {
    items.iter().position(|x| x.id() == id)
}

/// Adds `item` as the highest order, i.e. first displayed.
pub fn append<T: Ordered>(items: &mut Vec<T>, mut item: T) {
    item.set_order(items.len());
    items.insert(0, item);
}

/// Removes the item at display `index`; everything ordered above it shifts down by one.
pub fn remove_at<T: Ordered>(items: &mut Vec<T>, index: usize) -> Result<T, CoreError> {
    if index >= items.len() {
        return Err(CoreError::InvalidIndex {
            index,
            len: items.len(),
        });
    }
    let removed = items.remove(index);
    for item in items.iter_mut() {
        if item.order() > removed.order() {
            item.set_order(item.order() - 1);
        }
    }
    Ok(removed)
}

/// Moves the item identified by `id` to display position `to`.
///
/// Only the items between the old and new positions are renumbered. Repeating the
/// same call is a no-op since the item is already at `to`.
pub fn move_to<T: Ordered>(items: &mut [T], id: Uuid, to: usize) -> Result<(), CoreError> {
    let len = items.len();
    if to >= len {
        return Err(CoreError::InvalidIndex { index: to, len });
    }
    let from = position(items, id).ok_or(CoreError::NotFound("sibling"))?;
    if from == to {
        return Ok(());
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
    let (lo, hi) = (from.min(to), from.max(to));
    for (i, item) in items.iter_mut().enumerate().take(hi + 1).skip(lo) {
        item.set_order(len - 1 - i);
    }
    Ok(())
}

/// Moves whatever sits at display position `from` to `to`.
pub fn move_index<T: Ordered>(items: &mut [T], from: usize, to: usize) -> Result<(), CoreError> {
    let id = items
        .get(from)
        .map(|x| x.id())
        .ok_or(CoreError::InvalidIndex {
            index: from,
            len: items.len(),
        })?;
    move_to(items, id, to)
}

/// Sorts by order (highest first) and rewrites the orders densely.
///
/// Used to repair data loaded from outside, where gaps or duplicates may exist.
/// Ties keep their existing relative position.
pub fn normalize<T: Ordered>(items: &mut [T]) -> bool {
    items.sort_by(|a, b| b.order().cmp(&a.order()));
    let len = items.len();
    let mut changed = false;
    for (i, item) in items.iter_mut().enumerate() {
        if item.order() != len - 1 - i {
            item.set_order(len - 1 - i);
            changed = true;
        }
    }
    changed
}

pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    let len = items.len();
    let mut seen = vec![false; len];
    for item in items {
        match seen.get_mut(item.order()) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
