use crate::{Deck, Topic};

pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Deck {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Topic {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive prefix search on names. A blank query keeps everything.
pub fn filter_by_name<T: Named + Clone>(items: &[T], query: &str) -> Vec<T> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|x| x.name().to_lowercase().starts_with(&q))
        .cloned()
        .collect()
}
