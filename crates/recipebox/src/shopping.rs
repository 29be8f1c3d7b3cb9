//! The shopping queue: ingredient names waiting to be bought.

use std::collections::VecDeque;

/// FIFO queue of ingredient names.
///
/// The queue itself accepts duplicates; callers that bulk-add a recipe's
/// ingredients are responsible for suppressing them (see
/// [`crate::RecipeBook::queue_ingredients`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingQueue {
    items: VecDeque<String>,
}

impl ShoppingQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to the back of the queue.
    pub fn enqueue(&mut self, item: impl Into<String>) {
        self.items.push_back(item.into());
    }

    /// Remove and return the oldest item, or `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    /// The item that would be dequeued next.
    #[must_use]
    pub fn front(&self) -> Option<&str> {
        self.items.front().map(String::as_str)
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item equal to `item` (trimmed, ignoring case) is queued.
    #[must_use]
    pub fn contains_normalized(&self, item: &str) -> bool {
        let wanted = normalize(item);
        self.items.iter().any(|queued| normalize(queued) == wanted)
    }
}

impl FromIterator<String> for ShoppingQueue {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Comparison key for queue deduplication.
pub(crate) fn normalize(item: &str) -> String {
    item.trim().to_uppercase()
}
