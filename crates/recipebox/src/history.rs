//! Recently viewed recipes.

/// Append-only stack of viewed recipe names.
///
/// Only the top is ever read back. The history lives for the process
/// lifetime and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStack {
    entries: Vec<String>,
}

impl HistoryStack {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a viewed recipe name.
    pub fn push(&mut self, name: impl Into<String>) {
        self.entries.push(name.into());
    }

    /// The most recently pushed name.
    #[must_use]
    pub fn peek_last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Number of recorded views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been viewed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
