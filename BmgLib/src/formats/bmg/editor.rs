//! BMG document lookup and editing
//!
//! Messages are addressed by key. Keys are not required to be unique, so
//! lookups act on the first match and [`BmgDocument::duplicate_keys`] is
//! available as a diagnostic.

use super::{BmgDocument, Message, MessageText};
use std::collections::HashSet;

/// Summary counts for a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Number of messages
    pub messages: usize,
    /// Messages with empty text
    pub empty: usize,
    /// Total characters across all messages
    pub characters: usize,
}

// ============================================================================
// BmgDocument editing methods
// ============================================================================

impl BmgDocument {
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message, keeping document order
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// First message with the given key
    #[must_use]
    pub fn get(&self, key: u32) -> Option<&Message> {
        self.messages.iter().find(|m| m.key == key)
    }

    pub fn get_mut(&mut self, key: u32) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.key == key)
    }

    #[must_use]
    pub fn contains_key(&self, key: u32) -> bool {
        self.messages.iter().any(|m| m.key == key)
    }

    /// Replace the text of the first message with `key`
    ///
    /// # Returns
    /// `true` if the message was found and updated, `false` if not found
    pub fn set_text(&mut self, key: u32, text: impl Into<MessageText>) -> bool {
        if let Some(message) = self.get_mut(key) {
            message.text = text.into();
            true
        } else {
            false
        }
    }

    /// Remove the first message with `key`
    pub fn remove(&mut self, key: u32) -> Option<Message> {
        let pos = self.messages.iter().position(|m| m.key == key)?;
        Some(self.messages.remove(pos))
    }

    /// Messages whose text contains `query`
    #[must_use]
    pub fn find_by_text(&self, query: &str, case_sensitive: bool) -> Vec<&Message> {
        if case_sensitive {
            self.messages
                .iter()
                .filter(|m| m.text.as_str().contains(query))
                .collect()
        } else {
            let query_lower = query.to_lowercase();
            self.messages
                .iter()
                .filter(|m| m.text.as_str().to_lowercase().contains(&query_lower))
                .collect()
        }
    }

    /// Keys that appear more than once, in order of their second appearance
    #[must_use]
    pub fn duplicate_keys(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.messages
            .iter()
            .filter(|m| !seen.insert(m.key) && reported.insert(m.key))
            .map(|m| m.key)
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            messages: self.messages.len(),
            empty: self.messages.iter().filter(|m| m.text.is_empty()).count(),
            characters: self
                .messages
                .iter()
                .map(|m| m.text.as_str().chars().count())
                .sum(),
        }
    }
}
