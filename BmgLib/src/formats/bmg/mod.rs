//! .bmg message container format
//!
//! Big-endian message tables made of three sections:
//! - `INF1` - one `(offset, attributes)` entry per message
//! - `DAT1` - pool of NUL-terminated UTF-16BE strings
//! - `MID1` - one 32-bit message key per message
//!
//! Can be converted to/from XML format.

mod dat;
mod editor;
mod header;
mod inf;
mod mid;
mod reader;
mod writer;

pub use dat::StringPool;
pub use editor::DocumentStats;
pub use header::{BmgHeader, Charset, Section, SectionHeader};
pub use inf::{InfEntry, InfHeader, InfTable};
pub use mid::{MidHeader, MidTable};
pub use reader::{parse_bmg_bytes, read_bmg};
pub use writer::{serialize_bmg, write_bmg};

/// "MESGbmg1" magic signature
pub const BMG_MAGIC: [u8; 8] = *b"MESGbmg1";

/// Size of the container header
pub const HEADER_SIZE: usize = 32;

/// Size of every section header (tag + size)
pub const SECTION_HEADER_SIZE: usize = 8;

/// Section tags
pub const TAG_INF1: [u8; 4] = *b"INF1";
pub const TAG_DAT1: [u8; 4] = *b"DAT1";
pub const TAG_MID1: [u8; 4] = *b"MID1";

/// Opaque 32-bit attribute word attached to each message.
///
/// Stored exactly as it appears on disk; `as_u32` reads it big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Attributes(pub [u8; 4]);

impl Attributes {
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<u32> for Attributes {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

/// Text of a single message.
///
/// Empty messages all share the reserved offset 0 of the string pool, so
/// emptiness is a variant of its own rather than an empty string.
/// `Text(String::new())` compares, hashes and encodes exactly like `Empty`.
#[derive(Debug, Clone, Default)]
pub enum MessageText {
    #[default]
    Empty,
    Text(String),
}

impl MessageText {
    /// The text, or `""` for [`MessageText::Empty`]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Text(text) => text,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl PartialEq for MessageText {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for MessageText {}

impl std::hash::Hash for MessageText {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for MessageText {
    fn from(text: String) -> Self {
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }
}

impl From<&str> for MessageText {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

/// A single message record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message identifier used by game code
    pub key: u32,
    /// Opaque attribute word (display properties in-game)
    pub attributes: Attributes,
    /// Message body
    pub text: MessageText,
}

impl Message {
    pub fn new(key: u32, attributes: u32, text: impl Into<MessageText>) -> Self {
        Self {
            key,
            attributes: Attributes::from_u32(attributes),
            text: text.into(),
        }
    }
}

/// An ordered table of messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BmgDocument {
    pub messages: Vec<Message>,
}

impl BmgDocument {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }
}

impl FromIterator<Message> for BmgDocument {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_empty_variant() {
        assert_eq!(MessageText::from(""), MessageText::Empty);
        assert_eq!(MessageText::from("Hi"), MessageText::Text("Hi".to_string()));
        assert_eq!(MessageText::Empty.as_str(), "");
    }

    #[test]
    fn test_empty_text_variant_equals_empty() {
        let blank = MessageText::Text(String::new());
        assert!(blank.is_empty());
        assert_eq!(blank, MessageText::Empty);
        assert_ne!(MessageText::from("a"), MessageText::Empty);
    }

    #[test]
    fn test_attributes_big_endian() {
        let attrs = Attributes::from_u32(0x0102_0304);
        assert_eq!(attrs.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(attrs.as_u32(), 0x0102_0304);
    }
}
