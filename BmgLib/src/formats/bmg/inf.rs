//! INF1 info table
//!
//! Header: entry count (u16), entry length (u16), group id (u16),
//! default color (u8), one reserved byte. Each entry is a DAT1 offset (u32)
//! followed by the 4-byte attribute word.

use super::Attributes;
use crate::error::{Error, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

/// Size of the INF1 header inside the section body
const INF_HEADER_SIZE: usize = 8;

/// Size of one info entry; the only layout this codec understands
pub const INF_ENTRY_SIZE: u16 = 8;

/// Zero words written after the last entry
const TRAILER_WORDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfHeader {
    pub entry_count: u16,
    pub entry_length: u16,
    pub group_id: u16,
    pub default_color: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfEntry {
    /// Byte offset of the message text inside the DAT1 payload
    pub offset: u32,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfTable {
    pub header: InfHeader,
    pub entries: Vec<InfEntry>,
}

impl InfTable {
    /// Build a table for encoding; group id and default color are always 0
    pub fn from_entries(entries: Vec<InfEntry>) -> Result<Self> {
        let entry_count = u16::try_from(entries.len()).map_err(|_| {
            Error::MalformedInf(format!(
                "{} entries exceed the 65535 entry limit",
                entries.len()
            ))
        })?;

        Ok(Self {
            header: InfHeader {
                entry_count,
                entry_length: INF_ENTRY_SIZE,
                group_id: 0,
                default_color: 0,
            },
            entries,
        })
    }

    /// Parse an INF1 section body (everything after the section header)
    pub fn decode(body: &[u8]) -> Result<Self> {
        if body.len() < INF_HEADER_SIZE {
            return Err(Error::MalformedInf(format!(
                "body is {} bytes, shorter than the {INF_HEADER_SIZE}-byte header",
                body.len()
            )));
        }

        let mut cursor = Cursor::new(body);
        let entry_count = cursor.read_u16::<BigEndian>()?;
        let entry_length = cursor.read_u16::<BigEndian>()?;
        let group_id = cursor.read_u16::<BigEndian>()?;
        let default_color = cursor.read_u8()?;
        let _reserved = cursor.read_u8()?;

        if entry_length != INF_ENTRY_SIZE {
            return Err(Error::MalformedInf(format!(
                "unsupported entry length {entry_length} (expected {INF_ENTRY_SIZE})"
            )));
        }

        let needed = INF_HEADER_SIZE + usize::from(entry_count) * usize::from(entry_length);
        if body.len() < needed {
            return Err(Error::MalformedInf(format!(
                "{entry_count} entries need {needed} bytes but body is {} bytes",
                body.len()
            )));
        }

        let mut entries = Vec::with_capacity(usize::from(entry_count));
        for _ in 0..entry_count {
            let offset = cursor.read_u32::<BigEndian>()?;
            let mut attributes = [0u8; 4];
            cursor.read_exact(&mut attributes)?;
            entries.push(InfEntry {
                offset,
                attributes: Attributes(attributes),
            });
        }

        tracing::debug!(
            "INF1: {} entries, group {}, default color {}",
            entry_count,
            group_id,
            default_color
        );

        Ok(Self {
            header: InfHeader {
                entry_count,
                entry_length,
                group_id,
                default_color,
            },
            entries,
        })
    }

    /// Serialize header, entries and the 24-byte trailer
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(
            INF_HEADER_SIZE + self.entries.len() * usize::from(INF_ENTRY_SIZE) + TRAILER_WORDS * 4,
        );

        output.write_u16::<BigEndian>(self.header.entry_count)?;
        output.write_u16::<BigEndian>(self.header.entry_length)?;
        output.write_u16::<BigEndian>(self.header.group_id)?;
        output.write_u8(self.header.default_color)?;
        output.write_u8(0)?;

        for entry in &self.entries {
            output.write_u32::<BigEndian>(entry.offset)?;
            output.write_all(entry.attributes.as_bytes())?;
        }

        for _ in 0..TRAILER_WORDS {
            output.write_u32::<BigEndian>(0)?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(offset: u32, attributes: u32) -> InfEntry {
        InfEntry {
            offset,
            attributes: Attributes::from_u32(attributes),
        }
    }

    #[test]
    fn test_encode_layout() {
        let table = InfTable::from_entries(vec![entry(2, 3)]).unwrap();
        let bytes = table.encode().unwrap();

        let mut expected = vec![0x00, 0x01, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];
        expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03]);
        expected.extend_from_slice(&[0u8; 24]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_decode_ignores_trailer() {
        let table = InfTable::from_entries(vec![entry(2, 7), entry(0, 0xFFFF_FFFF)]).unwrap();
        let decoded = InfTable::decode(&table.encode().unwrap()).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn test_decode_keeps_group_and_color() {
        let body = [0x00, 0x00, 0x00, 0x08, 0x00, 0x05, 0x09, 0x00];
        let table = InfTable::decode(&body).unwrap();
        assert_eq!(table.header.group_id, 5);
        assert_eq!(table.header.default_color, 9);
        assert!(table.entries.is_empty());
    }

    #[test]
    fn test_decode_rejects_entry_length() {
        let body = [0x00, 0x00, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(InfTable::decode(&body), Err(Error::MalformedInf(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_entries() {
        let mut body = vec![0x00, 0x02, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];
        body.extend_from_slice(&[0u8; 12]);
        assert!(matches!(InfTable::decode(&body), Err(Error::MalformedInf(_))));
    }

    #[test]
    fn test_decode_rejects_short_header() {
        assert!(matches!(InfTable::decode(&[0, 1]), Err(Error::MalformedInf(_))));
    }

    #[test]
    fn test_too_many_entries() {
        let entries = vec![entry(0, 0); usize::from(u16::MAX) + 1];
        assert!(matches!(
            InfTable::from_entries(entries),
            Err(Error::MalformedInf(_))
        ));
    }
}
