//! `.bmg` file writing
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::{
    BmgDocument, BmgHeader, Charset, HEADER_SIZE, InfEntry, InfTable, MidTable,
    SECTION_HEADER_SIZE, SectionHeader, StringPool, TAG_DAT1, TAG_INF1, TAG_MID1,
};
use crate::error::{Error, Result};
use crate::utils::fs::write_user_file;
use std::path::Path;

/// Sections written by the encoder: INF1, DAT1, MID1
const SECTION_COUNT: u32 = 3;

/// Write a .bmg file to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_bmg<P: AsRef<Path>>(path: P, document: &BmgDocument) -> Result<()> {
    let bytes = serialize_bmg(document)?;
    write_user_file(path, &bytes)?;
    Ok(())
}

/// Serialize a document to .bmg bytes
///
/// Empty messages point at offset 0; every other message gets its own copy
/// in the string pool. The DAT1, INF1 and MID1 trailers are always written.
///
/// # Errors
/// Returns [`Error::MalformedInf`] or [`Error::MalformedMid`] when there are
/// more than 65535 messages, or [`Error::MalformedDat`] if the string pool
/// outgrows 32-bit offsets.
pub fn serialize_bmg(document: &BmgDocument) -> Result<Vec<u8>> {
    let mut pool = StringPool::new();
    let mut entries = Vec::with_capacity(document.messages.len());
    let mut keys = Vec::with_capacity(document.messages.len());

    for message in &document.messages {
        // `Text("")` is as empty as `Empty`
        let offset = if message.text.is_empty() {
            0
        } else {
            pool.append(message.text.as_str())?
        };
        entries.push(InfEntry {
            offset,
            attributes: message.attributes,
        });
        keys.push(message.key);
    }
    pool.pad_trailer();

    let inf = InfTable::from_entries(entries)?.encode()?;
    let mid = MidTable::from_keys(keys)?.encode()?;
    let dat = pool.into_bytes();

    let file_size = HEADER_SIZE
        + SECTION_HEADER_SIZE
        + inf.len()
        + SECTION_HEADER_SIZE
        + dat.len()
        + SECTION_HEADER_SIZE
        + mid.len();
    let file_size = u32::try_from(file_size)
        .map_err(|_| Error::MalformedDat(format!("output of {file_size} bytes exceeds 4 GiB")))?;

    tracing::debug!(
        "Serializing {} messages: INF1 {} bytes, DAT1 {} bytes, MID1 {} bytes",
        document.messages.len(),
        inf.len(),
        dat.len(),
        mid.len()
    );

    let mut output = Vec::with_capacity(file_size as usize);
    BmgHeader {
        file_size,
        section_count: SECTION_COUNT,
        charset: Charset::Utf16,
    }
    .write(&mut output)?;

    for (tag, body) in [(TAG_INF1, &inf), (TAG_DAT1, &dat), (TAG_MID1, &mid)] {
        SectionHeader {
            tag,
            size: (SECTION_HEADER_SIZE + body.len()) as u32,
        }
        .write(&mut output)?;
        output.extend_from_slice(body);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::bmg::{Attributes, Message, MessageText, parse_bmg_bytes};

    fn be_u32(data: &[u8], at: usize) -> u32 {
        u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
    }

    #[test]
    fn test_single_message_layout() {
        let document: BmgDocument = [Message::new(1, 0, "Hi")].into_iter().collect();
        let bytes = serialize_bmg(&document).unwrap();

        assert_eq!(&bytes[..8], b"MESGbmg1");
        assert_eq!(be_u32(&bytes, 8) as usize, bytes.len());
        assert_eq!(be_u32(&bytes, 12), 3);
        assert_eq!(bytes[16], 2);

        // INF1: 8 header + 8 entry + 24 trailer
        assert_eq!(&bytes[32..36], b"INF1");
        assert_eq!(be_u32(&bytes, 36), 48);
        assert_eq!(be_u32(&bytes, 48), 2);

        // DAT1 follows INF1
        let dat = 32 + 48;
        assert_eq!(&bytes[dat..dat + 4], b"DAT1");
        assert_eq!(be_u32(&bytes, dat + 4), 8 + 36);
        let mut pool = vec![0x00, 0x00, 0x00, 0x48, 0x00, 0x69, 0x00, 0x00];
        pool.extend_from_slice(&[0u8; 28]);
        assert_eq!(&bytes[dat + 8..dat + 44], pool.as_slice());

        // MID1 closes the file
        let mid = dat + 44;
        assert_eq!(&bytes[mid..mid + 4], b"MID1");
        assert_eq!(be_u32(&bytes, mid + 4), 16 + 8);
        assert_eq!(&bytes[mid + 16..], &[0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(mid + 24, bytes.len());
    }

    #[test]
    fn test_empty_text_uses_offset_zero() {
        let document: BmgDocument = [
            Message::new(7, 3, MessageText::Empty),
            Message::new(8, 0, "x"),
            Message::new(9, 0, ""),
        ]
        .into_iter()
        .collect();
        let bytes = serialize_bmg(&document).unwrap();

        assert_eq!(be_u32(&bytes, 48), 0);
        assert_eq!(&bytes[52..56], &[0, 0, 0, 3]);
        assert_eq!(be_u32(&bytes, 56), 2);
        assert_eq!(be_u32(&bytes, 64), 0);
    }

    #[test]
    fn test_empty_text_variant_shares_offset_zero() {
        let document: BmgDocument = [Message::new(7, 3, MessageText::Text(String::new()))]
            .into_iter()
            .collect();
        let bytes = serialize_bmg(&document).unwrap();

        assert_eq!(be_u32(&bytes, 48), 0);
        // DAT1 holds only the reserved unit and the trailer
        assert_eq!(be_u32(&bytes, 32 + 48 + 4), 8 + 30);

        let decoded = parse_bmg_bytes(&bytes).unwrap();
        assert_eq!(decoded, document);
        assert!(matches!(decoded.messages[0].text, MessageText::Empty));
    }

    #[test]
    fn test_empty_document() {
        let bytes = serialize_bmg(&BmgDocument::new()).unwrap();
        // header + INF1 (8 + 32) + DAT1 (8 + 30) + MID1 (8 + 12)
        assert_eq!(bytes.len(), 32 + 40 + 38 + 20);
        assert_eq!(parse_bmg_bytes(&bytes).unwrap(), BmgDocument::new());
    }

    #[test]
    fn test_attributes_are_opaque() {
        let document: BmgDocument = [Message {
            key: 0xFFFF_FFFF,
            attributes: Attributes([0xDE, 0xAD, 0xBE, 0xEF]),
            text: "t".into(),
        }]
        .into_iter()
        .collect();
        let decoded = parse_bmg_bytes(&serialize_bmg(&document).unwrap()).unwrap();
        assert_eq!(decoded, document);
    }
}
