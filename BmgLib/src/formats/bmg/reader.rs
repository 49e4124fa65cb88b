//! `.bmg` file reading and parsing
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::{
    BmgDocument, BmgHeader, HEADER_SIZE, InfTable, Message, MessageText, MidTable, Section,
    SectionHeader, StringPool,
};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Read a .bmg file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, or any of the
/// parse errors documented on [`parse_bmg_bytes`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_bmg<P: AsRef<Path>>(path: P) -> Result<BmgDocument> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    parse_bmg_bytes(&buffer)
}

/// Parse .bmg data from bytes
///
/// # Errors
///
/// - [`Error::InvalidMagic`] if the data does not start with `MESGbmg1`.
/// - [`Error::UnexpectedEof`] if the declared size disagrees with the data or a section is truncated.
/// - [`Error::UnsupportedEncoding`] if the charset is not UTF-16.
/// - [`Error::MalformedInf`], [`Error::MalformedDat`], [`Error::MalformedMid`] for broken or missing sections.
/// - [`Error::MismatchedTables`] if INF1 and MID1 disagree on the message count.
pub fn parse_bmg_bytes(data: &[u8]) -> Result<BmgDocument> {
    let header = BmgHeader::read(data)?;
    tracing::debug!(
        "BMG header: {} bytes, {} sections, charset {}",
        header.file_size,
        header.section_count,
        header.charset
    );

    let mut cursor = Cursor::new(data);
    cursor.set_position(HEADER_SIZE as u64);

    let mut inf: Option<InfTable> = None;
    let mut dat: Option<StringPool> = None;
    let mut mid: Option<MidTable> = None;

    for _ in 0..header.section_count {
        let section_header = SectionHeader::read(&mut cursor)?;
        let body_len = section_header.body_len()?;

        let start = cursor.position() as usize;
        let end = start
            .checked_add(body_len)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| {
                Error::eof(format!(
                    "section {} declares {} bytes but only {} remain",
                    section_header.tag_name(),
                    section_header.size,
                    data.len() - start + 8
                ))
            })?;
        cursor.set_position(end as u64);

        match Section::parse(section_header.tag, &data[start..end])? {
            Section::Inf(table) => replace_section(&mut inf, table, "INF1"),
            Section::Dat(pool) => replace_section(&mut dat, pool, "DAT1"),
            Section::Mid(table) => replace_section(&mut mid, table, "MID1"),
            Section::Unknown { tag, len } => {
                tracing::warn!(
                    "Skipping unhandled section {} ({len} bytes)",
                    String::from_utf8_lossy(&tag)
                );
            }
        }
    }

    let trailing = data.len() - cursor.position() as usize;
    if trailing > 0 {
        tracing::debug!("Ignoring {trailing} bytes after the last section");
    }

    let inf = inf.ok_or_else(|| Error::MalformedInf("missing INF1 section".to_string()))?;
    let dat = dat.ok_or_else(|| Error::MalformedDat("missing DAT1 section".to_string()))?;
    let mid = mid.ok_or_else(|| Error::MalformedMid("missing MID1 section".to_string()))?;

    if inf.entries.len() != mid.keys.len() {
        return Err(Error::MismatchedTables {
            entries: inf.entries.len(),
            keys: mid.keys.len(),
        });
    }

    let messages = inf
        .entries
        .iter()
        .zip(&mid.keys)
        .map(|(entry, &key)| {
            let text = dat.read_at(entry.offset)?;
            Ok(Message {
                key,
                attributes: entry.attributes,
                text: MessageText::from(text),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Parsed {} messages", messages.len());
    Ok(BmgDocument { messages })
}

/// Store a decoded section, warning if the tag was already seen
fn replace_section<T>(slot: &mut Option<T>, section: T, tag: &str) {
    if slot.replace(section).is_some() {
        tracing::warn!("Duplicate {tag} section, keeping the last one");
    }
}
