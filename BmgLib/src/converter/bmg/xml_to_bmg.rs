//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! XML to BMG conversion

use super::placeholders::decode_text;
use super::{ATTRIBUTES_ATTRIBUTE, KEY_ATTRIBUTE, ROOT_ELEMENT, STR_ELEMENT};
use crate::converter::{ConvertPhase, ConvertProgress, ConvertProgressCallback};
use crate::error::{Error, Result};
use crate::formats::bmg::{self, Attributes, BmgDocument, Message, MessageText};
use crate::utils::fs::write_user_file;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;

/// Where the reader is relative to the `<root>` / `<str>` structure
enum ParseState {
    BeforeRoot,
    InRoot,
    InStr(PendingMessage),
    /// Inside an element of `<root>` that is not `<str>`, at the given depth
    Skipping(usize),
    AfterRoot,
}

struct PendingMessage {
    key: u32,
    attributes: Attributes,
    content: String,
}

/// Encode UTF-8 XML bytes into .bmg bytes
///
/// # Errors
/// Returns [`Error::MalformedXml`] for invalid input, or any encoding error
/// from [`bmg::serialize_bmg`].
pub fn encode_bmg(xml: &[u8]) -> Result<Vec<u8>> {
    let content = std::str::from_utf8(xml)?;
    let document = from_xml(content)?;
    bmg::serialize_bmg(&document)
}

/// Convert XML file to .bmg format
///
/// # Errors
/// Returns an error if reading or conversion fails.
pub fn convert_xml_to_bmg<P: AsRef<Path>>(source: P, dest: P) -> Result<()> {
    convert_xml_to_bmg_with_progress(source, dest, &|_| {})
}

/// Convert XML file to .bmg format with progress callback
///
/// # Errors
/// Returns an error if reading or conversion fails.
pub fn convert_xml_to_bmg_with_progress<P: AsRef<Path>>(
    source: P,
    dest: P,
    progress: ConvertProgressCallback,
) -> Result<()> {
    tracing::info!(
        "Converting XML→BMG: {:?} → {:?}",
        source.as_ref(),
        dest.as_ref()
    );

    progress(&ConvertProgress::with_file(
        ConvertPhase::ReadingSource,
        1,
        4,
        "Reading XML file...",
    ));
    let data = fs::read(&source)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::Parsing,
        2,
        4,
        "Parsing XML content...",
    ));
    let document = from_xml(std::str::from_utf8(&data)?)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::Converting,
        3,
        4,
        format!("Encoding {} messages to BMG...", document.len()),
    ));
    let bytes = bmg::serialize_bmg(&document)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::WritingOutput,
        4,
        4,
        "Writing BMG file...",
    ));
    write_user_file(dest, &bytes)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 4, 4));
    tracing::info!("Conversion complete");
    Ok(())
}

/// Parse XML string to `BmgDocument`
///
/// # Errors
/// Returns [`Error::MalformedXml`] if the XML is not well formed or does not
/// follow the `<root>` / `<str>` layout.
pub fn from_xml(content: &str) -> Result<BmgDocument> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);
    // Leading/trailing whitespace is part of the message text
    reader.trim_text(false);

    let mut messages = Vec::new();
    let mut buf = Vec::new();
    let mut state = ParseState::BeforeRoot;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => state = on_start(&state, &e)?,
            Event::Empty(e) => state = on_empty(state, &e, &mut messages)?,
            Event::Text(e) => match &mut state {
                ParseState::InStr(pending) => pending.content.push_str(&e.unescape()?),
                ParseState::BeforeRoot | ParseState::AfterRoot => {
                    reject_stray_text(&e.unescape()?)?;
                }
                _ => {}
            },
            Event::CData(e) => match &mut state {
                ParseState::InStr(pending) => pending.content.push_str(std::str::from_utf8(&e)?),
                ParseState::BeforeRoot | ParseState::AfterRoot => {
                    reject_stray_text(std::str::from_utf8(&e)?)?;
                }
                _ => {}
            },
            Event::End(_) => {
                state = match state {
                    ParseState::InStr(pending) => {
                        messages.push(Message {
                            key: pending.key,
                            attributes: pending.attributes,
                            text: decode_text(&pending.content),
                        });
                        ParseState::InRoot
                    }
                    ParseState::Skipping(1) => ParseState::InRoot,
                    ParseState::Skipping(depth) => ParseState::Skipping(depth - 1),
                    ParseState::InRoot => ParseState::AfterRoot,
                    // The reader rejects unmatched end tags
                    other => other,
                };
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    match state {
        ParseState::AfterRoot => {
            tracing::debug!("Parsed {} messages from XML", messages.len());
            Ok(BmgDocument { messages })
        }
        ParseState::BeforeRoot => Err(Error::MalformedXml("missing <root> element".to_string())),
        _ => Err(Error::MalformedXml("unclosed <root> element".to_string())),
    }
}

fn on_start(state: &ParseState, e: &BytesStart) -> Result<ParseState> {
    match state {
        ParseState::BeforeRoot => {
            expect_root(e)?;
            Ok(ParseState::InRoot)
        }
        ParseState::InRoot if e.name().as_ref() == STR_ELEMENT.as_bytes() => {
            let (key, attributes) = read_str_attributes(e)?;
            Ok(ParseState::InStr(PendingMessage {
                key,
                attributes,
                content: String::new(),
            }))
        }
        ParseState::InRoot => {
            tracing::debug!("Skipping unknown element <{}>", element_name(e));
            Ok(ParseState::Skipping(1))
        }
        ParseState::InStr(pending) => Err(Error::MalformedXml(format!(
            "unexpected element <{}> inside <str key=\"{}\">",
            element_name(e),
            pending.key
        ))),
        ParseState::Skipping(depth) => Ok(ParseState::Skipping(depth + 1)),
        ParseState::AfterRoot => Err(Error::MalformedXml(format!(
            "unexpected element <{}> after </root>",
            element_name(e)
        ))),
    }
}

/// Self-closing elements: `<root/>` and `<str .../>` carry no text
fn on_empty(
    state: ParseState,
    e: &BytesStart,
    messages: &mut Vec<Message>,
) -> Result<ParseState> {
    match state {
        ParseState::BeforeRoot => {
            expect_root(e)?;
            Ok(ParseState::AfterRoot)
        }
        ParseState::InRoot if e.name().as_ref() == STR_ELEMENT.as_bytes() => {
            let (key, attributes) = read_str_attributes(e)?;
            messages.push(Message {
                key,
                attributes,
                text: MessageText::Empty,
            });
            Ok(ParseState::InRoot)
        }
        ParseState::InRoot => {
            tracing::debug!("Skipping unknown element <{}/>", element_name(e));
            Ok(ParseState::InRoot)
        }
        ParseState::InStr(pending) => Err(Error::MalformedXml(format!(
            "unexpected element <{}/> inside <str key=\"{}\">",
            element_name(e),
            pending.key
        ))),
        ParseState::AfterRoot => Err(Error::MalformedXml(format!(
            "unexpected element <{}/> after </root>",
            element_name(e)
        ))),
        skipping @ ParseState::Skipping(_) => Ok(skipping),
    }
}

/// Only whitespace may surround the document element
fn reject_stray_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        Ok(())
    } else {
        Err(Error::MalformedXml(format!(
            "text {:?} outside <{ROOT_ELEMENT}>",
            text.trim()
        )))
    }
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn expect_root(e: &BytesStart) -> Result<()> {
    if e.name().as_ref() == ROOT_ELEMENT.as_bytes() {
        Ok(())
    } else {
        Err(Error::MalformedXml(format!(
            "expected <{ROOT_ELEMENT}> as document element, found <{}>",
            element_name(e)
        )))
    }
}

/// Read `key` (required) and `attributes` (defaults to 0) from a `<str>` element
fn read_str_attributes(e: &BytesStart) -> Result<(u32, Attributes)> {
    let mut key = None;
    let mut attributes = 0;

    for attr in e.attributes() {
        let attr = attr?;
        let name = attr.key.as_ref();
        if name == KEY_ATTRIBUTE.as_bytes() {
            key = Some(parse_u32(KEY_ATTRIBUTE, &attr.unescape_value()?)?);
        } else if name == ATTRIBUTES_ATTRIBUTE.as_bytes() {
            attributes = parse_u32(ATTRIBUTES_ATTRIBUTE, &attr.unescape_value()?)?;
        }
    }

    let key = key.ok_or_else(|| {
        Error::MalformedXml(format!("<{STR_ELEMENT}> element without a {KEY_ATTRIBUTE} attribute"))
    })?;
    Ok((key, Attributes::from_u32(attributes)))
}

fn parse_u32(name: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|err| {
        Error::MalformedXml(format!("invalid {name} value {value:?}: {err}"))
    })
}
