//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! BMG to XML conversion

use super::placeholders::{encode_text, escape_ampersand};
use super::{ATTRIBUTES_ATTRIBUTE, KEY_ATTRIBUTE, ROOT_ELEMENT, STR_ELEMENT};
use crate::converter::{ConvertPhase, ConvertProgress, ConvertProgressCallback};
use crate::error::Result;
use crate::formats::bmg::{self, BmgDocument};
use crate::utils::fs::write_user_file;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::path::Path;

/// Decode .bmg bytes into UTF-8 XML bytes
///
/// # Errors
/// Returns any error from [`bmg::parse_bmg_bytes`].
pub fn decode_bmg(data: &[u8]) -> Result<Vec<u8>> {
    let document = bmg::parse_bmg_bytes(data)?;
    Ok(to_xml(&document)?.into_bytes())
}

/// Convert .bmg file to XML format
///
/// # Errors
/// Returns an error if reading or conversion fails.
pub fn convert_bmg_to_xml<P: AsRef<Path>>(source: P, dest: P) -> Result<()> {
    convert_bmg_to_xml_with_progress(source, dest, &|_| {})
}

/// Convert .bmg file to XML format with progress callback
///
/// The destination is only written once the whole conversion succeeded.
///
/// # Errors
/// Returns an error if reading or conversion fails.
pub fn convert_bmg_to_xml_with_progress<P: AsRef<Path>>(
    source: P,
    dest: P,
    progress: ConvertProgressCallback,
) -> Result<()> {
    tracing::info!(
        "Converting BMG→XML: {:?} → {:?}",
        source.as_ref(),
        dest.as_ref()
    );

    progress(&ConvertProgress::with_file(
        ConvertPhase::ReadingSource,
        1,
        4,
        "Reading BMG file...",
    ));
    let data = std::fs::read(&source)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::Parsing,
        2,
        4,
        format!("Parsing {} bytes of BMG data...", data.len()),
    ));
    let document = bmg::parse_bmg_bytes(&data)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::Converting,
        3,
        4,
        format!("Converting {} messages to XML...", document.len()),
    ));
    let xml = to_xml(&document)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::WritingOutput,
        4,
        4,
        "Writing XML file...",
    ));
    write_user_file(dest, xml.as_bytes())?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 4, 4));
    tracing::info!("Conversion complete");
    Ok(())
}

/// Convert `BmgDocument` to XML string
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn to_xml(document: &BmgDocument) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b'\t', 1);

    // XML declaration
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    // <root>
    writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    for message in &document.messages {
        let mut element = BytesStart::new(STR_ELEMENT);
        element.push_attribute((KEY_ATTRIBUTE, message.key.to_string().as_str()));
        element.push_attribute((
            ATTRIBUTES_ATTRIBUTE,
            message.attributes.as_u32().to_string().as_str(),
        ));

        // Placeholders have already replaced < and >, so & is all that is left to escape
        let content = encode_text(&message.text);
        writer.write_event(Event::Start(element.borrow()))?;
        writer.write_event(Event::Text(BytesText::from_escaped(escape_ampersand(&content))))?;
        writer.write_event(Event::End(BytesEnd::new(STR_ELEMENT)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut xml = String::from_utf8(output)?;
    // Add trailing newline
    xml.push('\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::bmg::{Message, MessageText};

    #[test]
    fn test_layout() {
        let document: BmgDocument = [Message::new(1, 0, "Hi"), Message::new(2, 7, "")]
            .into_iter()
            .collect();
        let xml = to_xml(&document).unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <root>\n\
             \t<str key=\"1\" attributes=\"0\">Hi</str>\n\
             \t<str key=\"2\" attributes=\"7\">==== THIS STRING INTENTIONALLY LEFT NULL ====</str>\n\
             </root>\n"
        );
    }

    #[test]
    fn test_no_raw_angle_brackets_in_content() {
        let document: BmgDocument = [Message::new(1, 0, "<color=red>a & b</color>")]
            .into_iter()
            .collect();
        let xml = to_xml(&document).unwrap();

        assert!(xml.contains(
            ">##LESS_THAN_SYMBOL##color=red##GREATER_THAN_SYMBOL##a &amp; b\
             ##LESS_THAN_SYMBOL##/color##GREATER_THAN_SYMBOL##</str>"
        ));
    }

    #[test]
    fn test_attributes_as_decimal() {
        let document: BmgDocument = [Message {
            key: 4_294_967_295,
            attributes: crate::formats::bmg::Attributes([0x80, 0x00, 0x00, 0x01]),
            text: MessageText::from("x"),
        }]
        .into_iter()
        .collect();
        let xml = to_xml(&document).unwrap();
        assert!(xml.contains("<str key=\"4294967295\" attributes=\"2147483649\">x</str>"));
    }
}
