//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! BMG and XML message table conversions
//!
//! The XML form is a `<root>` element holding one `<str key=".." attributes="..">`
//! per message, in file order.

mod bmg_to_xml;
mod placeholders;
mod xml_to_bmg;

pub use bmg_to_xml::{
    convert_bmg_to_xml, convert_bmg_to_xml_with_progress, decode_bmg, to_xml,
    to_xml as bmg_to_xml_string,
};
pub use placeholders::{
    GREATER_THAN_PLACEHOLDER, LESS_THAN_PLACEHOLDER, NULL_STRING_PLACEHOLDER,
};
pub use xml_to_bmg::{
    convert_xml_to_bmg, convert_xml_to_bmg_with_progress, encode_bmg, from_xml,
    from_xml as bmg_from_xml,
};

/// Root element name
const ROOT_ELEMENT: &str = "root";

/// Per-message element name
const STR_ELEMENT: &str = "str";

const KEY_ATTRIBUTE: &str = "key";
const ATTRIBUTES_ATTRIBUTE: &str = "attributes";
