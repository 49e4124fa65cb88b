//! # `BmgLib`
//!
//! A pure-Rust library for reading, writing, and converting `.bmg` message
//! tables, the big-endian `MESGbmg1` container used by Nintendo titles for
//! localized text.
//!
//! ## Supported Formats
//!
//! - **BMG** - UTF-16 message containers with `INF1`, `DAT1` and `MID1` sections
//! - **XML** - Editable `<root>` / `<str>` representation of a message table
//!
//! ## Quick Start
//!
//! ### Converting Files
//!
//! ```no_run
//! use bmglib::converter::{convert_bmg_to_xml, convert_xml_to_bmg};
//!
//! convert_bmg_to_xml("message.bmg", "message.xml")?;
//! convert_xml_to_bmg("message.xml", "message.bmg")?;
//! # Ok::<(), bmglib::Error>(())
//! ```
//!
//! ### Converting Bytes
//!
//! ```
//! use bmglib::{decode_bmg, encode_bmg};
//!
//! let xml = br#"<root><str key="1" attributes="0">Hi</str></root>"#;
//! let bmg = encode_bmg(xml)?;
//! let round_trip = decode_bmg(&bmg)?;
//! assert!(String::from_utf8_lossy(&round_trip).contains(">Hi</str>"));
//! # Ok::<(), bmglib::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use bmglib::prelude::*;
//!
//! let mut document = BmgDocument::new();
//! document.push(Message::new(100, 0, "Welcome!"));
//! let bytes = serialize_bmg(&document)?;
//! assert_eq!(parse_bmg_bytes(&bytes)?, document);
//! # Ok::<(), bmglib::Error>(())
//! ```

pub mod converter;
pub mod error;
pub mod formats;
pub mod utils;

// Re-exports for convenience
pub use converter::{decode_bmg, encode_bmg};
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::bmg::{
        Attributes, BmgDocument, Message, MessageText, parse_bmg_bytes, read_bmg,
        serialize_bmg, write_bmg,
    };

    pub use crate::converter;
    pub use crate::converter::{
        ConvertPhase, ConvertProgress, convert_bmg_to_xml, convert_xml_to_bmg, decode_bmg,
        encode_bmg,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
