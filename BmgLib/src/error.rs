//! Error types for `BmgLib`

use thiserror::Error;

use crate::formats::bmg::Charset;

/// The error type for `BmgLib` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Container Errors ====================
    /// The file is not a valid BMG container (missing `MESGbmg1` magic).
    #[error("invalid BMG magic: expected MESGbmg1, found {0:?}")]
    InvalidMagic([u8; 8]),

    /// The container declares a text encoding other than UTF-16.
    #[error("unsupported BMG encoding: {0} (only UTF-16 is supported)")]
    UnsupportedEncoding(Charset),

    /// The data ended early, or the declared file size disagrees with the actual length.
    #[error("unexpected end of file: {context}")]
    UnexpectedEof {
        /// What was being read when the data ran out.
        context: String,
    },

    /// A section header declares a size smaller than the header itself.
    #[error("invalid size {size} for section {tag}")]
    InvalidSectionSize {
        /// The section tag as text (e.g. `INF1`).
        tag: String,
        /// The declared section size.
        size: u32,
    },

    /// The INF1 entry count does not match the MID1 key count.
    #[error("mismatched tables: INF1 has {entries} entries but MID1 has {keys} keys")]
    MismatchedTables {
        /// Number of INF1 entries.
        entries: usize,
        /// Number of MID1 keys.
        keys: usize,
    },

    // ==================== Section Errors ====================
    /// Structural violation inside the INF1 section.
    #[error("malformed INF1 section: {0}")]
    MalformedInf(String),

    /// Structural violation inside the DAT1 string pool.
    #[error("malformed DAT1 section: {0}")]
    MalformedDat(String),

    /// Structural violation inside the MID1 section.
    #[error("malformed MID1 section: {0}")]
    MalformedMid(String),

    // ==================== XML Errors ====================
    /// The XML document could not be parsed or does not follow the message layout.
    #[error("malformed XML: {0}")]
    MalformedXml(String),
}

impl Error {
    /// Shorthand for an [`Error::UnexpectedEof`] with the given context.
    pub(crate) fn eof(context: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            context: context.into(),
        }
    }
}

// Every quick-xml failure on the encode path is a malformed document
impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedXml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedXml(format!("attribute error: {err}"))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::MalformedXml(format!("invalid UTF-8: {err}"))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::MalformedXml(format!("invalid UTF-8: {err}"))
    }
}

/// A specialized Result type for `BmgLib` operations.
pub type Result<T> = std::result::Result<T, Error>;
