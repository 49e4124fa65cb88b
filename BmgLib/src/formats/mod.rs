//! File format handlers

pub mod bmg;

// Re-export main document types
pub use bmg::{
    Attributes, BmgDocument, Message, MessageText, parse_bmg_bytes, read_bmg, serialize_bmg,
    write_bmg,
};
