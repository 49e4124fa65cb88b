//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Format conversion utilities
//!
//! - BMG (binary) ↔ XML - Message table formats

pub mod bmg;

use std::fmt;

/// Stage of a file conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    ReadingSource,
    Parsing,
    Converting,
    WritingOutput,
    Complete,
}

impl ConvertPhase {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadingSource => "Reading source",
            Self::Parsing => "Parsing",
            Self::Converting => "Converting",
            Self::WritingOutput => "Writing output",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for ConvertPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress update passed to a [`ConvertProgressCallback`]
#[derive(Debug, Clone)]
pub struct ConvertProgress {
    pub phase: ConvertPhase,
    /// Current step (1-based)
    pub current: usize,
    pub total: usize,
    /// Human-readable description of the step
    pub message: Option<String>,
}

impl ConvertProgress {
    #[must_use]
    pub fn new(phase: ConvertPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            message: None,
        }
    }

    #[must_use]
    pub fn with_file(
        phase: ConvertPhase,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            message: Some(message.into()),
        }
    }
}

/// Progress callback type for conversion operations.
pub type ConvertProgressCallback<'a> = &'a dyn Fn(&ConvertProgress);

// BMG conversion exports
pub use bmg::{
    bmg_from_xml, bmg_to_xml_string, convert_bmg_to_xml, convert_bmg_to_xml_with_progress,
    convert_xml_to_bmg, convert_xml_to_bmg_with_progress, decode_bmg, encode_bmg,
};
