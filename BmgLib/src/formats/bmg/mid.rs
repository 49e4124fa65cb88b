//! MID1 message id table

use crate::error::{Error, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

const MID_HEADER_SIZE: usize = 8;

/// Format byte written by the encoder
pub const MID_FORMAT: u8 = 0x0A;

/// Info byte written by the encoder
pub const MID_INFO: u8 = 0x01;

/// Header: key count (u16), format (u8), info (u8), 4 reserved bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidHeader {
    pub section_count: u16,
    pub format: u8,
    pub info: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidTable {
    pub header: MidHeader,
    pub keys: Vec<u32>,
}

impl MidTable {
    pub fn from_keys(keys: Vec<u32>) -> Result<Self> {
        let section_count = u16::try_from(keys.len()).map_err(|_| {
            Error::MalformedMid(format!("{} keys exceed the 65535 key limit", keys.len()))
        })?;

        Ok(Self {
            header: MidHeader {
                section_count,
                format: MID_FORMAT,
                info: MID_INFO,
            },
            keys,
        })
    }

    /// Parse a MID1 section body
    pub fn decode(body: &[u8]) -> Result<Self> {
        if body.len() % 4 != 0 {
            return Err(Error::MalformedMid(format!(
                "body length {} is not a multiple of 4",
                body.len()
            )));
        }
        if body.len() < MID_HEADER_SIZE {
            return Err(Error::MalformedMid(format!(
                "body is {} bytes, shorter than the {MID_HEADER_SIZE}-byte header",
                body.len()
            )));
        }

        let mut cursor = Cursor::new(body);
        let section_count = cursor.read_u16::<BigEndian>()?;
        let format = cursor.read_u8()?;
        let info = cursor.read_u8()?;
        let _reserved = cursor.read_u32::<BigEndian>()?;

        let needed = MID_HEADER_SIZE + usize::from(section_count) * 4;
        if body.len() < needed {
            return Err(Error::MalformedMid(format!(
                "{section_count} keys need {needed} bytes but body is {} bytes",
                body.len()
            )));
        }

        let keys = (0..section_count)
            .map(|_| cursor.read_u32::<BigEndian>())
            .collect::<std::io::Result<Vec<_>>>()?;

        tracing::debug!("MID1: {section_count} keys, format {format:#04x}, info {info:#04x}");

        Ok(Self {
            header: MidHeader {
                section_count,
                format,
                info,
            },
            keys,
        })
    }

    /// Serialize header, keys and the trailing zero key
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(MID_HEADER_SIZE + (self.keys.len() + 1) * 4);

        output.write_u16::<BigEndian>(self.header.section_count)?;
        output.write_u8(self.header.format)?;
        output.write_u8(self.header.info)?;
        output.write_u32::<BigEndian>(0)?;

        for &key in &self.keys {
            output.write_u32::<BigEndian>(key)?;
        }
        output.write_u32::<BigEndian>(0)?;

        Ok(output)
    }
}
