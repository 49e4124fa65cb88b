//! Container and section headers

use super::{
    BMG_MAGIC, HEADER_SIZE, InfTable, MidTable, SECTION_HEADER_SIZE, StringPool, TAG_DAT1,
    TAG_INF1, TAG_MID1,
};
use crate::error::{Error, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Cursor, Read, Write};

/// Bytes of zero padding after the charset byte
const HEADER_PADDING: usize = 15;

/// Text encoding declared in the container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Undefined,
    Cp1252,
    Utf16,
    ShiftJis,
    Utf8,
    Unknown(u8),
}

impl From<u8> for Charset {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Undefined,
            1 => Self::Cp1252,
            2 => Self::Utf16,
            3 => Self::ShiftJis,
            4 => Self::Utf8,
            other => Self::Unknown(other),
        }
    }
}

impl From<Charset> for u8 {
    fn from(charset: Charset) -> Self {
        match charset {
            Charset::Undefined => 0,
            Charset::Cp1252 => 1,
            Charset::Utf16 => 2,
            Charset::ShiftJis => 3,
            Charset::Utf8 => 4,
            Charset::Unknown(other) => other,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Cp1252 => f.write_str("CP1252"),
            Self::Utf16 => f.write_str("UTF-16"),
            Self::ShiftJis => f.write_str("Shift-JIS"),
            Self::Utf8 => f.write_str("UTF-8"),
            Self::Unknown(value) => write!(f, "unknown ({value})"),
        }
    }
}

/// The 32-byte container header
///
/// Layout: magic (8), file size (u32), section count (u32), charset (u8),
/// 15 bytes of padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmgHeader {
    pub file_size: u32,
    pub section_count: u32,
    pub charset: Charset,
}

impl BmgHeader {
    /// Read and validate the header against the full input.
    ///
    /// Checks run in order: magic, declared size against `data.len()`, charset.
    pub fn read(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::eof(format!(
                "container header needs {HEADER_SIZE} bytes, got {}",
                data.len()
            )));
        }

        let mut cursor = Cursor::new(data);
        let mut magic = [0u8; 8];
        cursor.read_exact(&mut magic)?;
        if magic != BMG_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let file_size = cursor.read_u32::<BigEndian>()?;
        if data.len() != file_size as usize {
            return Err(Error::eof(format!(
                "header declares {file_size} bytes but input is {} bytes",
                data.len()
            )));
        }

        let section_count = cursor.read_u32::<BigEndian>()?;
        let charset = Charset::from(cursor.read_u8()?);
        if charset != Charset::Utf16 {
            return Err(Error::UnsupportedEncoding(charset));
        }

        Ok(Self {
            file_size,
            section_count,
            charset,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&BMG_MAGIC)?;
        writer.write_u32::<BigEndian>(self.file_size)?;
        writer.write_u32::<BigEndian>(self.section_count)?;
        writer.write_u8(self.charset.into())?;
        writer.write_all(&[0u8; HEADER_PADDING])?;
        Ok(())
    }
}

/// Tag and total size of a section; the size includes these 8 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub tag: [u8; 4],
    pub size: u32,
}

impl SectionHeader {
    pub fn read(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        let mut tag = [0u8; 4];
        cursor
            .read_exact(&mut tag)
            .map_err(|_| Error::eof("truncated section header"))?;
        let size = cursor
            .read_u32::<BigEndian>()
            .map_err(|_| Error::eof("truncated section header"))?;
        Ok(Self { tag, size })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.tag)?;
        writer.write_u32::<BigEndian>(self.size)?;
        Ok(())
    }

    /// Length of the section body following the header
    pub fn body_len(&self) -> Result<usize> {
        (self.size as usize)
            .checked_sub(SECTION_HEADER_SIZE)
            .ok_or_else(|| Error::InvalidSectionSize {
                tag: self.tag_name(),
                size: self.size,
            })
    }

    /// Tag as printable text
    #[must_use]
    pub fn tag_name(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// A decoded section, dispatched on its tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Inf(InfTable),
    Dat(StringPool),
    Mid(MidTable),
    /// Unhandled tag; only the body length is kept
    Unknown { tag: [u8; 4], len: usize },
}

impl Section {
    /// Decode a section body according to its tag
    pub fn parse(tag: [u8; 4], body: &[u8]) -> Result<Self> {
        Ok(match tag {
            TAG_INF1 => Self::Inf(InfTable::decode(body)?),
            TAG_DAT1 => Self::Dat(StringPool::from_bytes(body.to_vec())),
            TAG_MID1 => Self::Mid(MidTable::decode(body)?),
            _ => Self::Unknown {
                tag,
                len: body.len(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(file_size: u32, charset: u8) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"MESGbmg1");
        data.extend_from_slice(&file_size.to_be_bytes());
        data.extend_from_slice(&3u32.to_be_bytes());
        data.push(charset);
        data.extend_from_slice(&[0u8; 15]);
        data
    }

    #[test]
    fn test_header_write_layout() {
        let header = BmgHeader {
            file_size: 0x40,
            section_count: 3,
            charset: Charset::Utf16,
        };
        let mut out = Vec::new();
        header.write(&mut out).unwrap();
        assert_eq!(out, header_bytes(0x40, 2));
        assert_eq!(out.len(), HEADER_SIZE);
    }

    #[test]
    fn test_header_read() {
        let data = header_bytes(32, 2);
        let header = BmgHeader::read(&data).unwrap();
        assert_eq!(header.section_count, 3);
        assert_eq!(header.charset, Charset::Utf16);
    }

    #[test]
    fn test_header_rejects_bad_magic() {
        let mut data = header_bytes(32, 2);
        data[0] = b'X';
        assert!(matches!(BmgHeader::read(&data), Err(Error::InvalidMagic(_))));
    }

    #[test]
    fn test_header_rejects_utf8_charset() {
        let data = header_bytes(32, 4);
        assert!(matches!(
            BmgHeader::read(&data),
            Err(Error::UnsupportedEncoding(Charset::Utf8))
        ));
    }

    #[test]
    fn test_header_size_mismatch_is_eof() {
        let data = header_bytes(33, 2);
        assert!(matches!(
            BmgHeader::read(&data),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_short_input_is_eof() {
        assert!(matches!(
            BmgHeader::read(b"MESGbmg1"),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_section_size_below_header() {
        let header = SectionHeader {
            tag: *b"INF1",
            size: 4,
        };
        assert!(matches!(
            header.body_len(),
            Err(Error::InvalidSectionSize { size: 4, .. })
        ));
    }

    #[test]
    fn test_unknown_section_keeps_length() {
        let section = Section::parse(*b"FLW1", &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(
            section,
            Section::Unknown {
                tag: *b"FLW1",
                len: 5
            }
        );
    }

    #[test]
    fn test_charset_round_trip() {
        for value in 0u8..=6 {
            assert_eq!(u8::from(Charset::from(value)), value);
        }
    }
}
