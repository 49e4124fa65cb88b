//! DAT1 string pool
//!
//! NUL-terminated UTF-16BE strings addressed by byte offset. Offset 0 holds a
//! lone terminator and is shared by every empty message.

use crate::error::{Error, Result};

/// Zero code units appended after the last string when encoding
const TRAILER_UNITS: usize = 14;

/// The DAT1 payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringPool {
    data: Vec<u8>,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    /// Empty pool holding only the reserved empty string at offset 0
    #[must_use]
    pub fn new() -> Self {
        Self { data: vec![0, 0] }
    }

    /// Wrap a decoded DAT1 payload
    #[must_use]
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Read the string starting at `offset`.
    ///
    /// Scans big-endian code units up to the first zero unit. Unpaired
    /// surrogates decode to U+FFFD.
    pub fn read_at(&self, offset: u32) -> Result<String> {
        let start = offset as usize;
        if start >= self.data.len() {
            return Err(Error::MalformedDat(format!(
                "offset {offset} is outside the {}-byte pool",
                self.data.len()
            )));
        }

        let mut units = Vec::new();
        let mut terminated = false;
        for pair in self.data[start..].chunks_exact(2) {
            let unit = u16::from_be_bytes([pair[0], pair[1]]);
            if unit == 0 {
                terminated = true;
                break;
            }
            units.push(unit);
        }

        if !terminated {
            return Err(Error::MalformedDat(format!(
                "string at offset {offset} has no NUL terminator"
            )));
        }

        match String::from_utf16(&units) {
            Ok(text) => Ok(text),
            Err(_) => {
                tracing::warn!("String at DAT1 offset {offset} contains unpaired surrogates");
                Ok(String::from_utf16_lossy(&units))
            }
        }
    }

    /// Append `text` plus a terminator, returning the offset it starts at
    pub fn append(&mut self, text: &str) -> Result<u32> {
        let offset = u32::try_from(self.data.len())
            .map_err(|_| Error::MalformedDat("string pool exceeds 4 GiB".to_string()))?;

        for unit in text.encode_utf16() {
            self.data.extend_from_slice(&unit.to_be_bytes());
        }
        self.data.extend_from_slice(&[0, 0]);

        Ok(offset)
    }

    /// Append the fixed 28-byte zero trailer expected after the last string
    pub fn pad_trailer(&mut self) {
        self.data.resize(self.data.len() + TRAILER_UNITS * 2, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_reserves_offset_zero() {
        let pool = StringPool::new();
        assert_eq!(pool.as_bytes(), &[0, 0]);
        assert_eq!(pool.read_at(0).unwrap(), "");
    }

    #[test]
    fn test_append_returns_start_offset() {
        let mut pool = StringPool::new();
        assert_eq!(pool.append("Hi").unwrap(), 2);
        assert_eq!(pool.append("Yo").unwrap(), 8);
        assert_eq!(
            pool.as_bytes(),
            &[0x00, 0x00, 0x00, 0x48, 0x00, 0x69, 0x00, 0x00, 0x00, 0x59, 0x00, 0x6F, 0x00, 0x00]
        );
        assert_eq!(pool.read_at(2).unwrap(), "Hi");
        assert_eq!(pool.read_at(8).unwrap(), "Yo");
    }

    #[test]
    fn test_duplicates_are_not_shared() {
        let mut pool = StringPool::new();
        let first = pool.append("same").unwrap();
        let second = pool.append("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_surrogate_pairs() {
        let mut pool = StringPool::new();
        let offset = pool.append("a\u{1F600}").unwrap();
        // 'a' + high + low surrogate + terminator
        assert_eq!(&pool.as_bytes()[2..], &[0x00, 0x61, 0xD8, 0x3D, 0xDE, 0x00, 0x00, 0x00]);
        assert_eq!(pool.read_at(offset).unwrap(), "a\u{1F600}");
    }

    #[test]
    fn test_pad_trailer() {
        let mut pool = StringPool::new();
        pool.pad_trailer();
        assert_eq!(pool.len(), 30);
        assert!(pool.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_read_out_of_range() {
        let pool = StringPool::new();
        assert!(matches!(pool.read_at(2), Err(Error::MalformedDat(_))));
    }

    #[test]
    fn test_read_without_terminator() {
        let pool = StringPool::from_bytes(vec![0x00, 0x00, 0x00, 0x41, 0x00]);
        assert!(matches!(pool.read_at(2), Err(Error::MalformedDat(_))));
    }

    #[test]
    fn test_unpaired_surrogate_is_replaced() {
        let pool = StringPool::from_bytes(vec![0xD8, 0x00, 0x00, 0x41, 0x00, 0x00]);
        assert_eq!(pool.read_at(0).unwrap(), "\u{FFFD}A");
    }
}
