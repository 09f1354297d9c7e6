//! Length-prefixed record stream codec
//!
//! Every collection persists to its own file with one uniform framing,
//! all numeric fields little-endian:
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │ count: u64 LE                    │   (absent for AdminKey - a single
//! ├──────────────────────────────────┤    record with no count prefix)
//! │ Record 0                         │
//! │ - per string field:              │
//! │     byte_length: u64 LE          │
//! │     bytes: [u8; byte_length]     │   (raw UTF-8, no terminator)
//! │ - per price field: f64 LE        │   (immediately after the strings,
//! ├──────────────────────────────────┤    no padding)
//! │ Record 1 ...                     │
//! └──────────────────────────────────┘
//! ```
//!
//! Decoding is all-or-nothing per file: truncation, non-UTF-8 string
//! bytes, or trailing bytes after the declared count are hard errors,
//! never silently-truncated collections. Never dump whole structs - a raw
//! memory write of a String or HashMap is not a format at all.

use std::collections::HashMap;

use crate::model::{Catalog, CatalogItem, FeedbackEntry};

/// Error type for record stream decoding
#[derive(Debug)]
pub enum CodecError {
    /// Input ended inside a length prefix, string body, or price field
    UnexpectedEof {
        /// Byte offset where the read started
        offset: usize,
        /// Bytes the read needed
        needed: usize,
    },
    /// String bytes are not valid UTF-8
    InvalidUtf8 { offset: usize },
    /// A declared length does not fit in memory on this platform
    LengthOverflow(u64),
    /// Bytes remain after the declared record count was consumed
    TrailingBytes { remaining: usize },
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::UnexpectedEof { offset, needed } => {
                write!(f, "unexpected EOF at offset {}: {} more bytes needed", offset, needed)
            }
            CodecError::InvalidUtf8 { offset } => {
                write!(f, "invalid UTF-8 in string at offset {}", offset)
            }
            CodecError::LengthOverflow(len) => {
                write!(f, "declared length {} overflows usize", len)
            }
            CodecError::TrailingBytes { remaining } => {
                write!(f, "{} trailing bytes after final record", remaining)
            }
        }
    }
}

impl std::error::Error for CodecError {}

// ============================================================================
// Framing primitives
// ============================================================================

/// Append-only encoder for one record stream.
#[derive(Debug, Default)]
pub struct RecordWriter {
    buf: Vec<u8>,
}

impl RecordWriter {
    pub fn new() -> Self {
        RecordWriter { buf: Vec::new() }
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Length prefix, then the raw UTF-8 bytes.
    pub fn put_str(&mut self, value: &str) {
        self.put_u64(value.len() as u64);
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor-based decoder over one record stream.
#[derive(Debug)]
pub struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        RecordReader { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::UnexpectedEof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().expect("take(8) returns 8 bytes")))
    }

    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        let bytes = self.take(8)?;
        Ok(f64::from_le_bytes(bytes.try_into().expect("take(8) returns 8 bytes")))
    }

    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let len = self.read_u64()?;
        let len = usize::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
        let offset = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }

    /// Error unless every byte has been consumed.
    pub fn finish(&self) -> Result<(), CodecError> {
        if self.remaining() != 0 {
            return Err(CodecError::TrailingBytes {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Per-collection record layouts
// ============================================================================

/// AdminKey: a single length-prefixed string, no count.
pub fn encode_admin_key(key: &str) -> Vec<u8> {
    let mut w = RecordWriter::new();
    w.put_str(key);
    w.into_bytes()
}

pub fn decode_admin_key(buf: &[u8]) -> Result<String, CodecError> {
    let mut r = RecordReader::new(buf);
    let key = r.read_string()?;
    r.finish()?;
    Ok(key)
}

/// Catalog: count, then `{name, price}` per item.
pub fn encode_catalog(catalog: &Catalog) -> Vec<u8> {
    let mut w = RecordWriter::new();
    w.put_u64(catalog.len() as u64);
    for item in catalog.items() {
        w.put_str(&item.name);
        w.put_f64(item.unit_price);
    }
    w.into_bytes()
}

pub fn decode_catalog(buf: &[u8]) -> Result<Vec<CatalogItem>, CodecError> {
    let mut r = RecordReader::new(buf);
    let count = r.read_u64()?;
    // Sized from the data actually present, not the untrusted count
    let mut items = Vec::new();
    for _ in 0..count {
        let name = r.read_string()?;
        let unit_price = r.read_f64()?;
        items.push(CatalogItem { name, unit_price });
    }
    r.finish()?;
    Ok(items)
}

/// Staff: count, then one name per entry. Availability is never
/// persisted - everyone reloads available.
pub fn encode_names<'a>(names: impl ExactSizeIterator<Item = &'a str>) -> Vec<u8> {
    let mut w = RecordWriter::new();
    w.put_u64(names.len() as u64);
    for name in names {
        w.put_str(name);
    }
    w.into_bytes()
}

pub fn decode_names(buf: &[u8]) -> Result<Vec<String>, CodecError> {
    let mut r = RecordReader::new(buf);
    let count = r.read_u64()?;
    let mut names = Vec::new();
    for _ in 0..count {
        names.push(r.read_string()?);
    }
    r.finish()?;
    Ok(names)
}

/// Client accounts / addresses: count, then `{key, value}` per entry.
pub fn encode_string_map(map: &HashMap<String, String>) -> Vec<u8> {
    let mut w = RecordWriter::new();
    w.put_u64(map.len() as u64);
    for (key, value) in map {
        w.put_str(key);
        w.put_str(value);
    }
    w.into_bytes()
}

pub fn decode_string_map(buf: &[u8]) -> Result<HashMap<String, String>, CodecError> {
    let mut r = RecordReader::new(buf);
    let count = r.read_u64()?;
    let mut map = HashMap::new();
    for _ in 0..count {
        let key = r.read_string()?;
        let value = r.read_string()?;
        map.insert(key, value);
    }
    r.finish()?;
    Ok(map)
}

/// Reviews: count, then one concatenated `"client: text"` string each.
pub fn encode_feedback(entries: &[FeedbackEntry]) -> Vec<u8> {
    let mut w = RecordWriter::new();
    w.put_u64(entries.len() as u64);
    for entry in entries {
        w.put_str(&entry.to_record());
    }
    w.into_bytes()
}

pub fn decode_feedback(buf: &[u8]) -> Result<Vec<FeedbackEntry>, CodecError> {
    let mut r = RecordReader::new(buf);
    let count = r.read_u64()?;
    let mut entries = Vec::new();
    for _ in 0..count {
        entries.push(FeedbackEntry::from_record(&r.read_string()?));
    }
    r.finish()?;
    Ok(entries)
}
