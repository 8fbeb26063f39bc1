//! Record stream parsing.
//!
//! A decompressed section is a flat sequence of records. Each record starts
//! with a little-endian 32-bit header word:
//!
//! | bits  | field  |
//! |-------|--------|
//! | 0–9   | tag    |
//! | 10–19 | level  |
//! | 20–31 | length |
//!
//! A length of `0xFFF` means the real length follows as a separate
//! little-endian `u32`.

use crate::error::{Error, Result};

/// Size of the record header word in bytes.
pub const HEADER_SIZE: usize = 4;

const TAG_MASK: u32 = 0x3FF;
const LEVEL_SHIFT: u32 = 10;
const LEVEL_MASK: u32 = 0x3FF;
const LENGTH_SHIFT: u32 = 20;
const LENGTH_MASK: u32 = 0xFFF;

/// Length field value announcing an extended 32-bit length.
pub const EXTENDED_LENGTH: u32 = 0xFFF;

/// Well-known record tags.
pub mod tags {
    /// First tag value used by the document format.
    pub const HWPTAG_BEGIN: u16 = 0x010;
    /// Paragraph header.
    pub const PARA_HEADER: u16 = HWPTAG_BEGIN + 50;
    /// Paragraph text (UTF-16LE characters).
    pub const PARA_TEXT: u16 = HWPTAG_BEGIN + 51;
    /// Paragraph character shape runs.
    pub const PARA_CHAR_SHAPE: u16 = HWPTAG_BEGIN + 52;
    /// Paragraph line segments.
    pub const PARA_LINE_SEG: u16 = HWPTAG_BEGIN + 53;
    /// Control header (tables, shapes, section definitions).
    pub const CTRL_HEADER: u16 = HWPTAG_BEGIN + 55;
}

/// A single record borrowed from a section buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Record type
    pub tag: u16,
    /// Nesting level (unused by the extractor)
    pub level: u16,
    /// Payload length in bytes
    pub length: u32,
    /// Payload bytes, `length` long
    pub payload: &'a [u8],
}

impl Record<'_> {
    /// Check if this record carries paragraph text.
    pub fn is_para_text(&self) -> bool {
        self.tag == tags::PARA_TEXT
    }
}

/// Lazy iterator over the records of one section buffer.
///
/// Yields `Err(Error::TruncatedRecord)` once if a header or payload runs
/// past the end of the buffer, then stops. Iteration ends normally when the
/// cursor reaches the end of the buffer exactly.
pub struct RecordReader<'a> {
    data: &'a [u8],
    offset: usize,
    section_index: u32,
    extended_lengths: bool,
    done: bool,
}

impl<'a> RecordReader<'a> {
    /// Create a reader over a decoded section buffer.
    pub fn new(section_index: u32, data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            section_index,
            extended_lengths: true,
            done: false,
        }
    }

    /// Enable or disable the extended-length escape.
    pub fn with_extended_lengths(mut self, enabled: bool) -> Self {
        self.extended_lengths = enabled;
        self
    }

    /// Current byte offset into the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn truncated(&mut self, offset: usize) -> Option<Result<Record<'a>>> {
        self.done = true;
        Some(Err(Error::TruncatedRecord {
            section_index: self.section_index,
            offset,
        }))
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Result<Record<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.data.len() {
            return None;
        }

        let start = self.offset;
        let Some(word) = read_u32_le(self.data, start) else {
            return self.truncated(start);
        };

        let tag = (word & TAG_MASK) as u16;
        let level = ((word >> LEVEL_SHIFT) & LEVEL_MASK) as u16;
        let mut length = (word >> LENGTH_SHIFT) & LENGTH_MASK;
        let mut payload_start = start + HEADER_SIZE;

        if self.extended_lengths && length == EXTENDED_LENGTH {
            let Some(extended) = read_u32_le(self.data, payload_start) else {
                return self.truncated(start);
            };
            length = extended;
            payload_start += 4;
        }

        let payload_end = match payload_start.checked_add(length as usize) {
            Some(end) if end <= self.data.len() => end,
            _ => return self.truncated(start),
        };

        self.offset = payload_end;
        Some(Ok(Record {
            tag,
            level,
            length,
            payload: &self.data[payload_start..payload_end],
        }))
    }
}

impl std::iter::FusedIterator for RecordReader<'_> {}

fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Encode a record header word. Lengths of `0xFFF` and above use the
/// extended form, so the returned header is 4 or 8 bytes long.
pub fn encode_header(tag: u16, level: u16, length: u32) -> Vec<u8> {
    let base = (tag as u32 & TAG_MASK) | ((level as u32 & LEVEL_MASK) << LEVEL_SHIFT);
    if length >= EXTENDED_LENGTH {
        let mut header = (base | (EXTENDED_LENGTH << LENGTH_SHIFT)).to_le_bytes().to_vec();
        header.extend_from_slice(&length.to_le_bytes());
        header
    } else {
        (base | (length << LENGTH_SHIFT)).to_le_bytes().to_vec()
    }
}
