//! `FileHeader` stream parsing.
//!
//! The first 32 bytes hold the NUL-padded signature, followed by the
//! version word and the document property bits. Only the property bits
//! influence extraction; the version is surfaced as metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Signature at the start of every HWP 5.x `FileHeader` stream.
pub const HWP_SIGNATURE: &[u8] = b"HWP Document File";

const SIGNATURE_LEN: usize = 32;
const VERSION_OFFSET: usize = 32;
const PROPERTIES_OFFSET: usize = 36;
const MIN_HEADER_LEN: usize = 40;

/// Property bit: section streams are deflate-compressed.
pub const PROP_COMPRESSED: u32 = 1 << 0;
/// Property bit: the document is password protected.
pub const PROP_ENCRYPTED: u32 = 1 << 1;
/// Property bit: distribution document (body lives in `ViewText`).
pub const PROP_DISTRIBUTED: u32 = 1 << 2;

/// Format version stored as `0xMMnnPPrr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    /// Major version; 5 for HWP 5.x
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Build number
    pub build: u8,
    /// Revision number
    pub revision: u8,
}

impl Version {
    /// Decode the little-endian version word.
    pub fn from_word(word: u32) -> Self {
        let [revision, build, minor, major] = word.to_le_bytes();
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Parsed `FileHeader` stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Format version
    pub version: Version,
    /// Raw property bits
    pub properties: u32,
}

impl FileHeader {
    /// Parse the raw `FileHeader` stream.
    ///
    /// # Errors
    /// * [`Error::InvalidHeader`] if the stream is shorter than 40 bytes
    /// * [`Error::UnknownFormat`] if the signature does not match
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_HEADER_LEN {
            return Err(Error::InvalidHeader(format!(
                "expected at least {} bytes, got {}",
                MIN_HEADER_LEN,
                data.len()
            )));
        }

        if !data[..SIGNATURE_LEN].starts_with(HWP_SIGNATURE) {
            return Err(Error::UnknownFormat);
        }

        let version = Version::from_word(read_u32_le(data, VERSION_OFFSET));
        let properties = read_u32_le(data, PROPERTIES_OFFSET);

        Ok(Self {
            version,
            properties,
        })
    }

    /// Whether section payloads must be inflated. Applies to every section.
    pub fn is_compressed(&self) -> bool {
        self.properties & PROP_COMPRESSED != 0
    }

    /// Whether the document is password protected.
    pub fn is_encrypted(&self) -> bool {
        self.properties & PROP_ENCRYPTED != 0
    }

    /// Whether this is a distribution document.
    pub fn is_distributed(&self) -> bool {
        self.properties & PROP_DISTRIBUTED != 0
    }

    /// Serialize a header with the given version and properties.
    ///
    /// Produces the 256-byte layout written by the word processor; used to
    /// build documents in tests and benchmarks.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = vec![0u8; 256];
        data[..HWP_SIGNATURE.len()].copy_from_slice(HWP_SIGNATURE);
        let word = u32::from_le_bytes([
            self.version.revision,
            self.version.build,
            self.version.minor,
            self.version.major,
        ]);
        data[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&word.to_le_bytes());
        data[PROPERTIES_OFFSET..PROPERTIES_OFFSET + 4]
            .copy_from_slice(&self.properties.to_le_bytes());
        data
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
