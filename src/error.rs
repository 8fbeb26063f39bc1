//! Error types for unhwp library.

use std::io;
use thiserror::Error;

/// Result type alias for unhwp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during HWP processing.
///
/// Most variants are fatal and abort the extraction. The two section-level
/// variants ([`Error::DecompressionFailed`] and [`Error::TruncatedRecord`])
/// are recoverable: in lenient mode they are turned into warnings and the
/// remaining sections are still extracted.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The data is not a compound binary container or not an HWP document.
    #[error("Unknown file format: not a valid HWP document")]
    UnknownFormat,

    /// The `FileHeader` stream is too short or otherwise malformed.
    #[error("Invalid file header: {0}")]
    InvalidHeader(String),

    /// The document is password protected and its body cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// The compound file container itself could not be read.
    #[error("Container is unreadable: {0}")]
    ContainerUnreadable(String),

    /// A stream the format requires is absent.
    #[error("Missing required stream: {0}")]
    MissingRequiredStream(String),

    /// A section payload could not be inflated.
    #[error("Section {section_index}: decompression failed: {reason}")]
    DecompressionFailed {
        /// Index of the affected section
        section_index: u32,
        /// Decoder message
        reason: String,
    },

    /// A record header or payload runs past the end of the section buffer.
    #[error("Section {section_index}: truncated record at offset {offset}")]
    TruncatedRecord {
        /// Index of the affected section
        section_index: u32,
        /// Byte offset of the record header that could not be read
        offset: usize,
    },

    /// Invalid section range string.
    #[error("Invalid section range: {0}")]
    InvalidSectionRange(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error only affects a single section.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DecompressionFailed { .. } | Error::TruncatedRecord { .. }
        )
    }

    /// Section index carried by a section-level error.
    pub fn section_index(&self) -> Option<u32> {
        match self {
            Error::DecompressionFailed { section_index, .. }
            | Error::TruncatedRecord { section_index, .. } => Some(*section_index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::TruncatedRecord {
            section_index: 2,
            offset: 128,
        };
        assert_eq!(
            err.to_string(),
            "Section 2: truncated record at offset 128"
        );

        let err = Error::MissingRequiredStream("FileHeader".to_string());
        assert_eq!(err.to_string(), "Missing required stream: FileHeader");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_recoverable_classification() {
        let decompress = Error::DecompressionFailed {
            section_index: 1,
            reason: "corrupt deflate stream".to_string(),
        };
        assert!(decompress.is_recoverable());
        assert_eq!(decompress.section_index(), Some(1));

        assert!(!Error::Encrypted.is_recoverable());
        assert!(!Error::ContainerUnreadable("bad FAT".into()).is_recoverable());
        assert_eq!(Error::UnknownFormat.section_index(), None);
    }
}
