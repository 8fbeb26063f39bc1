//! HWP format detection and validation.

use crate::error::{Error, Result};
use crate::parser::locator::FILE_HEADER_STREAM;
use crate::parser::{CfbContainer, Container, FileHeader};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// HWP format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HwpFormat {
    /// Format version (e.g., "5.0.3.0")
    pub version: String,
    /// Whether section streams are compressed
    pub compressed: bool,
    /// Whether the document is password protected
    pub encrypted: bool,
    /// Whether this is a distribution document
    pub distributed: bool,
}

impl std::fmt::Display for HwpFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HWP {}", self.version)
    }
}

/// Compound file magic bytes.
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Check whether data starts with the compound file magic.
pub fn is_compound_file(data: &[u8]) -> bool {
    data.starts_with(CFB_MAGIC)
}

/// Check the compound file magic at the start of a file.
///
/// # Errors
/// `Error::UnknownFormat` if the file is shorter than the magic or does not
/// start with it.
pub fn ensure_compound_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut magic = [0u8; 8];
    reader
        .read_exact(&mut magic)
        .map_err(|_| Error::UnknownFormat)?;

    if is_compound_file(&magic) {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Detect HWP format from a file path.
///
/// # Arguments
/// * `path` - Path to the HWP file
///
/// # Returns
/// * `Ok(HwpFormat)` if the file is an HWP 5.x document
/// * `Err(Error::UnknownFormat)` if the file is not a compound file or
///   carries the wrong signature
///
/// # Example
/// ```no_run
/// use unhwp::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("document.hwp").unwrap();
/// println!("HWP version: {}", format.version);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<HwpFormat> {
    let path = path.as_ref();
    ensure_compound_file(path)?;
    let mut container = CfbContainer::open(path)?;
    detect_format_from_container(&mut container)
}

/// Detect HWP format from the complete file contents.
///
/// # Returns
/// * `Ok(HwpFormat)` if the data is an HWP 5.x document
/// * `Err(Error::UnknownFormat)` if the data is not a compound file
pub fn detect_format_from_bytes(data: &[u8]) -> Result<HwpFormat> {
    if !is_compound_file(data) {
        return Err(Error::UnknownFormat);
    }
    let mut container = CfbContainer::from_bytes(data.to_vec())?;
    detect_format_from_container(&mut container)
}

/// Detect HWP format from an opened container.
pub fn detect_format_from_container<C: Container>(container: &mut C) -> Result<HwpFormat> {
    let has_header = container
        .list_entries()?
        .iter()
        .any(|e| e.is_stream() && e.path == FILE_HEADER_STREAM);
    if !has_header {
        return Err(Error::MissingRequiredStream(FILE_HEADER_STREAM.to_string()));
    }

    let header = FileHeader::parse(&container.read_stream(FILE_HEADER_STREAM)?)?;
    Ok(HwpFormat {
        version: header.version.to_string(),
        compressed: header.is_compressed(),
        encrypted: header.is_encrypted(),
        distributed: header.is_distributed(),
    })
}

/// Check if a file is an HWP document.
pub fn is_hwp<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes hold an HWP document.
pub fn is_hwp_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
