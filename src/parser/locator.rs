//! Stream locator: finds the header, summary and body section streams.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::container::ContainerEntry;

/// Name of the document header stream.
pub const FILE_HEADER_STREAM: &str = "FileHeader";
/// Name of the summary information stream.
pub const SUMMARY_STREAM: &str = "\u{5}HwpSummaryInformation";
/// Storage holding the body section streams.
pub const BODY_TEXT_STORAGE: &str = "BodyText";
/// Name prefix of a body section stream; the suffix is the section index.
pub const SECTION_PREFIX: &str = "Section";

/// One body-text stream and its index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Index parsed from the stream name suffix
    pub index: u32,
    /// Stream path inside the container
    pub path: String,
}

/// Streams of interest found in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLayout {
    /// Path of the `FileHeader` stream
    pub header: String,
    /// Path of the summary stream, when present
    pub summary: Option<String>,
    /// Body sections sorted ascending by index
    pub sections: Vec<Section>,
}

/// Locate the header and body section streams among container entries.
///
/// Entries that do not match the `BodyText/Section<N>` pattern are ignored.
/// Sections are stable-sorted by index, so duplicate indices keep the order
/// in which the container listed them.
///
/// # Errors
/// [`Error::MissingRequiredStream`] if the header stream is absent or no
/// body section exists.
pub fn locate_streams(entries: &[ContainerEntry]) -> Result<StreamLayout> {
    let mut header = None;
    let mut summary = None;
    let mut sections = Vec::new();

    for entry in entries.iter().filter(|e| e.is_stream()) {
        let parts: Vec<&str> = entry.components().collect();
        match parts.as_slice() {
            [FILE_HEADER_STREAM] => header = Some(entry.path.clone()),
            [SUMMARY_STREAM] => summary = Some(entry.path.clone()),
            [BODY_TEXT_STORAGE, name] => {
                if let Some(index) = section_index(name) {
                    sections.push(Section {
                        index,
                        path: entry.path.clone(),
                    });
                }
            }
            _ => {}
        }
    }

    let header =
        header.ok_or_else(|| Error::MissingRequiredStream(FILE_HEADER_STREAM.to_string()))?;

    if sections.is_empty() {
        return Err(Error::MissingRequiredStream(BODY_TEXT_STORAGE.to_string()));
    }

    sections.sort_by_key(|s| s.index);

    Ok(StreamLayout {
        header,
        summary,
        sections,
    })
}

/// Parse the numeric suffix of a `Section<N>` stream name.
fn section_index(name: &str) -> Option<u32> {
    let suffix = name.strip_prefix(SECTION_PREFIX)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
