//! Plain text rendering for HWP documents.

use crate::error::Result;
use crate::model::Document;

use super::markdown::serialize;
use super::normalize::normalized_lines;
use super::RenderOptions;

/// Convert a document to plain text.
///
/// Lines are normalized like the Markdown output but tabular runs are left
/// as they are.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    Ok(serialize(&normalized_lines(doc, options)))
}
