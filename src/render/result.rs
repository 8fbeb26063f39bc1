//! Extraction result with metadata, warnings and statistics.

use crate::model::{Document, Metadata, SectionWarning, WarningKind};
use serde::{Deserialize, Serialize};

/// Result of extracting and rendering a document.
///
/// A document that lost sections to decompression or record errors is
/// still returned; the losses are listed in `warnings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Sections skipped or cut short during parsing
    pub warnings: Vec<SectionWarning>,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Create a new extraction result.
    pub fn new(content: String, doc: &Document, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata: doc.metadata.clone(),
            warnings: doc.warnings.clone(),
            stats,
        }
    }

    /// Whether some sections were skipped or truncated.
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected during content extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of sections decoded
    pub sections_parsed: u32,

    /// Number of sections skipped because they could not be decoded
    pub sections_skipped: u32,

    /// Number of non-table lines emitted
    pub line_count: u32,

    /// Number of tables reconstructed
    pub table_count: u32,

    /// Number of rows across all tables
    pub table_row_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed section counters from a parsed document.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            sections_parsed: doc.section_count(),
            sections_skipped: doc
                .warnings
                .iter()
                .filter(|w| w.kind == WarningKind::DecompressionFailed)
                .count() as u32,
            ..Default::default()
        }
    }

    /// Increment line count.
    pub fn add_line(&mut self) {
        self.line_count += 1;
    }

    /// Record a table with the given number of rows.
    pub fn add_table(&mut self, rows: usize) {
        self.table_count += 1;
        self.table_row_count += rows as u32;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.sections_parsed += other.sections_parsed;
        self.sections_skipped += other.sections_skipped;
        self.line_count += other.line_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("안녕하세요 세계! Hello world.");

        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.char_count, 19);
    }

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats::new();
        stats1.line_count = 5;
        stats1.add_table(3);

        let stats2 = ExtractionStats {
            line_count: 2,
            table_count: 1,
            table_row_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.line_count, 7);
        assert_eq!(stats1.table_count, 2);
        assert_eq!(stats1.table_row_count, 7);
    }

    #[test]
    fn test_from_document_counts_only_skipped_sections() {
        use crate::error::Error;
        use crate::model::SectionContent;

        let mut doc = Document::new();
        doc.add_section(SectionContent::with_lines(1, "BodyText/Section1", ["x"]));
        let skipped = Error::DecompressionFailed {
            section_index: 0,
            reason: "bad block".into(),
        };
        let cut = Error::TruncatedRecord {
            section_index: 1,
            offset: 8,
        };
        doc.add_warning(SectionWarning::from_error("BodyText/Section0", &skipped).unwrap());
        doc.add_warning(SectionWarning::from_error("BodyText/Section1", &cut).unwrap());

        let stats = ExtractionStats::from_document(&doc);
        assert_eq!(stats.sections_parsed, 1);
        assert_eq!(stats.sections_skipped, 1);
    }
}
