//! HWP document converter.

use std::path::Path;

use crate::error::Result;
use crate::model::Document;
use crate::parser::{Container, HwpParser};
use crate::render::{to_json, to_markdown_with_stats, to_text, ExtractionStats};

use super::{ConvertOptions, ConvertResult, OutputFormat};

/// Converts HWP 5.x documents to Markdown, plain text, or JSON.
///
/// The converter is cheap to clone and holds no state between calls, so
/// one instance can serve many files, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct HwpConverter {
    options: ConvertOptions,
}

impl HwpConverter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Get the conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a file on disk.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConvertResult> {
        let mut parser = HwpParser::open_with_options(path, self.options.parse.clone())?;
        self.convert_document(&parser.parse()?)
    }

    /// Convert an in-memory compound file.
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<ConvertResult> {
        let mut parser = HwpParser::from_bytes_with_options(bytes, self.options.parse.clone())?;
        self.convert_document(&parser.parse()?)
    }

    /// Convert from an already opened container.
    pub fn convert_container<C: Container>(&self, container: &mut C) -> Result<ConvertResult> {
        let mut parser = HwpParser::new(container, self.options.parse.clone());
        self.convert_document(&parser.parse()?)
    }

    /// Render a parsed document in the configured format.
    pub fn convert_document(&self, doc: &Document) -> Result<ConvertResult> {
        let format = self.options.output_format;
        let render = &self.options.render;

        let (content, stats) = match format {
            OutputFormat::Markdown => {
                let extraction = to_markdown_with_stats(doc, render)?;
                (extraction.content, extraction.stats)
            }
            OutputFormat::Text => {
                let content = to_text(doc, render)?;
                let mut stats = ExtractionStats::from_document(doc);
                stats.line_count = content.lines().count() as u32;
                stats.count_text(&content);
                (content, stats)
            }
            OutputFormat::Json(json_format) => {
                let mut stats = ExtractionStats::from_document(doc);
                stats.count_text(&doc.plain_text());
                (to_json(doc, json_format)?, stats)
            }
        };

        Ok(ConvertResult {
            content,
            format,
            metadata: doc.metadata.clone(),
            warnings: doc.warnings.clone(),
            stats,
        })
    }
}
