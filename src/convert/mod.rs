//! One-call conversion of HWP documents into a chosen output format.
//!
//! [`HwpConverter`] bundles parse and render options, runs the extraction
//! and hands back a [`ConvertResult`]: the rendered content together with
//! the section warnings and statistics of the run. A lenient conversion of
//! a damaged file still succeeds; [`ConvertResult::is_partial`] tells the
//! caller that some body text was lost.
//!
//! # Example
//!
//! ```no_run
//! use unhwp::convert::{ConvertOptions, HwpConverter, OutputFormat};
//!
//! fn main() -> unhwp::Result<()> {
//!     let converter = HwpConverter::new(ConvertOptions::new().with_format(OutputFormat::Text));
//!     let result = converter.convert_file("document.hwp")?;
//!     if result.is_partial() {
//!         eprintln!("{} sections were damaged", result.warnings.len());
//!     }
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod hwp;

pub use hwp::HwpConverter;

use crate::model::{Metadata, SectionWarning};
use crate::parser::ParseOptions;
use crate::render::{ExtractionStats, JsonFormat, RenderOptions};

/// Output format of a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown with reconstructed tables
    #[default]
    Markdown,
    /// Normalized plain text
    Text,
    /// The parsed document as JSON
    Json(JsonFormat),
}

impl OutputFormat {
    /// MIME type of the rendered content.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Text => "text/plain",
            OutputFormat::Json(_) => "application/json",
        }
    }

    /// File extension for the rendered content, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json(_) => "json",
        }
    }
}

/// Options for a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Fail the conversion on the first damaged section.
    pub fn strict(mut self) -> Self {
        self.parse = self.parse.strict();
        self
    }
}

/// Rendered content plus what the parser reported about the source.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Rendered content
    pub content: String,

    /// Format of `content`
    pub format: OutputFormat,

    /// Source document metadata
    pub metadata: Metadata,

    /// Sections skipped or cut short during parsing
    pub warnings: Vec<SectionWarning>,

    /// Statistics of the run
    pub stats: ExtractionStats,
}

impl ConvertResult {
    /// Whether body text was lost to damaged sections.
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// MIME type of the content.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Output file name for a given stem, e.g. `report.md`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.format.extension())
    }

    /// Content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}
