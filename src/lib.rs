//! # unhwp
//!
//! Text extraction library for HWP 5.0 (Hangul Word Processor) documents.
//!
//! This library reads the body text of HWP compound files and converts it
//! to Markdown, plain text, or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unhwp::{parse_file, render};
//!
//! fn main() -> unhwp::Result<()> {
//!     // Parse an HWP file
//!     let doc = parse_file("document.hwp")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Multiple output formats**: Markdown, plain text, JSON
//! - **Table reconstruction**: tab- and space-aligned rows become Markdown tables
//! - **Damage tolerance**: unreadable sections are skipped and reported as warnings
//! - **Parallel batches**: Uses Rayon to process many files at once
//! - **Async**: `extract_file_async` behind the `async` feature

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{ConvertOptions, ConvertResult, HwpConverter, OutputFormat};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_hwp, HwpFormat};
pub use error::{Error, Result};
pub use model::{
    Block, Document, Metadata, SectionContent, SectionWarning, Table, TableRow, WarningKind,
};
pub use parser::{
    CfbContainer, Container, ContainerEntry, ControlMode, ErrorMode, HwpParser, ParseOptions,
    SectionSelection,
};
pub use render::{Extraction, ExtractionStats, JsonFormat, RenderOptions};

use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Extract a document from an opened container and render it to Markdown.
///
/// This is the core entry point; the file, byte and reader variants wrap
/// it. Fatal errors return `Err` with no partial text. Sections lost to
/// decompression or record errors are listed in
/// [`Extraction::warnings`] unless `parse_options` is strict.
///
/// # Example
///
/// ```no_run
/// use unhwp::{extract, CfbContainer, ParseOptions, RenderOptions};
///
/// let mut container = CfbContainer::open("document.hwp")?;
/// let extraction = extract(&mut container, &ParseOptions::default(), &RenderOptions::default())?;
/// print!("{}", extraction.content);
/// # Ok::<(), unhwp::Error>(())
/// ```
pub fn extract<C: Container>(
    container: &mut C,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Result<Extraction> {
    let doc = parse_container(container, parse_options.clone())?;
    render::to_markdown_with_stats(&doc, render_options)
}

/// Extract an HWP file to Markdown with default options.
///
/// # Example
///
/// ```no_run
/// use unhwp::extract_file;
///
/// let extraction = extract_file("document.hwp").unwrap();
/// for warning in &extraction.warnings {
///     eprintln!("warning: {}", warning);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    extract_file_with_options(path, &ParseOptions::default(), &RenderOptions::default())
}

/// Extract an HWP file to Markdown with custom options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Result<Extraction> {
    let doc = parse_file_with_options(path, parse_options.clone())?;
    render::to_markdown_with_stats(&doc, render_options)
}

/// Extract an HWP document held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<Extraction> {
    let mut container = CfbContainer::from_bytes(data.to_vec())?;
    extract(
        &mut container,
        &ParseOptions::default(),
        &RenderOptions::default(),
    )
}

/// Extract many files in parallel.
///
/// Each file is extracted independently; the results are returned in the
/// order of `paths`.
///
/// # Example
///
/// ```no_run
/// use unhwp::{extract_files, ParseOptions, RenderOptions};
///
/// let paths = vec!["a.hwp", "b.hwp"];
/// for (path, result) in extract_files(&paths, &ParseOptions::default(), &RenderOptions::default()) {
///     match result {
///         Ok(extraction) => println!("{}: {} bytes", path.display(), extraction.content_len()),
///         Err(e) => eprintln!("{}: {}", path.display(), e),
///     }
/// }
/// ```
pub fn extract_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Vec<(PathBuf, Result<Extraction>)> {
    paths
        .par_iter()
        .map(|path| {
            let path: &Path = path.as_ref();
            let result = extract_file_with_options(path, parse_options, render_options);
            (path.to_path_buf(), result)
        })
        .collect()
}

/// Extract an HWP file on the blocking thread pool of the tokio runtime.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> unhwp::Result<()> {
/// use unhwp::{extract_file_async, ParseOptions, RenderOptions};
///
/// let extraction =
///     extract_file_async("document.hwp", ParseOptions::default(), RenderOptions::default()).await?;
/// println!("{}", extraction.content);
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "async")]
pub async fn extract_file_async<P: AsRef<Path>>(
    path: P,
    parse_options: ParseOptions,
    render_options: RenderOptions,
) -> Result<Extraction> {
    let path = path.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || {
        extract_file_with_options(&path, &parse_options, &render_options)
    })
    .await
    .map_err(|e| Error::Other(format!("Task join error: {}", e)))?
}

/// Parse an HWP file and return a structured document.
///
/// # Example
///
/// ```no_run
/// use unhwp::parse_file;
///
/// let doc = parse_file("document.hwp").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let mut parser = HwpParser::open(path)?;
    parser.parse()
}

/// Parse an HWP file with custom options.
///
/// # Example
///
/// ```no_run
/// use unhwp::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .strict()
///     .structured();
/// let doc = parse_file_with_options("document.hwp", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let mut parser = HwpParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse an HWP document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let mut parser = HwpParser::from_bytes(data)?;
    parser.parse()
}

/// Parse an HWP document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let mut parser = HwpParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse an HWP document from a reader.
///
/// The reader is buffered fully in memory because the compound file
/// format needs random access.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let mut parser = HwpParser::from_reader(reader)?;
    parser.parse()
}

/// Parse an HWP document from any [`Container`] implementation.
pub fn parse_container<C: Container>(container: &mut C, options: ParseOptions) -> Result<Document> {
    HwpParser::new(container, options).parse()
}

/// Convert an HWP file to Markdown.
///
/// # Example
///
/// ```no_run
/// use unhwp::to_markdown;
///
/// let markdown = to_markdown("document.hwp").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert an HWP file to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, options)
}

/// Convert an HWP file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, options)
}

/// Convert an HWP file to JSON.
///
/// # Example
///
/// ```no_run
/// use unhwp::{to_json, JsonFormat};
///
/// let json = to_json("document.hwp", JsonFormat::Pretty).unwrap();
/// std::fs::write("output.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting HWP documents.
///
/// # Example
///
/// ```no_run
/// use unhwp::Unhwp;
///
/// let markdown = Unhwp::new()
///     .with_frontmatter()
///     .strict()
///     .parse("document.hwp")?
///     .to_markdown()?;
/// # Ok::<(), unhwp::Error>(())
/// ```
pub struct Unhwp {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Unhwp {
    /// Create a new Unhwp builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Fail on the first damaged section.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Skip damaged sections and report them as warnings.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Interpret inline control codes instead of stripping them.
    pub fn structured(mut self) -> Self {
        self.parse_options = self.parse_options.structured();
        self
    }

    /// Set section selection.
    pub fn with_sections(mut self, sections: SectionSelection) -> Self {
        self.parse_options = self.parse_options.with_sections(sections);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Enable or disable table reconstruction.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.render_options = self.render_options.with_tables(detect);
        self
    }

    /// Normalize output to Unicode NFC.
    pub fn with_nfc(mut self) -> Self {
        self.render_options = self.render_options.with_unicode_normalization(true);
        self
    }

    /// Parse an HWP file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnhwpResult> {
        let mut parser = HwpParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UnhwpResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse an HWP document from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnhwpResult> {
        let mut parser = HwpParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UnhwpResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Unhwp {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing an HWP document.
pub struct UnhwpResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnhwpResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to Markdown with statistics and warnings.
    pub fn to_extraction(&self) -> Result<Extraction> {
        render::to_markdown_with_stats(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Warnings raised while parsing.
    pub fn warnings(&self) -> &[SectionWarning] {
        &self.document.warnings
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
