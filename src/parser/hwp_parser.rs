//! HWP document parser.

use std::io::{Cursor, Read};
use std::path::Path;

use crate::detect::ensure_compound_file;
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, SectionContent, SectionWarning};

use super::container::{CfbContainer, Container};
use super::decompress::decode_payload;
use super::header::FileHeader;
use super::locator::{locate_streams, Section, StreamLayout};
use super::options::{ErrorMode, ParseOptions};
use super::record::RecordReader;
use super::text::TextDecoder;

/// HWP document parser over any [`Container`].
pub struct HwpParser<C> {
    container: C,
    options: ParseOptions,
}

impl HwpParser<CfbContainer<std::fs::File>> {
    /// Open an HWP file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an HWP file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Reject non-CFB files before handing them to the container reader
        ensure_compound_file(path)?;

        let container = CfbContainer::open(path)?;
        Ok(Self::new(container, options))
    }
}

impl HwpParser<CfbContainer<Cursor<Vec<u8>>>> {
    /// Parse an HWP document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse an HWP document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let container = CfbContainer::from_bytes(data.to_vec())?;
        Ok(Self::new(container, options))
    }

    /// Parse an HWP document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse an HWP document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Self> {
        let container = CfbContainer::from_reader(reader)?;
        Ok(Self::new(container, options))
    }
}

impl<C: Container> HwpParser<C> {
    /// Create a parser over an already opened container.
    pub fn new(container: C, options: ParseOptions) -> Self {
        Self { container, options }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Give back the container.
    pub fn into_inner(self) -> C {
        self.container
    }

    /// Parse the document.
    ///
    /// Fatal problems (unreadable container, missing streams, bad or
    /// encrypted header) return `Err` with no partial content. Section-level
    /// problems are recorded as [`SectionWarning`]s in lenient mode and
    /// returned as errors in strict mode.
    pub fn parse(&mut self) -> Result<Document> {
        let entries = self.container.list_entries()?;
        let layout = locate_streams(&entries)?;
        log::debug!(
            "Located {} body sections (summary stream: {})",
            layout.sections.len(),
            layout.summary.is_some()
        );

        if self.options.require_summary && layout.summary.is_none() {
            return Err(Error::MissingRequiredStream(
                super::locator::SUMMARY_STREAM.to_string(),
            ));
        }

        let header = FileHeader::parse(&self.container.read_stream(&layout.header)?)?;
        if header.is_encrypted() {
            return Err(Error::Encrypted);
        }
        log::debug!(
            "HWP {} (compressed: {}, distributed: {})",
            header.version,
            header.is_compressed(),
            header.is_distributed()
        );

        let mut document = Document::new();
        document.metadata = build_metadata(&header, &layout);

        for section in &layout.sections {
            if !self.options.sections.includes(section.index) {
                continue;
            }

            let content = self.parse_section(section, header.is_compressed(), &mut document)?;
            if let Some(content) = content {
                document.add_section(content);
            }
        }

        Ok(document)
    }

    /// Parse one section. Returns `Ok(None)` when the section was skipped.
    fn parse_section(
        &mut self,
        section: &Section,
        compressed: bool,
        document: &mut Document,
    ) -> Result<Option<SectionContent>> {
        let raw = self.container.read_stream(&section.path)?;

        let data = match decode_payload(section.index, raw, compressed) {
            Ok(data) => data,
            Err(e) => {
                self.recover(&section.path, e, document)?;
                return Ok(None);
            }
        };

        let decoder = TextDecoder::new(self.options.control_mode);
        let mut content = SectionContent::new(section.index, section.path.clone());
        let records = RecordReader::new(section.index, &data)
            .with_extended_lengths(self.options.extended_lengths);

        for record in records {
            match record {
                Ok(record) if record.is_para_text() => {
                    content.lines.extend(decoder.decode(record.payload));
                }
                Ok(_) => {}
                Err(e) => {
                    self.recover(&section.path, e, document)?;
                    break;
                }
            }
        }

        log::debug!(
            "Section {}: {} lines from {} bytes",
            section.index,
            content.lines.len(),
            data.len()
        );
        Ok(Some(content))
    }

    /// Turn a recoverable error into a warning, or propagate it in strict mode.
    fn recover(&self, path: &str, error: Error, document: &mut Document) -> Result<()> {
        if self.options.error_mode == ErrorMode::Strict || !error.is_recoverable() {
            return Err(error);
        }

        log::warn!("Skipping damaged content in {}: {}", path, error);
        if let Some(warning) = SectionWarning::from_error(path, &error) {
            document.add_warning(warning);
        }
        Ok(())
    }
}

fn build_metadata(header: &FileHeader, layout: &StreamLayout) -> Metadata {
    Metadata {
        version: header.version.to_string(),
        compressed: header.is_compressed(),
        distributed: header.is_distributed(),
        has_summary: layout.summary.is_some(),
        section_count: layout.sections.len() as u32,
    }
}
