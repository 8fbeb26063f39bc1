//! Document-level types.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A parsed HWP document: the decoded lines of every section plus the
/// warnings raised for sections that could not be read completely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (format version, flags)
    pub metadata: Metadata,

    /// Sections in reading order
    pub sections: Vec<SectionContent>,

    /// Sections skipped or cut short during parsing
    pub warnings: Vec<SectionWarning>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of parsed sections.
    pub fn section_count(&self) -> u32 {
        self.sections.len() as u32
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: SectionContent) {
        self.sections.push(section);
    }

    /// Record a section-level warning.
    pub fn add_warning(&mut self, warning: SectionWarning) {
        self.warnings.push(warning);
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Whether some content was lost to section-level errors.
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Iterate over all lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.lines.iter().map(String::as_str))
    }

    /// Get plain text content of the entire document, one line per line.
    pub fn plain_text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

/// Document metadata taken from the `FileHeader` stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Format version (e.g., "5.0.3.0")
    pub version: String,

    /// Whether section streams were compressed
    pub compressed: bool,

    /// Whether this is a distribution document
    pub distributed: bool,

    /// Whether the summary information stream is present
    pub has_summary: bool,

    /// Number of body sections found in the container
    pub section_count: u32,
}

impl Metadata {
    /// Create new metadata with format version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let lines = [
            "---".to_string(),
            format!("format: \"HWP {}\"", escape_yaml(&self.version)),
            format!("compressed: {}", self.compressed),
            format!("sections: {}", self.section_count),
            "---".to_string(),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Decoded lines of one body section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionContent {
    /// Section index from the stream name
    pub index: u32,

    /// Stream path inside the container
    pub path: String,

    /// Right-trimmed lines in record order
    pub lines: Vec<String>,
}

impl SectionContent {
    /// Create an empty section.
    pub fn new(index: u32, path: impl Into<String>) -> Self {
        Self {
            index,
            path: path.into(),
            lines: Vec::new(),
        }
    }

    /// Create a section with lines.
    pub fn with_lines<S: Into<String>>(
        index: u32,
        path: impl Into<String>,
        lines: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            index,
            path: path.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Kind of section-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The section payload could not be inflated; the section was skipped
    DecompressionFailed,
    /// A record ran past the end of the buffer; later records were dropped
    TruncatedRecord {
        /// Byte offset of the damaged record
        offset: usize,
    },
}

/// A recoverable problem attached to a still-returned document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionWarning {
    /// Affected section index
    pub section_index: u32,

    /// Stream path of the section
    pub path: String,

    /// What went wrong
    pub kind: WarningKind,

    /// Human-readable description
    pub message: String,
}

impl SectionWarning {
    /// Build a warning from a recoverable error. Returns `None` for fatal
    /// errors.
    pub fn from_error(path: impl Into<String>, error: &Error) -> Option<Self> {
        let (section_index, kind) = match error {
            Error::DecompressionFailed { section_index, .. } => {
                (*section_index, WarningKind::DecompressionFailed)
            }
            Error::TruncatedRecord {
                section_index,
                offset,
            } => (
                *section_index,
                WarningKind::TruncatedRecord { offset: *offset },
            ),
            _ => return None,
        };

        Some(Self {
            section_index,
            path: path.into(),
            kind,
            message: error.to_string(),
        })
    }
}

impl std::fmt::Display for SectionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.path)
    }
}
