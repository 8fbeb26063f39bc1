//! Parsing options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

use super::text::ControlMode;

/// Options for parsing HWP documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for section-level failures
    pub error_mode: ErrorMode,

    /// How control characters inside paragraph text are handled
    pub control_mode: ControlMode,

    /// Honor the `0xFFF` extended-length escape in record headers
    pub extended_lengths: bool,

    /// Require the `HwpSummaryInformation` stream to be present
    pub require_summary: bool,

    /// Section selection (which body sections to parse)
    pub sections: SectionSelection,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on the first damaged section instead of skipping it.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Skip damaged sections and report them as warnings.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set control character handling.
    pub fn with_control_mode(mut self, mode: ControlMode) -> Self {
        self.control_mode = mode;
        self
    }

    /// Decode HWP inline controls (tabs, line breaks) instead of stripping them.
    pub fn structured(mut self) -> Self {
        self.control_mode = ControlMode::Structured;
        self
    }

    /// Enable or disable the extended-length record escape.
    pub fn with_extended_lengths(mut self, enabled: bool) -> Self {
        self.extended_lengths = enabled;
        self
    }

    /// Require the summary information stream.
    pub fn with_require_summary(mut self, require: bool) -> Self {
        self.require_summary = require;
        self
    }

    /// Set section selection.
    pub fn with_sections(mut self, sections: SectionSelection) -> Self {
        self.sections = sections;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            control_mode: ControlMode::Strip,
            extended_lengths: true,
            require_summary: false,
            sections: SectionSelection::All,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    Strict,
    /// Skip damaged sections and continue
    #[default]
    Lenient,
}

/// Section selection for parsing, by section index (0-based, as stored in
/// the stream names).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SectionSelection {
    /// Parse all sections
    #[default]
    All,
    /// Parse a range of sections (inclusive)
    Range(RangeInclusive<u32>),
    /// Parse the union of several inclusive ranges; a single section is `n..=n`
    Sections(Vec<RangeInclusive<u32>>),
}

impl SectionSelection {
    /// Check if a section index should be included.
    pub fn includes(&self, index: u32) -> bool {
        match self {
            SectionSelection::All => true,
            SectionSelection::Range(range) => range.contains(&index),
            SectionSelection::Sections(ranges) => ranges.iter().any(|r| r.contains(&index)),
        }
    }

    /// Parse a selection string (e.g., "0-3", "0,2,5-7").
    ///
    /// List entries are kept as ranges, sorted and merged where they
    /// overlap or touch.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(SectionSelection::All);
        }

        let invalid = |what: &str| Error::InvalidSectionRange(format!("{}: {:?}", what, s));
        let index = |text: &str| -> Result<u32> {
            text.trim().parse().map_err(|_| invalid("invalid index"))
        };
        let range = |part: &str| -> Result<RangeInclusive<u32>> {
            let (start, end) = match part.split_once('-') {
                Some((start, end)) => (index(start)?, index(end)?),
                None => {
                    let single = index(part)?;
                    (single, single)
                }
            };
            if start > end {
                return Err(invalid("start after end"));
            }
            Ok(start..=end)
        };

        if !s.contains(',') {
            if s.contains('-') {
                return Ok(SectionSelection::Range(range(s)?));
            }
            let single = index(s)?;
            return Ok(SectionSelection::Sections(vec![single..=single]));
        }

        let mut ranges = s.split(',').map(range).collect::<Result<Vec<_>>>()?;
        ranges.sort_unstable_by_key(|r| *r.start());

        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
        for next in ranges {
            match merged.last_mut() {
                Some(last) if *next.start() <= last.end().saturating_add(1) => {
                    if next.end() > last.end() {
                        *last = *last.start()..=*next.end();
                    }
                }
                _ => merged.push(next),
            }
        }

        Ok(SectionSelection::Sections(merged))
    }
}
