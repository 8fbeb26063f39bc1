//! Line normalization applied before table reconstruction.

use unicode_normalization::UnicodeNormalization;

use crate::model::Document;

use super::RenderOptions;

/// Collect the document lines in reading order and normalize them.
pub fn normalized_lines(doc: &Document, options: &RenderOptions) -> Vec<String> {
    if options.normalize_unicode {
        let lines: Vec<String> = doc.lines().map(normalize_nfc).collect();
        collapse_blank_lines(&lines)
    } else {
        let lines: Vec<&str> = doc.lines().collect();
        collapse_blank_lines(&lines)
    }
}

/// Whether a line holds only whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Collapse every run of blank lines into a single empty line.
///
/// Single blank lines are kept (as `""`); leading and trailing blank lines
/// survive until the final trim of the rendered output. Applying the
/// function twice gives the same result as applying it once.
pub fn collapse_blank_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut cleaned = Vec::with_capacity(lines.len());
    let mut prev_blank = false;

    for line in lines {
        let line = line.as_ref();
        if is_blank(line) {
            if !prev_blank {
                cleaned.push(String::new());
            }
            prev_blank = true;
        } else {
            cleaned.push(line.to_string());
            prev_blank = false;
        }
    }

    cleaned
}

/// Normalize a line to Unicode NFC.
///
/// Decomposed Hangul jamo sequences become precomposed syllables.
pub fn normalize_nfc(line: &str) -> String {
    line.nfc().collect()
}
