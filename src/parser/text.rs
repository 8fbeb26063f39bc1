//! Paragraph text decoding.
//!
//! `PARA_TEXT` payloads are UTF-16LE code units. Besides ordinary
//! characters they contain control codes below U+0020 that mark tabs,
//! breaks and embedded objects; some of those codes carry seven additional
//! code units of parameters.

use serde::{Deserialize, Serialize};

/// How control codes inside paragraph text are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Remove every code point below U+0020 except tab, line feed and
    /// carriage return, which drive cell and line splitting.
    #[default]
    Strip,
    /// Interpret control codes: skip the parameters of inline and extended
    /// controls, map tabs and breaks to `\t` and line boundaries.
    Structured,
}

/// Code units occupied by an inline or extended control.
const CONTROL_WIDTH: usize = 8;

const CTRL_TAB: u16 = 9;
const CTRL_LINE_BREAK: u16 = 10;
const CTRL_PARA_BREAK: u16 = 13;
const CTRL_HYPHEN: u16 = 24;
const CTRL_KEEP_BLANK: u16 = 30;
const CTRL_FIXED_BLANK: u16 = 31;

/// Decoder for `PARA_TEXT` record payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDecoder {
    mode: ControlMode,
}

impl TextDecoder {
    /// Create a decoder with the given control handling.
    pub fn new(mode: ControlMode) -> Self {
        Self { mode }
    }

    /// Decode a payload into right-trimmed lines.
    pub fn decode(&self, payload: &[u8]) -> Vec<String> {
        let text = match self.mode {
            ControlMode::Strip => strip_control_chars(&decode_utf16_lossy(payload)),
            ControlMode::Structured => decode_structured(payload),
        };
        split_lines(&text)
    }
}

/// Decode UTF-16LE, dropping unpaired surrogates and an odd trailing byte.
pub fn decode_utf16_lossy(payload: &[u8]) -> String {
    char::decode_utf16(code_units(payload))
        .filter_map(|r| r.ok())
        .collect()
}

/// Remove control characters (U+0000–U+001F) other than `\t`, `\n`, `\r`.
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| c >= ' ' || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Split text into lines and right-trim each of them.
///
/// Recognized boundaries are `\r\n`, `\n`, `\r`, U+0085, U+2028 and U+2029.
/// A trailing boundary does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(current.trim_end().to_string());
                current.clear();
            }
            '\n' | '\u{85}' | '\u{2028}' | '\u{2029}' => {
                lines.push(current.trim_end().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        lines.push(current.trim_end().to_string());
    }

    lines
}

fn code_units(payload: &[u8]) -> impl Iterator<Item = u16> + '_ {
    payload
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
}

/// Whether a control code is followed by seven parameter code units.
fn is_wide_control(unit: u16) -> bool {
    matches!(unit, 1..=9 | 11 | 12 | 14..=23)
}

fn decode_structured(payload: &[u8]) -> String {
    let units: Vec<u16> = code_units(payload).collect();
    let mut cleaned = Vec::with_capacity(units.len());
    let mut i = 0;

    while i < units.len() {
        let unit = units[i];
        if unit >= 0x20 {
            cleaned.push(unit);
            i += 1;
            continue;
        }

        match unit {
            CTRL_TAB => cleaned.push('\t' as u16),
            CTRL_LINE_BREAK | CTRL_PARA_BREAK => cleaned.push('\n' as u16),
            CTRL_HYPHEN => cleaned.push('-' as u16),
            CTRL_KEEP_BLANK | CTRL_FIXED_BLANK => cleaned.push(' ' as u16),
            _ => {}
        }

        i += if is_wide_control(unit) {
            CONTROL_WIDTH
        } else {
            1
        };
    }

    char::decode_utf16(cleaned)
        .filter_map(|r| r.ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    fn units(units: &[u16]) -> Vec<u8> {
        units.iter().flat_map(|u| u.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_korean_text() {
        let decoder = TextDecoder::default();
        assert_eq!(decoder.decode(&utf16("안녕하세요 한글")), vec!["안녕하세요 한글"]);
    }

    #[test]
    fn test_strip_removes_control_codes_in_order() {
        let decoder = TextDecoder::new(ControlMode::Strip);
        let lines = decoder.decode(&utf16("a\u{0}b\u{1}\u{2}c\u{1f}d\u{b}e\u{c}f"));
        assert_eq!(lines, vec!["abcdef"]);
        assert!(lines.iter().all(|l| l.chars().all(|c| c >= ' ')));
    }

    #[test]
    fn test_strip_keeps_structural_whitespace() {
        let decoder = TextDecoder::new(ControlMode::Strip);
        let lines = decoder.decode(&utf16("Hello\tWorld\nFoo  Bar"));
        assert_eq!(lines, vec!["Hello\tWorld", "Foo  Bar"]);
    }

    #[test]
    fn test_lines_are_right_trimmed() {
        let decoder = TextDecoder::default();
        let lines = decoder.decode(&utf16("first   \r\n  second\t\rthird \u{2029}"));
        assert_eq!(lines, vec!["first", "  second", "third"]);
    }

    #[test]
    fn test_blank_lines_preserved() {
        assert_eq!(split_lines("a\n\n\nb\n"), vec!["a", "", "", "b"]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_invalid_utf16_is_dropped() {
        // 'A', lone high surrogate, 'B', odd trailing byte
        let mut payload = units(&[0x41, 0xD800, 0x42]);
        payload.push(0x43);
        assert_eq!(decode_utf16_lossy(&payload), "AB");
    }

    #[test]
    fn test_surrogate_pair_decoded() {
        assert_eq!(decode_utf16_lossy(&utf16("𝄞 clef")), "𝄞 clef");
    }

    #[test]
    fn test_structured_skips_control_parameters() {
        // "A", extended control 11 (table) with 7 parameter units spelling
        // " lbt" as ASCII, then "B", paragraph break.
        let mut raw = vec![0x41, 11];
        raw.extend_from_slice(&[0x6C74, 0x6220, 0, 0, 0, 0, 11]);
        raw.extend_from_slice(&[0x42, 13]);

        let decoder = TextDecoder::new(ControlMode::Structured);
        assert_eq!(decoder.decode(&units(&raw)), vec!["AB"]);
    }

    #[test]
    fn test_structured_maps_tabs_and_breaks() {
        let mut raw = vec![0x61];
        raw.extend_from_slice(&[9, 0x1000, 0, 0x20, 0, 0, 0, 9]);
        raw.push(0x62);
        raw.push(10);
        raw.extend_from_slice(&[0x63, 30, 0x64, 24, 0x65, 13]);

        let decoder = TextDecoder::new(ControlMode::Structured);
        assert_eq!(decoder.decode(&units(&raw)), vec!["a\tb", "c d-e"]);
    }

    #[test]
    fn test_strip_mode_leaves_control_parameters() {
        // Parameters above U+001F survive plain stripping.
        let raw = [0x41, 11, 0x6C74, 0x6220, 0, 0, 0, 11, 0x42];
        let decoder = TextDecoder::new(ControlMode::Strip);
        let line = &decoder.decode(&units(&raw))[0];
        assert!(line.starts_with('A'));
        assert!(line.ends_with('B'));
        assert_eq!(line.chars().count(), 4);
    }
}
