//! JSON rendering for HWP documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, SectionContent};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.metadata = Metadata::with_version("5.0.3.0");
        doc.add_section(SectionContent::with_lines(0, "BodyText/Section0", ["Hello"]));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("5.0.3.0"));
        assert!(json.contains("Hello"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let doc = Document::new();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["sections"].as_array().unwrap().is_empty());
    }
}
