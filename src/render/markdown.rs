//! Markdown rendering for HWP documents.

use crate::error::Result;
use crate::model::{Block, Document, Table, TableRow};

use super::normalize::normalized_lines;
use super::table::reconstruct;
use super::{Extraction, ExtractionStats, RenderOptions};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<Extraction> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to Markdown with extraction statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<Extraction> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        Ok(Extraction::new(content, doc, self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        if self.options.collect_stats {
            self.stats = ExtractionStats::from_document(doc);
        }

        let lines = normalized_lines(doc, &self.options);
        let blocks = if self.options.detect_tables {
            reconstruct(&lines)
        } else {
            lines.into_iter().map(Block::Line).collect()
        };

        let units: Vec<String> = blocks.iter().map(|b| self.render_block(b)).collect();
        let body = serialize(&units);

        if self.options.collect_stats {
            self.stats.count_text(&body);
        }

        let mut output = String::new();
        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }
        output.push_str(&body);
        Ok(output)
    }

    fn render_block(&mut self, block: &Block) -> String {
        match block {
            Block::Line(line) => {
                if self.options.collect_stats {
                    self.stats.add_line();
                }
                line.clone()
            }
            Block::Table(table) => {
                if self.options.collect_stats {
                    self.stats.add_table(table.row_count());
                }
                render_table_markdown(table)
            }
        }
    }
}

/// Render a table as a pipe table followed by one blank line.
///
/// The first row is the header; one-row tables emit the header and the
/// separator only.
pub fn render_table_markdown(table: &Table) -> String {
    let col_count = table.column_count();
    let Some(header) = table.header() else {
        return String::new();
    };

    let mut out = Vec::with_capacity(table.row_count() + 2);
    out.push(render_row(header));
    out.push(format!("| {} |", vec!["---"; col_count].join(" | ")));
    out.extend(table.body().iter().map(render_row));
    out.push(String::new());
    out.join("\n")
}

fn render_row(row: &TableRow) -> String {
    format!("| {} |", row.cells.join(" | "))
}

/// Join output units with newlines, trim the result and end it with
/// exactly one newline.
pub(crate) fn serialize<S: AsRef<str>>(units: &[S]) -> String {
    let joined = units
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    let mut output = joined.trim().to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionContent;

    fn doc_with(sections: &[&[&str]]) -> Document {
        let mut doc = Document::new();
        for (i, lines) in sections.iter().enumerate() {
            doc.add_section(SectionContent::with_lines(
                i as u32,
                format!("BodyText/Section{}", i),
                lines.iter().copied(),
            ));
        }
        doc
    }

    #[test]
    fn test_render_plain_lines() {
        let doc = doc_with(&[&["첫 줄", "둘째 줄"]]);
        let result = to_markdown(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(result, "첫 줄\n둘째 줄\n");
    }

    #[test]
    fn test_render_table_then_line() {
        let doc = doc_with(&[&["Hello\tWorld", "Foo  Bar"], &["Plain line"]]);
        let result = to_markdown(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(
            result,
            "| Hello | World |\n| --- | --- |\n| Foo | Bar |\n\nPlain line\n"
        );
    }

    #[test]
    fn test_single_row_table() {
        let doc = doc_with(&[&["Intro", "a\tb\tc"]]);
        let result = to_markdown(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(result, "Intro\n| a | b | c |\n| --- | --- | --- |\n");
    }

    #[test]
    fn test_table_row_count() {
        let doc = doc_with(&[&["h1\th2", "1\t2", "3\t4", "5\t6"]]);
        let result = to_markdown(&doc, &RenderOptions::new()).unwrap();
        let lines: Vec<&str> = result.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.matches('|').count() == 3));
    }

    #[test]
    fn test_tables_disabled() {
        let doc = doc_with(&[&["a\tb"]]);
        let options = RenderOptions::new().with_tables(false);
        let result = to_markdown(&doc, &options).unwrap();
        assert_eq!(result, "a\tb\n");
    }

    #[test]
    fn test_empty_document() {
        let result = to_markdown(&Document::new(), &RenderOptions::new()).unwrap();
        assert_eq!(result, "\n");
    }

    #[test]
    fn test_blank_runs_collapsed_and_trimmed() {
        let doc = doc_with(&[&["", "", "a", "", "", "", "b", ""]]);
        let result = to_markdown(&doc, &RenderOptions::new()).unwrap();
        assert_eq!(result, "a\n\nb\n");
    }

    #[test]
    fn test_render_with_frontmatter() {
        let mut doc = doc_with(&[&["body"]]);
        doc.metadata.version = "5.1.0.1".to_string();
        doc.metadata.section_count = 1;

        let options = RenderOptions::new().with_frontmatter(true);
        let result = to_markdown(&doc, &options).unwrap();
        assert!(result.starts_with("---\nformat: \"HWP 5.1.0.1\""));
        assert!(result.ends_with("---\nbody\n"));
    }

    #[test]
    fn test_render_with_stats() {
        let doc = doc_with(&[&["Title", "a\tb", "c\td"], &["end"]]);
        let result = to_markdown_with_stats(&doc, &RenderOptions::new()).unwrap();

        assert_eq!(result.stats.sections_parsed, 2);
        assert_eq!(result.stats.line_count, 2);
        assert_eq!(result.stats.table_count, 1);
        assert_eq!(result.stats.table_row_count, 2);
        assert!(result.stats.word_count > 0);
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serialize(&["", "x", ""]), "x\n");
        assert_eq!(serialize::<&str>(&[]), "\n");
    }
}
