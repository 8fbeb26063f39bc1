//! Rendering module for converting documents to various output formats.

mod json;
mod markdown;
mod normalize;
mod options;
mod result;
mod table;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{render_table_markdown, to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use normalize::{collapse_blank_lines, is_blank, normalize_nfc, normalized_lines};
pub use options::RenderOptions;
pub use result::{Extraction, ExtractionStats};
pub use table::{is_tabular, reconstruct, split_cells};
pub use text::to_text;
