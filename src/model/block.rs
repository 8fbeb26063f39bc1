//! Output units produced by table reconstruction.

use super::Table;
use serde::{Deserialize, Serialize};

/// One rendered unit of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum Block {
    /// A non-tabular line, emitted verbatim
    Line(String),
    /// A run of tabular lines
    Table(Table),
}

impl Block {
    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Line(line) => line.clone(),
            Block::Table(table) => table.plain_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    #[test]
    fn test_block_plain_text() {
        assert_eq!(Block::Line("text".into()).plain_text(), "text");

        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b"]));
        let block = Block::Table(table);
        assert!(block.is_table());
        assert_eq!(block.plain_text(), "a\tb");
    }

    #[test]
    fn test_block_serialization() {
        let json = serde_json::to_string(&Block::Line("x".into())).unwrap();
        assert_eq!(json, r#"{"type":"line","content":"x"}"#);
    }
}
