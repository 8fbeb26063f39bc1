//! Document model types for HWP content representation.
//!
//! The parser fills a [`Document`] with decoded section lines; the renderer
//! turns those lines into [`Block`]s (plain lines and reconstructed tables).

mod block;
mod document;
mod table;

pub use block::Block;
pub use document::{Document, Metadata, SectionContent, SectionWarning, WarningKind};
pub use table::{Table, TableRow};
