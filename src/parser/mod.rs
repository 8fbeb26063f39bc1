//! HWP parsing module.

pub mod container;
mod decompress;
pub mod header;
mod hwp_parser;
pub mod locator;
mod options;
pub mod record;
pub mod text;

pub use container::{CfbContainer, Container, ContainerEntry, EntryKind};
pub use decompress::{decode_payload, inflate_raw};
pub use header::{FileHeader, Version};
pub use hwp_parser::HwpParser;
pub use locator::{locate_streams, Section, StreamLayout};
pub use options::{ErrorMode, ParseOptions, SectionSelection};
pub use record::{Record, RecordReader};
pub use text::{ControlMode, TextDecoder};
