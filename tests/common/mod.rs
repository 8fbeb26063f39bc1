//! Builders for synthetic HWP documents.
#![allow(dead_code)]

use std::io::{Cursor, Write};

use flate2::write::DeflateEncoder;
use flate2::Compression;
use unhwp::parser::header::{FileHeader, Version, PROP_COMPRESSED};
use unhwp::parser::record::{encode_header, tags};

/// Builds an HWP compound file in memory.
pub struct HwpBuilder {
    properties: u32,
    summary: bool,
    header: bool,
    sections: Vec<(String, Vec<u8>, bool)>,
}

impl HwpBuilder {
    pub fn new() -> Self {
        Self {
            properties: 0,
            summary: true,
            header: true,
            sections: Vec::new(),
        }
    }

    /// Mark the document compressed; sections added with `section` are deflated.
    pub fn compressed(mut self) -> Self {
        self.properties |= PROP_COMPRESSED;
        self
    }

    pub fn with_properties(mut self, properties: u32) -> Self {
        self.properties |= properties;
        self
    }

    pub fn without_summary(mut self) -> Self {
        self.summary = false;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    /// Add a section from its uncompressed record bytes.
    pub fn section(mut self, index: u32, records: Vec<u8>) -> Self {
        self.sections
            .push((format!("Section{}", index), records, true));
        self
    }

    /// Add a section whose bytes are stored exactly as given.
    pub fn raw_section(mut self, name: &str, data: Vec<u8>) -> Self {
        self.sections.push((name.to_string(), data, false));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();

        if self.header {
            let header = FileHeader {
                version: Version {
                    major: 5,
                    minor: 0,
                    build: 3,
                    revision: 0,
                },
                properties: self.properties,
            };
            comp.create_stream("/FileHeader")
                .unwrap()
                .write_all(&header.to_bytes())
                .unwrap();
        }

        if self.summary {
            comp.create_stream("/\u{5}HwpSummaryInformation")
                .unwrap()
                .write_all(&[0u8; 48])
                .unwrap();
        }

        if !self.sections.is_empty() {
            comp.create_storage("/BodyText").unwrap();
        }
        let compressed = self.properties & PROP_COMPRESSED != 0;
        for (name, data, encode) in &self.sections {
            let bytes = if *encode && compressed {
                deflate(data)
            } else {
                data.clone()
            };
            comp.create_stream(format!("/BodyText/{}", name))
                .unwrap()
                .write_all(&bytes)
                .unwrap();
        }

        comp.flush().unwrap();
        comp.into_inner().into_inner()
    }
}

/// Encode one record.
pub fn record(tag: u16, payload: &[u8]) -> Vec<u8> {
    let mut data = encode_header(tag, 0, payload.len() as u32);
    data.extend_from_slice(payload);
    data
}

/// Encode a `PARA_TEXT` record holding `text`.
pub fn para_text(text: &str) -> Vec<u8> {
    record(tags::PARA_TEXT, &utf16(text))
}

/// Encode a `PARA_TEXT` record from raw code units.
pub fn para_units(units: &[u16]) -> Vec<u8> {
    let payload: Vec<u8> = units.iter().flat_map(|u| u.to_le_bytes()).collect();
    record(tags::PARA_TEXT, &payload)
}

/// A paragraph header record, which carries no text.
pub fn para_header() -> Vec<u8> {
    record(tags::PARA_HEADER, &[0u8; 22])
}

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
