//! Integration tests for the converter module.

mod common;

use common::{para_text, HwpBuilder};
use unhwp::convert::{ConvertOptions, HwpConverter, OutputFormat};
use unhwp::{CfbContainer, Error, JsonFormat, RenderOptions, WarningKind};

fn sample_document() -> Vec<u8> {
    HwpBuilder::new()
        .compressed()
        .section(0, para_text("이름\t나이\n홍길동\t30"))
        .section(1, para_text("끝"))
        .build()
}

fn damaged_document() -> Vec<u8> {
    HwpBuilder::new()
        .compressed()
        .raw_section("Section0", vec![0xFF; 8])
        .section(1, para_text("ok"))
        .build()
}

#[test]
fn test_convert_bytes_markdown() {
    let result = HwpConverter::default()
        .convert_bytes(&sample_document())
        .unwrap();

    assert_eq!(
        result.content,
        "| 이름 | 나이 |\n| --- | --- |\n| 홍길동 | 30 |\n\n끝\n"
    );
    assert_eq!(result.mime_type(), "text/markdown");
    assert_eq!(result.file_name("sample"), "sample.md");
    assert!(!result.is_partial());
    assert_eq!(result.metadata.section_count, 2);
    assert_eq!(result.stats.table_count, 1);
    assert_eq!(result.stats.table_row_count, 2);
    assert_eq!(result.stats.line_count, 1);
}

#[test]
fn test_convert_bytes_text() {
    let converter = HwpConverter::new(ConvertOptions::new().with_format(OutputFormat::Text));
    let result = converter.convert_bytes(&sample_document()).unwrap();

    assert_eq!(result.content, "이름\t나이\n홍길동\t30\n끝\n");
    assert_eq!(result.mime_type(), "text/plain");
    assert_eq!(result.stats.line_count, 3);
}

#[test]
fn test_convert_file_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.hwp");
    std::fs::write(&path, sample_document()).unwrap();

    let options = ConvertOptions::new().with_format(OutputFormat::Json(JsonFormat::Pretty));
    let result = HwpConverter::new(options).convert_file(&path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&result.content).unwrap();
    assert_eq!(value["metadata"]["section_count"], 2);
    assert_eq!(result.mime_type(), "application/json");
    assert_eq!(result.file_name("report"), "report.json");
}

#[test]
fn test_convert_container_with_render_options() {
    let mut container = CfbContainer::from_bytes(sample_document()).unwrap();
    let options = ConvertOptions::new().with_render_options(RenderOptions::new().with_tables(false));

    let result = HwpConverter::new(options)
        .convert_container(&mut container)
        .unwrap();
    assert_eq!(result.content, "이름\t나이\n홍길동\t30\n끝\n");
    assert_eq!(result.stats.table_count, 0);
}

#[test]
fn test_lenient_conversion_is_partial() {
    let result = HwpConverter::default()
        .convert_bytes(&damaged_document())
        .unwrap();

    assert_eq!(result.content, "ok\n");
    assert!(result.is_partial());
    assert_eq!(result.warnings[0].section_index, 0);
    assert_eq!(result.warnings[0].kind, WarningKind::DecompressionFailed);
    assert_eq!(result.stats.sections_skipped, 1);
}

#[test]
fn test_strict_conversion_fails() {
    let converter = HwpConverter::new(ConvertOptions::new().strict());
    let result = converter.convert_bytes(&damaged_document());
    assert!(matches!(
        result,
        Err(Error::DecompressionFailed { section_index: 0, .. })
    ));
}

#[test]
fn test_convert_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = HwpConverter::default().convert_file(dir.path().join("missing.hwp"));
    assert!(matches!(result, Err(Error::Io(_))));
}
