//! Section payload decompression (raw deflate, no zlib header or checksum).

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{Error, Result};

const CHUNK_SIZE: usize = 32 * 1024;

/// Return the decoded section payload.
///
/// Uncompressed payloads are passed through unchanged. Compressed payloads
/// are inflated; any trailing bytes after the end of the deflate stream are
/// ignored.
///
/// # Errors
/// [`Error::DecompressionFailed`] if the deflate stream is corrupt or ends
/// before its final block.
pub fn decode_payload(section_index: u32, raw: Vec<u8>, compressed: bool) -> Result<Vec<u8>> {
    if !compressed {
        return Ok(raw);
    }

    inflate_raw(&raw).map_err(|reason| Error::DecompressionFailed {
        section_index,
        reason,
    })
}

/// Inflate a raw deflate stream.
pub fn inflate_raw(data: &[u8]) -> std::result::Result<Vec<u8>, String> {
    let mut decoder = Decompress::new(false);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).max(CHUNK_SIZE));

    loop {
        if out.capacity() - out.len() < CHUNK_SIZE {
            out.reserve(CHUNK_SIZE);
        }

        let before_in = decoder.total_in();
        let before_out = decoder.total_out();
        let input = &data[before_in as usize..];

        let status = decoder
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| e.to_string())?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                let stalled =
                    decoder.total_in() == before_in && decoder.total_out() == before_out;
                if stalled {
                    return Err(format!(
                        "deflate stream ended early after {} input bytes",
                        decoder.total_in()
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::DeflateEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_uncompressed_passthrough() {
        let raw = vec![1, 2, 3, 4];
        assert_eq!(decode_payload(0, raw.clone(), false).unwrap(), raw);
    }

    #[test]
    fn test_inflate_roundtrip() {
        let payload: Vec<u8> = (0..100_000u32).flat_map(|i| (i % 251).to_le_bytes()).collect();
        let inflated = decode_payload(3, deflate(&payload), true).unwrap();
        assert_eq!(inflated, payload);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut compressed = deflate(b"section body");
        compressed.extend_from_slice(b"\x00\x00garbage");
        assert_eq!(decode_payload(0, compressed, true).unwrap(), b"section body");
    }

    #[test]
    fn test_truncated_stream_fails() {
        let payload = vec![7u8; 50_000];
        let compressed = deflate(&payload);
        let truncated = compressed[..compressed.len() / 2].to_vec();

        let result = decode_payload(4, truncated, true);
        assert!(matches!(
            result,
            Err(Error::DecompressionFailed { section_index: 4, .. })
        ));
    }

    #[test]
    fn test_empty_stream_fails() {
        assert!(decode_payload(0, Vec::new(), true).is_err());
    }

    #[test]
    fn test_corrupt_stream_fails() {
        // Block type 0b11 is reserved and always invalid.
        let result = decode_payload(1, vec![0xFF, 0xFF, 0xFF, 0xFF], true);
        assert!(matches!(
            result,
            Err(Error::DecompressionFailed { section_index: 1, .. })
        ));
    }
}
