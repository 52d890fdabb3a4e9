//! This module contains the pure, stateless kernels for Zstandard compression
//! and decompression.
//!
//! This is the tail stage of every pipeline cycle. It takes the serialized
//! output of a transform codec and applies a modern entropy coder to it.
//! This module is a safe, panic-free wrapper around the `zstd` crate.

use std::io::{Read, Write};

use crate::error::StrataError;

/// Size of the little-endian uncompressed-length header that prefixes every frame.
pub const LENGTH_HEADER_SIZE: usize = 8;

//==================================================================================
// 1. Public API
//==================================================================================

/// Compresses `input_bytes`, prepending the uncompressed length so `decode`
/// can validate the result. Empty input encodes to an empty buffer.
pub fn encode(input_bytes: &[u8], level: i32) -> Result<Vec<u8>, StrataError> {
    if input_bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut output_buf = Vec::with_capacity(input_bytes.len() / 2 + LENGTH_HEADER_SIZE);
    let uncompressed_len: u64 = input_bytes.len() as u64;
    output_buf.extend_from_slice(&uncompressed_len.to_le_bytes());

    let mut encoder = zstd::stream::Encoder::new(&mut output_buf, level)
        .map_err(|e| StrataError::ZstdError(e.to_string()))?;
    encoder
        .write_all(input_bytes)
        .map_err(|e| StrataError::ZstdError(e.to_string()))?;
    // `finish` is essential to finalize the Zstd frame.
    encoder
        .finish()
        .map_err(|e| StrataError::ZstdError(e.to_string()))?;

    Ok(output_buf)
}

/// Reverses `encode`, checking the decompressed length against the header.
pub fn decode(input_bytes: &[u8]) -> Result<Vec<u8>, StrataError> {
    if input_bytes.is_empty() {
        return Ok(Vec::new());
    }

    let (len_bytes, compressed_data) = match input_bytes.split_first_chunk::<LENGTH_HEADER_SIZE>() {
        Some(parts) => parts,
        None => {
            return Err(StrataError::ZstdError(
                "Input stream too short to contain size header.".to_string(),
            ))
        }
    };
    let declared_len = u64::from_le_bytes(*len_bytes);
    let uncompressed_len = declared_len as usize;

    // Cap the reservation; a corrupt header must not trigger a huge allocation.
    let mut decompressed_data = Vec::with_capacity(uncompressed_len.min(1 << 24));
    // One byte past the header length is enough to detect an oversized frame.
    let decoder = zstd::stream::read::Decoder::new(compressed_data)
        .map_err(|e| StrataError::ZstdError(e.to_string()))?;
    decoder
        .take(declared_len.saturating_add(1))
        .read_to_end(&mut decompressed_data)
        .map_err(|e| StrataError::ZstdError(e.to_string()))?;

    if decompressed_data.len() != uncompressed_len {
        return Err(StrataError::ZstdError(format!(
            "Decompressed size does not match header. Expected {}, got {}.",
            uncompressed_len,
            decompressed_data.len()
        )));
    }

    Ok(decompressed_data)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zstd_roundtrip_simple_text() {
        let original_bytes =
            b"hello world, this is a test of zstd compression. hello world, this is a test."
                .to_vec();
        let compressed_bytes = encode(&original_bytes, 3).unwrap();
        assert!(compressed_bytes.len() < original_bytes.len());
        let decompressed_bytes = decode(&compressed_bytes).unwrap();
        assert_eq!(original_bytes, decompressed_bytes);
    }

    #[test]
    fn test_zstd_roundtrip_highly_compressible_data() {
        let original_bytes = vec![42u8; 10_000];
        let compressed_bytes = encode(&original_bytes, 5).unwrap();
        // The 8-byte header is included in the size.
        assert!(compressed_bytes.len() < 50);
        assert_eq!(decode(&compressed_bytes).unwrap(), original_bytes);
    }

    #[test]
    fn test_zstd_empty_input_is_empty_frame() {
        assert!(encode(&[], 3).unwrap().is_empty());
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_zstd_decompress_invalid_data() {
        let result = decode(&[1, 2, 3, 4, 5]);
        assert!(matches!(result, Err(StrataError::ZstdError(_))));

        let mut tampered = encode(b"some payload some payload", 3).unwrap();
        tampered[0] = tampered[0].wrapping_add(1);
        assert!(matches!(decode(&tampered), Err(StrataError::ZstdError(_))));
    }

    #[test]
    fn test_zstd_stops_at_declared_length() {
        // A 1 MiB frame behind a header that declares 10 bytes.
        let mut forged = encode(&vec![0u8; 1 << 20], 3).unwrap();
        forged[..LENGTH_HEADER_SIZE].copy_from_slice(&10u64.to_le_bytes());
        match decode(&forged) {
            Err(StrataError::ZstdError(msg)) => assert!(msg.contains("got 11"), "{}", msg),
            other => panic!("expected a size mismatch, got {:?}", other),
        }
    }
}
