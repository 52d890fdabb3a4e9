//! Defines the self-describing byte format for a compression artifact.
//! This module is the single source of truth for serialization, deserialization,
//! and efficient metadata peeking of the artifact.
//!
//! Layout (all integers little-endian):
//!
//! | field            | size                |
//! |------------------|---------------------|
//! | magic `STRA`     | 4                   |
//! | format version   | 2                   |
//! | original length  | 8                   |
//! | header length    | 4                   |
//! | compressor name  | 2 + len             |
//! | chain JSON       | 4 + len             |
//! | payload length   | 8                   |
//! | payload          | payload length      |

use std::io::{Cursor, Read, Write};

use crate::error::StrataError;
use crate::pipeline::models::ChainEntry;

//==================================================================================
// Format Constants
//==================================================================================
pub const ARTIFACT_MAGIC: &[u8; 4] = b"STRA";
pub const ARTIFACT_FORMAT_VERSION: u16 = 1;
/// The minimum possible size of a valid artifact in bytes.
const MIN_ARTIFACT_SIZE: usize = 18; // magic(4) + ver(2) + original_len(8) + header_len(4)
/// A reasonable limit to prevent OOM attacks from malformed string lengths. (16MB)
const MAX_REASONABLE_STRING_LEN: usize = 16 * 1024 * 1024;

//==================================================================================
// Public Structs
//==================================================================================

/// Metadata extracted from an artifact's header by `peek_info`, without
/// copying the payload.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct HeaderInfo {
    pub format_version: u16,
    pub original_len: u64,
    pub compressor: String,
    /// The transform chain as a UTF-8 JSON string.
    pub chain_json: String,
    /// The size of the entire header section in bytes.
    pub header_size: usize,
    pub data_size: usize,
}

/// The output of a pipeline run: the final bytes plus everything needed to
/// invert them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionArtifact {
    pub original_len: u64,
    /// `ExternalCompressor::name` of the compressor every cycle used.
    pub compressor: String,
    /// Applied transforms in order of application.
    pub chain: Vec<ChainEntry>,
    pub compressed_bytes: Vec<u8>,
}

//==================================================================================
// Core Implementation
//==================================================================================

impl CompressionArtifact {
    /// Total size of the payload the chain must unwind.
    pub fn compressed_len(&self) -> usize {
        self.compressed_bytes.len()
    }

    /// Serializes the artifact into its canonical byte form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StrataError> {
        let chain_json = serde_json::to_string(&self.chain)?;

        let mut header_buf = Vec::new();
        write_prefixed_string(&mut header_buf, &self.compressor, 2)?;
        write_prefixed_string(&mut header_buf, &chain_json, 4)?;
        header_buf.extend_from_slice(&(self.compressed_bytes.len() as u64).to_le_bytes());

        let header_len = u32::try_from(header_buf.len()).map_err(|_| {
            StrataError::FrameFormatError("Header exceeds u32::MAX bytes".to_string())
        })?;

        let mut final_buf =
            Vec::with_capacity(MIN_ARTIFACT_SIZE + header_buf.len() + self.compressed_bytes.len());
        final_buf.extend_from_slice(ARTIFACT_MAGIC);
        final_buf.extend_from_slice(&ARTIFACT_FORMAT_VERSION.to_le_bytes());
        final_buf.extend_from_slice(&self.original_len.to_le_bytes());
        final_buf.extend_from_slice(&header_len.to_le_bytes());
        final_buf.extend_from_slice(&header_buf);
        final_buf.extend_from_slice(&self.compressed_bytes);

        Ok(final_buf)
    }

    /// Deserializes a full byte slice, including the payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StrataError> {
        let info = Self::peek_info(bytes)?;
        let chain: Vec<ChainEntry> = serde_json::from_str(&info.chain_json)?;

        let mut cursor = Cursor::new(bytes);
        cursor.set_position(info.header_size as u64);
        let mut compressed_bytes = vec![0; info.data_size];
        cursor
            .read_exact(&mut compressed_bytes)
            .map_err(|e| StrataError::FrameFormatError(e.to_string()))?;

        Ok(Self {
            original_len: info.original_len,
            compressor: info.compressor,
            chain,
            compressed_bytes,
        })
    }

    /// Peeks into a serialized artifact's header without reading the payload.
    pub fn peek_info(bytes: &[u8]) -> Result<HeaderInfo, StrataError> {
        if bytes.len() < MIN_ARTIFACT_SIZE {
            return Err(StrataError::FrameFormatError(format!(
                "Artifact is too small to be valid. Minimum size: {}, got: {}",
                MIN_ARTIFACT_SIZE,
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(bytes);
        let map_err = |e: std::io::Error| StrataError::FrameFormatError(e.to_string());

        let mut magic_buf = [0u8; 4];
        cursor.read_exact(&mut magic_buf).map_err(map_err)?;
        if magic_buf != *ARTIFACT_MAGIC {
            return Err(StrataError::FrameFormatError(
                "Invalid artifact magic number".into(),
            ));
        }

        let mut u16_buf = [0u8; 2];
        cursor.read_exact(&mut u16_buf).map_err(map_err)?;
        let version = u16::from_le_bytes(u16_buf);
        if version != ARTIFACT_FORMAT_VERSION {
            return Err(StrataError::FrameFormatError(format!(
                "Unsupported artifact version: expected {}, got {}",
                ARTIFACT_FORMAT_VERSION, version
            )));
        }

        let mut u64_buf = [0u8; 8];
        cursor.read_exact(&mut u64_buf).map_err(map_err)?;
        let original_len = u64::from_le_bytes(u64_buf);

        let mut u32_buf = [0u8; 4];
        cursor.read_exact(&mut u32_buf).map_err(map_err)?;
        let header_metadata_len = u32::from_le_bytes(u32_buf) as usize;
        let total_header_size = cursor.position() as usize + header_metadata_len;

        if bytes.len() < total_header_size {
            return Err(StrataError::FrameFormatError(
                "Header length exceeds buffer size".into(),
            ));
        }

        let header_bytes = &bytes[cursor.position() as usize..total_header_size];
        let mut header_cursor = Cursor::new(header_bytes);

        let compressor = read_prefixed_string(&mut header_cursor, 2)?;
        let chain_json = read_prefixed_string(&mut header_cursor, 4)?;
        header_cursor.read_exact(&mut u64_buf).map_err(map_err)?;
        let data_size = usize::try_from(u64::from_le_bytes(u64_buf))
            .map_err(|e| StrataError::FrameFormatError(e.to_string()))?;

        if total_header_size.saturating_add(data_size) != bytes.len() {
            return Err(StrataError::FrameFormatError(format!(
                "Declared header and payload sizes ({} + {}) do not match buffer length {}",
                total_header_size,
                data_size,
                bytes.len()
            )));
        }

        Ok(HeaderInfo {
            format_version: version,
            original_len,
            compressor,
            chain_json,
            header_size: total_header_size,
            data_size,
        })
    }
}

//==================================================================================
// Private Helpers
//==================================================================================

fn read_prefixed_string(
    cursor: &mut Cursor<&[u8]>,
    len_bytes: usize,
) -> Result<String, StrataError> {
    let map_err = |e: std::io::Error| StrataError::FrameFormatError(e.to_string());

    let len = match len_bytes {
        2 => {
            let mut buf = [0u8; 2];
            cursor.read_exact(&mut buf).map_err(map_err)?;
            u16::from_le_bytes(buf) as usize
        }
        4 => {
            let mut buf = [0u8; 4];
            cursor.read_exact(&mut buf).map_err(map_err)?;
            u32::from_le_bytes(buf) as usize
        }
        _ => {
            return Err(StrataError::InternalError(
                "Unsupported length prefix size".into(),
            ))
        }
    };

    if len > MAX_REASONABLE_STRING_LEN {
        return Err(StrataError::FrameFormatError(format!(
            "String length ({}) exceeds maximum allowed size ({})",
            len, MAX_REASONABLE_STRING_LEN
        )));
    }

    let mut str_buf = vec![0; len];
    cursor.read_exact(&mut str_buf).map_err(map_err)?;
    String::from_utf8(str_buf).map_err(|e| StrataError::FrameFormatError(e.to_string()))
}

fn write_prefixed_string<W: Write>(
    writer: &mut W,
    s: &str,
    len_bytes: usize,
) -> Result<(), StrataError> {
    let len = s.len();
    let limit = match len_bytes {
        2 => u16::MAX as usize,
        4 => MAX_REASONABLE_STRING_LEN,
        _ => {
            return Err(StrataError::InternalError(
                "Unsupported length prefix size".into(),
            ))
        }
    };
    if len > limit {
        return Err(StrataError::FrameFormatError(format!(
            "String length ({}) exceeds maximum allowed size ({})",
            len, limit
        )));
    }
    let map_err = |e: std::io::Error| StrataError::FrameFormatError(e.to_string());
    if len_bytes == 2 {
        writer.write_all(&(len as u16).to_le_bytes()).map_err(map_err)?;
    } else {
        writer.write_all(&(len as u32).to_le_bytes()).map_err(map_err)?;
    }
    writer.write_all(s.as_bytes()).map_err(map_err)
}

//==================================================================================
// Unit Tests
//==================================================================================
