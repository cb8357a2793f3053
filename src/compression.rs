//! Decompression backends for block payloads.
//!
//! Two codec families appear in FST files: zlib/gzip for geometry, header
//! and time tables, and the raw LZ4 *block* format (never the frame format)
//! for hierarchy and wave data. Backends are selected at build time through
//! the `gzip` and `lz4` cargo features.

#[cfg(feature = "gzip")]
use std::io::Read;

#[cfg(feature = "gzip")]
use flate2::read::{GzDecoder, ZlibDecoder};
#[cfg(feature = "lz4")]
use lz4_flex::block::decompress as lz4_decompress;

use crate::error::{CodecKind, Error, Result};

/// Decompresses a gzip- or zlib-framed buffer. Tries gzip framing first and
/// falls back to raw zlib, as FST writers have used both for hierarchy data.
pub fn gzip_decompress(data: &[u8]) -> Result<Vec<u8>> {
    #[cfg(feature = "gzip")]
    {
        let mut out = Vec::new();
        if GzDecoder::new(data).read_to_end(&mut out).is_ok() {
            return Ok(out);
        }
        out.clear();
        ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|err| Error::Decompression {
                kind: CodecKind::Gzip,
                detail: err.to_string(),
            })?;
        Ok(out)
    }
    #[cfg(not(feature = "gzip"))]
    {
        let _ = data;
        Err(Error::Unsupported(
            "gzip/zlib decompression requires the `gzip` feature",
        ))
    }
}

/// Decompresses a zlib-framed buffer.
pub fn zlib_decompress(data: &[u8]) -> Result<Vec<u8>> {
    #[cfg(feature = "gzip")]
    {
        let mut out = Vec::new();
        ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|err| Error::Decompression {
                kind: CodecKind::Gzip,
                detail: err.to_string(),
            })?;
        Ok(out)
    }
    #[cfg(not(feature = "gzip"))]
    {
        let _ = data;
        Err(Error::Unsupported(
            "zlib decompression requires the `gzip` feature",
        ))
    }
}

/// Decompresses a raw LZ4 block. The expected size pre-allocates the output
/// and the result length is verified against it.
pub fn lz4_block_decompress(data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    #[cfg(feature = "lz4")]
    {
        let out = lz4_decompress(data, expected_len).map_err(|err| Error::Decompression {
            kind: CodecKind::Lz4,
            detail: err.to_string(),
        })?;
        if out.len() != expected_len {
            return Err(Error::Decompression {
                kind: CodecKind::Lz4,
                detail: format!("decompressed {} bytes, expected {expected_len}", out.len()),
            });
        }
        Ok(out)
    }
    #[cfg(not(feature = "lz4"))]
    {
        let _ = (data, expected_len);
        Err(Error::Unsupported(
            "LZ4 block decompression requires the `lz4` feature",
        ))
    }
}
