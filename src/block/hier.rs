use serde::Serialize;
use tracing::warn;

use super::BlockContext;
use crate::compression::{gzip_decompress, lz4_block_decompress};
use crate::cursor::ByteReader;
use crate::error::Result;
use crate::hierarchy::parse_hier_binary;

/// Header artifact shared by HIER_GZ and HIER_LZ4 blocks.
#[derive(Debug, Serialize)]
struct HierInfo {
    offset: u64,
    payload_len: u64,
    declared_uncompressed_length: u64,
    actual_uncompressed_length: u64,
    decompressed_ok: bool,
}

/// Header artifact for HIER_LZ4DUO blocks, which decompress in two stages.
#[derive(Debug, Serialize)]
struct HierDuoInfo {
    offset: u64,
    payload_len: u64,
    declared_uncompressed_length: u64,
    declared_compressed_once_length: u64,
    after_lz4_length: u64,
    actual_uncompressed_length: u64,
    outer_lz4_ok: bool,
    inner_lz4_ok: bool,
    uncompressed_length_match: bool,
}

fn write_result<T: Serialize>(ctx: &BlockContext, info: &T, decompressed: &[u8]) -> Result<()> {
    ctx.emit_json(0, "header.json", info)?;
    ctx.emit(0, "full.bin", decompressed)?;
    let parsed = parse_hier_binary(decompressed)?;
    ctx.emit_json(1, "decoded.json", &parsed)
}

/// Decodes a HIER_GZ block: `uncompressed_length u64` followed by gzip- or
/// zlib-compressed hierarchy data.
pub fn decode_gz(payload: &[u8], ctx: &BlockContext) -> Result<()> {
    if payload.len() < 8 {
        warn!(len = payload.len(), "HIER_GZ payload too small, skipping");
        return Ok(());
    }
    let mut br = ByteReader::new(payload);
    let uncompressed_length = br.read_u64()?;
    let dec = gzip_decompress(br.read_bytes(br.remaining()))?;

    let info = HierInfo {
        offset: ctx.offset,
        payload_len: payload.len() as u64,
        declared_uncompressed_length: uncompressed_length,
        actual_uncompressed_length: dec.len() as u64,
        decompressed_ok: true,
    };
    write_result(ctx, &info, &dec)
}

/// Decodes a HIER_LZ4 block: `uncompressed_length u64` followed by one raw
/// LZ4 block.
pub fn decode_lz4(payload: &[u8], ctx: &BlockContext) -> Result<()> {
    if payload.len() < 8 {
        warn!(len = payload.len(), "HIER_LZ4 payload too small, skipping");
        return Ok(());
    }
    let mut br = ByteReader::new(payload);
    let uncompressed_length = br.read_u64()?;
    let dec = lz4_block_decompress(br.read_bytes(br.remaining()), uncompressed_length as usize)?;

    let info = HierInfo {
        offset: ctx.offset,
        payload_len: payload.len() as u64,
        declared_uncompressed_length: uncompressed_length,
        actual_uncompressed_length: dec.len() as u64,
        decompressed_ok: true,
    };
    write_result(ctx, &info, &dec)
}

/// Decodes a HIER_LZ4DUO block: `uncompressed_length u64,
/// compressed_once_length u64` followed by doubly LZ4-compressed data. The
/// outer decode yields the once-compressed buffer, the inner decode the
/// hierarchy stream.
pub fn decode_lz4_duo(payload: &[u8], ctx: &BlockContext) -> Result<()> {
    if payload.len() < 16 {
        warn!(len = payload.len(), "HIER_LZ4DUO payload too small, skipping");
        return Ok(());
    }
    let mut br = ByteReader::new(payload);
    let uncompressed_length = br.read_u64()?;
    let compressed_once_length = br.read_u64()?;
    let once =
        lz4_block_decompress(br.read_bytes(br.remaining()), compressed_once_length as usize)?;
    let dec = lz4_block_decompress(&once, uncompressed_length as usize)?;

    let info = HierDuoInfo {
        offset: ctx.offset,
        payload_len: payload.len() as u64,
        declared_uncompressed_length: uncompressed_length,
        declared_compressed_once_length: compressed_once_length,
        after_lz4_length: once.len() as u64,
        actual_uncompressed_length: dec.len() as u64,
        outer_lz4_ok: true,
        inner_lz4_ok: true,
        uncompressed_length_match: dec.len() as u64 == uncompressed_length,
    };
    write_result(ctx, &info, &dec)
}
