//! Sequential block framing walker.
//!
//! Frames a flat byte file into `(type, length, payload)` records and
//! dispatches each payload to its block decoder. A block header is one type
//! byte followed by a big-endian `u64` length that counts itself but not the
//! type byte, so a block occupies `length + 1` bytes on disk.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::block::{
    BlockContext, decode_blackout, decode_geom, decode_header, decode_hier_gz, decode_hier_lz4,
    decode_hier_lz4_duo, decode_vc,
};
use crate::cursor::ByteReader;
use crate::error::{Error, Result};
use crate::sink::ArtifactSink;
use crate::types::BlockType;
use crate::util::preview;

/// Minimum number of bytes a block header occupies (type byte + length).
const BLOCK_HEADER_LEN: usize = 9;

/// Reads `input` whole, resets `output_dir`, and walks every block in the
/// file, writing artifacts as it goes.
pub fn extract_blocks(input: &Path, output_dir: &Path) -> Result<()> {
    let data = fs::read(input)?;
    info!(input = %input.display(), bytes = data.len(), "parsing FST file");

    let _ = fs::remove_dir_all(output_dir);
    fs::create_dir_all(output_dir)?;

    let sink = ArtifactSink::new(output_dir);
    walk(&data, &sink)
}

/// Walks the framed blocks of `data`, dispatching each payload to its
/// decoder and emitting artifacts through `sink`.
pub fn walk(data: &[u8], sink: &ArtifactSink) -> Result<()> {
    let mut br = ByteReader::new(data);
    let mut idx = 0usize;

    while br.remaining() >= BLOCK_HEADER_LEN {
        let offset = br.tell() as u64;
        let type_byte = br.read_u8()?;
        let block_len = br.read_u64()?;
        if block_len < 8 {
            return Err(Error::InvalidFraming {
                offset,
                length: block_len,
            });
        }
        let payload_len = block_len - 8;
        let want = payload_len.min(br.remaining() as u64) as usize;
        let payload = br.read_bytes(want);
        if (payload.len() as u64) < payload_len {
            warn!(
                idx,
                offset,
                declared = payload_len,
                actual = payload.len(),
                "payload shorter than declared length"
            );
        }

        let block_type =
            BlockType::try_from(type_byte).map_err(|_| Error::UnknownBlockType {
                block_type: type_byte,
                offset,
                preview: preview(payload),
            })?;
        info!(
            idx,
            offset,
            block_type = block_type.name(),
            payload_len = payload.len(),
            "decoding block"
        );

        let ctx = BlockContext::new(idx, block_type.name(), offset, payload.len() as u64, sink);
        match block_type {
            BlockType::Header => decode_header(payload, &ctx)?,
            BlockType::Blackout => decode_blackout(payload, &ctx)?,
            BlockType::Geometry => decode_geom(payload, &ctx)?,
            BlockType::HierarchyGz => decode_hier_gz(payload, &ctx)?,
            BlockType::HierarchyLz4 => decode_hier_lz4(payload, &ctx)?,
            BlockType::HierarchyLz4Duo => decode_hier_lz4_duo(payload, &ctx)?,
            BlockType::VcDataDynAlias2 => decode_vc(payload, &ctx)?,
            BlockType::VcData
            | BlockType::VcDataDynAlias
            | BlockType::ZWrapper
            | BlockType::Skip => {
                return Err(Error::UnsupportedBlock {
                    name: block_type.name(),
                    offset,
                });
            }
        }
        idx += 1;
    }

    info!(blocks = idx, trailing = br.remaining(), "walk finished");
    Ok(())
}
