//! Per-block decoders for the different FST block types.

mod blackout;
mod geom;
mod header;
mod hier;
mod vc;

pub use blackout::decode as decode_blackout;
pub use geom::decode as decode_geom;
pub use header::{HDR_PAYLOAD_LEN, decode as decode_header};
pub use hier::{decode_gz as decode_hier_gz, decode_lz4 as decode_hier_lz4,
    decode_lz4_duo as decode_hier_lz4_duo};
pub use vc::{decode as decode_vc, decode_position_table, decode_time_table};

use serde::Serialize;

use crate::error::Result;
use crate::sink::ArtifactSink;

/// Framing information and output handle handed to each block decoder.
#[derive(Debug)]
pub struct BlockContext<'a> {
    /// Zero-based index of the block within the file.
    pub idx: usize,
    /// Canonical block-type name.
    pub name: &'static str,
    /// File offset of the block's type byte.
    pub offset: u64,
    /// Length of the payload as read (excludes the type and length fields).
    pub payload_len: u64,
    sink: &'a ArtifactSink,
}

impl<'a> BlockContext<'a> {
    /// Creates a context for one block.
    pub fn new(
        idx: usize,
        name: &'static str,
        offset: u64,
        payload_len: u64,
        sink: &'a ArtifactSink,
    ) -> Self {
        Self {
            idx,
            name,
            offset,
            payload_len,
            sink,
        }
    }

    /// Writes a raw blob for this block.
    pub fn emit(&self, sub_idx: u32, ext: &str, data: &[u8]) -> Result<()> {
        self.sink
            .write_blob(self.idx, self.name, self.offset, self.payload_len, sub_idx, ext, data)?;
        Ok(())
    }

    /// Writes a pretty-printed JSON blob for this block.
    pub fn emit_json<T: Serialize>(&self, sub_idx: u32, ext: &str, value: &T) -> Result<()> {
        self.sink
            .write_json(self.idx, self.name, self.offset, self.payload_len, sub_idx, ext, value)?;
        Ok(())
    }
}
