#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Per-block decoders mapping raw FST payloads into artifacts.
pub mod block;
/// Decompression backends for block payloads.
pub mod compression;
/// Bounded byte cursor with varint and reverse-read support.
pub mod cursor;
/// Shared error and result types.
pub mod error;
/// Streaming parser for decompressed hierarchy buffers.
pub mod hierarchy;
/// Artifact output with stable, sortable filenames.
pub mod sink;
/// Enumerations describing the FST wire format.
pub mod types;
/// Forensic preview helpers.
pub mod util;
/// Sequential block framing walker.
pub mod walker;

pub use block::{decode_position_table, decode_time_table};
pub use cursor::ByteReader;
pub use error::{CodecKind, Error, Result};
pub use hierarchy::{HierEntry, HierParse, HierRecord, parse_hier_binary};
pub use sink::ArtifactSink;
pub use types::{BlockType, ScopeType, VarDir, VarType};
pub use walker::{extract_blocks, walk};
