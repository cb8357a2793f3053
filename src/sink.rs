//! Artifact output: named byte blobs under a stable, sortable naming scheme.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Writes named blobs into an output directory.
///
/// Filenames follow the template
/// `{block_idx:03}.{block_type}.off{offset:012}.len{payload_len:012}.{sub_idx:02}.{ext}`;
/// the zero-padded numeric fields keep a directory listing sorted in
/// `(block_idx, sub_idx)` order under a bytewise comparator. The sink holds
/// no state beyond the directory path.
#[derive(Debug, Clone)]
pub struct ArtifactSink {
    base_dir: PathBuf,
}

impl ArtifactSink {
    /// Creates a sink writing into `base_dir`. The directory must exist.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The directory this sink writes into.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes one blob, returning the path it was written to.
    #[allow(clippy::too_many_arguments)]
    pub fn write_blob(
        &self,
        block_idx: usize,
        block_type: &str,
        offset: u64,
        payload_len: u64,
        sub_idx: u32,
        ext: &str,
        data: &[u8],
    ) -> Result<PathBuf> {
        let fname = format!(
            "{block_idx:03}.{block_type}.off{offset:012}.len{payload_len:012}.{sub_idx:02}.{ext}"
        );
        let path = self.base_dir.join(fname);
        fs::write(&path, data)?;
        debug!(path = %path.display(), bytes = data.len(), "wrote artifact");
        Ok(path)
    }

    /// Serializes `value` as pretty-printed JSON and writes it as a blob.
    #[allow(clippy::too_many_arguments)]
    pub fn write_json<T: Serialize>(
        &self,
        block_idx: usize,
        block_type: &str,
        offset: u64,
        payload_len: u64,
        sub_idx: u32,
        ext: &str,
        value: &T,
    ) -> Result<PathBuf> {
        let data = serde_json::to_vec_pretty(value)?;
        self.write_blob(block_idx, block_type, offset, payload_len, sub_idx, ext, &data)
    }
}
