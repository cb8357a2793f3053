use serde::Serialize;

use super::BlockContext;
use crate::cursor::ByteReader;
use crate::error::{Error, Result};

/// One decoded blackout event.
#[derive(Debug, Serialize)]
struct BlackoutEntry {
    state: String,
    timestamp: u64,
}

/// The full BLACKOUT artifact. This decoder runs in diagnostic mode: parse
/// failures are recorded in `error` instead of aborting the walk.
#[derive(Debug, Serialize)]
struct BlackoutArtifact {
    offset: u64,
    payload_len: u64,
    block_len: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
    entries: Vec<BlackoutEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn state_name(state: u8) -> String {
    match state {
        0 => "off".to_string(),
        1 => "on".to_string(),
        other => format!("unknown({other})"),
    }
}

fn parse_entries(payload: &[u8], artifact: &mut BlackoutArtifact) -> Result<()> {
    let mut br = ByteReader::new(payload);
    let (count, _) = br.read_uleb128()?;
    artifact.count = Some(count);

    for i in 0..count {
        if br.remaining() == 0 {
            return Err(Error::assertion(format!("truncated entry {i}")));
        }
        let state = br.read_u8()?;
        let (timestamp, _) = br.read_uleb128()?;
        artifact.entries.push(BlackoutEntry {
            state: state_name(state),
            timestamp,
        });
    }
    Ok(())
}

/// Decodes a BLACKOUT block, capturing any entry-level failure into the
/// emitted artifact rather than propagating it.
pub fn decode(payload: &[u8], ctx: &BlockContext) -> Result<()> {
    let payload_len = payload.len() as u64;
    let mut artifact = BlackoutArtifact {
        offset: ctx.offset,
        payload_len,
        block_len: payload_len + 8,
        count: None,
        entries: Vec::new(),
        error: None,
    };

    if let Err(err) = parse_entries(payload, &mut artifact) {
        artifact.error = Some(err.to_string());
    }

    ctx.emit_json(0, "BLACKOUT.json", &artifact)
}
