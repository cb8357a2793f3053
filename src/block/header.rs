use serde::Serialize;

use super::BlockContext;
use crate::cursor::ByteReader;
use crate::error::{Error, Result};

/// Fixed payload size of an HDR block.
pub const HDR_PAYLOAD_LEN: usize = 321;

const WRITER_FIELD_LEN: usize = 128;
const DATE_FIELD_LEN: usize = 26;
const RESERVED_FIELD_LEN: usize = 93;

/// Parsed HDR fields as emitted into the header artifact.
#[derive(Debug, Serialize)]
struct HeaderArtifact {
    offset: u64,
    start_time: u64,
    end_time: u64,
    real_endianness: f64,
    writer_memory_use: u64,
    num_scopes: u64,
    num_hierarchy_vars: u64,
    num_vars: u64,
    num_vc_blocks: u64,
    timescale: i8,
    writer: String,
    date: String,
    filetype: u8,
    timezero: i64,
}

fn fixed_string(bytes: &[u8]) -> String {
    let nul = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..nul]).into_owned()
}

/// Decodes the fixed 321-byte header block and emits its JSON artifact.
pub fn decode(payload: &[u8], ctx: &BlockContext) -> Result<()> {
    if payload.len() != HDR_PAYLOAD_LEN {
        return Err(Error::LengthMismatch {
            what: "header payload",
            declared: HDR_PAYLOAD_LEN as u64,
            actual: payload.len() as u64,
        });
    }

    let mut br = ByteReader::new(payload);
    let start_time = br.read_u64()?;
    let end_time = br.read_u64()?;
    let real_endianness = br.read_f64()?;
    let writer_memory_use = br.read_u64()?;
    let num_scopes = br.read_u64()?;
    let num_hierarchy_vars = br.read_u64()?;
    let num_vars = br.read_u64()?;
    let num_vc_blocks = br.read_u64()?;
    let timescale = br.read_i8()?;
    let writer = fixed_string(br.read_bytes(WRITER_FIELD_LEN));
    let date = fixed_string(br.read_bytes(DATE_FIELD_LEN));
    let _reserved = br.read_bytes(RESERVED_FIELD_LEN);
    let filetype = br.read_u8()?;
    let timezero = br.read_i64()?;

    if br.tell() != HDR_PAYLOAD_LEN {
        return Err(Error::assertion(format!(
            "header parse consumed {} of {HDR_PAYLOAD_LEN} bytes",
            br.tell()
        )));
    }

    let artifact = HeaderArtifact {
        offset: ctx.offset,
        start_time,
        end_time,
        real_endianness,
        writer_memory_use,
        num_scopes,
        num_hierarchy_vars,
        num_vars,
        num_vc_blocks,
        timescale,
        writer,
        date,
        filetype,
        timezero,
    };
    ctx.emit_json(0, "json", &artifact)
}
