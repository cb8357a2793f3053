use serde::Serialize;

use super::BlockContext;
use crate::compression::zlib_decompress;
use crate::cursor::ByteReader;
use crate::error::{Error, Result};

/// Header artifact for a geometry block.
#[derive(Debug, Serialize)]
struct GeomHeaderArtifact {
    offset: u64,
    payload_len: u64,
    declared_uncompressed_length: u64,
    count: u64,
    is_uncompressed: bool,
    actual_uncompressed_length: u64,
}

/// Values artifact for a geometry block.
#[derive(Debug, Serialize)]
struct GeomValuesArtifact {
    offset: u64,
    count_expected: u64,
    values_parsed: u64,
    values: Vec<u64>,
}

/// Decodes a GEOM block: `uncompressed_length u64, count u64, data[]` with
/// the data zlib-compressed unless the payload length already accounts for
/// it verbatim. Emits a header JSON, the decompressed bytes, and the parsed
/// varint table.
pub fn decode(payload: &[u8], ctx: &BlockContext) -> Result<()> {
    let payload_len = payload.len() as u64;
    let mut br = ByteReader::new(payload);
    let uncompressed_length = br.read_u64()?;
    let count = br.read_u64()?;
    let data = br.read_bytes(br.remaining());

    let is_uncompressed = payload_len == uncompressed_length + 16;
    let dec = if is_uncompressed {
        data.to_vec()
    } else {
        zlib_decompress(data)?
    };
    if dec.len() as u64 != uncompressed_length {
        return Err(Error::LengthMismatch {
            what: "geometry uncompressed length",
            declared: uncompressed_length,
            actual: dec.len() as u64,
        });
    }

    let header = GeomHeaderArtifact {
        offset: ctx.offset,
        payload_len,
        declared_uncompressed_length: uncompressed_length,
        count,
        is_uncompressed,
        actual_uncompressed_length: dec.len() as u64,
    };
    ctx.emit_json(0, "header.json", &header)?;
    ctx.emit(0, "dec.bin", &dec)?;

    let mut values = Vec::with_capacity(count as usize);
    let mut table = ByteReader::new(&dec);
    while table.remaining() > 0 && (values.len() as u64) < count {
        let (value, _) = table.read_uleb128()?;
        values.push(value);
    }
    if values.len() as u64 != count {
        return Err(Error::LengthMismatch {
            what: "geometry value count",
            declared: count,
            actual: values.len() as u64,
        });
    }

    let values_artifact = GeomValuesArtifact {
        offset: ctx.offset,
        count_expected: count,
        values_parsed: values.len() as u64,
        values,
    };
    ctx.emit_json(1, "values.json", &values_artifact)
}
