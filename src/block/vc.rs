//! Value-change block decoder.
//!
//! A VCDATA payload is parsed from both ends: the bits table and wave
//! metadata are written forward from offset 0, while the time and position
//! tables put their lengths *after* their data, so the tail is read
//! backwards from the end of the payload. The uninterpreted middle span is
//! the wave region, carved into per-variable LZ4 slots by the position
//! table.

use serde::Serialize;

use super::BlockContext;
use crate::compression::{lz4_block_decompress, zlib_decompress};
use crate::cursor::ByteReader;
use crate::error::{Error, Result};

/// Scalar fields collected from the head and tail parses, emitted as the
/// block's header artifact.
#[derive(Debug, Serialize)]
struct VcInfo {
    vc_start_time: u64,
    vc_end_time: u64,
    vc_memory_required: u64,
    bits_uncomp_len: u64,
    bits_comp_len: u64,
    bits_count: u64,
    waves_count: u64,
    waves_packtype: u8,
    waves_bytes: u64,
    time_count: u64,
    time_uncomp_len: u64,
    time_comp_len: u64,
    position_length: u64,
    position_count: u64,
}

/// One record of the `wave_data.json` artifact.
#[derive(Debug, Serialize)]
struct WaveEntry {
    var_idx: usize,
    #[serde(flatten)]
    kind: WaveEntryKind,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum WaveEntryKind {
    #[serde(rename = "has_data")]
    HasData {
        offset: usize,
        uncompressed_length: u64,
        compressed_length: usize,
    },
    #[serde(rename = "alias")]
    Alias { alias_of: i64 },
    #[serde(rename = "no_change")]
    NoChange,
}

struct HeadSection {
    vc_start_time: u64,
    vc_end_time: u64,
    vc_memory_required: u64,
    bits_uncomp_len: u64,
    bits_comp_len: u64,
    bits_count: u64,
    dec_bits: Vec<u8>,
    waves_count: u64,
    waves_packtype: u8,
    end: usize,
}

struct TailSection {
    time_count: u64,
    time_uncomp_len: u64,
    time_comp_len: u64,
    dec_time: Vec<u8>,
    position_length: u64,
    position_data: Vec<u8>,
    start: usize,
}

fn parse_head(payload: &[u8]) -> Result<HeadSection> {
    let mut br = ByteReader::new(payload);
    let vc_start_time = br.read_u64()?;
    let vc_end_time = br.read_u64()?;
    let vc_memory_required = br.read_u64()?;

    let (bits_uncomp_len, _) = br.read_uleb128()?;
    let (bits_comp_len, _) = br.read_uleb128()?;
    let (bits_count, _) = br.read_uleb128()?;

    let bits_data = br.read_bytes(bits_comp_len as usize);
    if (bits_data.len() as u64) < bits_comp_len {
        return Err(Error::UnexpectedEof("value-change bits table"));
    }
    let dec_bits = if bits_comp_len != bits_uncomp_len {
        let dec = zlib_decompress(bits_data)?;
        if dec.len() as u64 != bits_uncomp_len {
            return Err(Error::LengthMismatch {
                what: "bits table uncompressed length",
                declared: bits_uncomp_len,
                actual: dec.len() as u64,
            });
        }
        dec
    } else {
        bits_data.to_vec()
    };

    let (waves_count, _) = br.read_uleb128()?;
    let waves_packtype = br.read_u8()?;

    Ok(HeadSection {
        vc_start_time,
        vc_end_time,
        vc_memory_required,
        bits_uncomp_len,
        bits_comp_len,
        bits_count,
        dec_bits,
        waves_count,
        waves_packtype,
        end: br.tell(),
    })
}

fn parse_tail(payload: &[u8]) -> Result<TailSection> {
    if payload.len() < 24 {
        return Err(Error::UnexpectedEof("value-change time trailer"));
    }
    let mut br = ByteReader::new(payload);
    br.seek(std::io::SeekFrom::End(0));

    let time_count = br.read_u64_rev()?;
    let time_comp_len = br.read_u64_rev()?;
    let time_uncomp_len = br.read_u64_rev()?;
    let time_data = br.read_bytes_rev(time_comp_len as usize)?;
    let dec_time = if time_comp_len != time_uncomp_len {
        let dec = zlib_decompress(time_data)?;
        if dec.len() as u64 != time_uncomp_len {
            return Err(Error::LengthMismatch {
                what: "time table uncompressed length",
                declared: time_uncomp_len,
                actual: dec.len() as u64,
            });
        }
        dec
    } else {
        time_data.to_vec()
    };

    let position_length = br.read_u64_rev()?;
    let position_data = br.read_bytes_rev(position_length as usize)?.to_vec();

    Ok(TailSection {
        time_count,
        time_uncomp_len,
        time_comp_len,
        dec_time,
        position_length,
        position_data,
        start: br.tell(),
    })
}

/// Reconstructs absolute timestamps from the decompressed time table:
/// exactly `count` ULEB128 deltas accumulated into a running sum.
pub fn decode_time_table(dec_time: &[u8], count: u64) -> Result<Vec<u64>> {
    let mut br = ByteReader::new(dec_time);
    let mut timestamps = Vec::with_capacity(count as usize);
    let mut current = 0u64;
    for _ in 0..count {
        let (delta, _) = br.read_uleb128()?;
        current = current
            .checked_add(delta)
            .ok_or_else(|| Error::assertion("time delta accumulation overflow"))?;
        timestamps.push(current);
    }
    Ok(timestamps)
}

/// Decodes the signed-run-length position stream into one entry per
/// variable: positive entries are byte lengths of fresh wave data, negative
/// entries reference an earlier variable, zeros mean no change in this
/// block.
///
/// The low bit of each leading byte selects the form: odd bytes are SLEB128
/// values shifted right once (zero repeats the previous alias), even bytes
/// are ULEB128 zero-run lengths shifted right once.
pub fn decode_position_table(position_data: &[u8]) -> Result<Vec<i64>> {
    let mut br = ByteReader::new(position_data);
    let mut positions = Vec::new();
    let mut prev_alias = 0i64;

    while br.remaining() > 0 {
        if br.peek_bytes(1)[0] & 1 != 0 {
            let (raw, _) = br.read_sleb128()?;
            let value = raw >> 1;
            if value > 0 {
                positions.push(value);
            } else if value < 0 {
                positions.push(value);
                prev_alias = value;
            } else {
                if prev_alias == 0 {
                    return Err(Error::assertion(
                        "position stream repeats an alias before any alias was set",
                    ));
                }
                positions.push(prev_alias);
            }
        } else {
            let (raw, _) = br.read_uleb128()?;
            let zeros = usize::try_from(raw >> 1)
                .map_err(|_| Error::assertion("zero-run length exceeds addressable memory"))?;
            positions.extend(std::iter::repeat_n(0i64, zeros));
        }
    }
    Ok(positions)
}

fn decode_wave_slots(wave_region: &[u8], positions: &[i64]) -> Result<Vec<WaveEntry>> {
    let mut offsets = vec![0usize; positions.len()];
    let mut slot_bytes = vec![0usize; positions.len()];
    let mut prev_data_idx: Option<usize> = None;
    // the first positive value is 1 and lands the first slot at offset 0
    let mut cur_offset = -1i64;

    for (i, &pos) in positions.iter().enumerate() {
        if pos > 0 {
            if prev_data_idx.is_none() && pos != 1 {
                return Err(Error::assertion(format!(
                    "first positive position entry must be 1, found {pos}"
                )));
            }
            if let Some(prev) = prev_data_idx {
                slot_bytes[prev] = pos as usize;
            }
            cur_offset += pos;
            offsets[i] = usize::try_from(cur_offset)
                .map_err(|_| Error::assertion("negative wave slot offset"))?;
            prev_data_idx = Some(i);
        }
    }
    if let Some(prev) = prev_data_idx {
        let tail = (wave_region.len() as i64) - cur_offset;
        slot_bytes[prev] = usize::try_from(tail)
            .map_err(|_| Error::assertion("wave region shorter than position table implies"))?;
    }

    let mut entries = Vec::with_capacity(positions.len());
    let mut br = ByteReader::new(wave_region);
    for (i, &pos) in positions.iter().enumerate() {
        let kind = if pos > 0 {
            br.seek(std::io::SeekFrom::Start(offsets[i] as u64));
            let (uncompressed_length, consumed) = br.read_uleb128()?;
            let compressed_length = slot_bytes[i].checked_sub(consumed).ok_or_else(|| {
                Error::assertion(format!("wave slot {i} shorter than its length prefix"))
            })?;
            let data = br.read_bytes(compressed_length);
            if data.len() < compressed_length {
                return Err(Error::UnexpectedEof("wave slot data"));
            }
            lz4_block_decompress(data, uncompressed_length as usize)?;
            WaveEntryKind::HasData {
                offset: offsets[i],
                uncompressed_length,
                compressed_length,
            }
        } else if pos < 0 {
            WaveEntryKind::Alias {
                alias_of: -(i as i64) - 1,
            }
        } else {
            WaveEntryKind::NoChange
        };
        entries.push(WaveEntry { var_idx: i, kind });
    }
    Ok(entries)
}

fn join_lines<T: ToString>(values: &[T]) -> Vec<u8> {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

/// Decodes a value-change block and emits its six artifacts.
pub fn decode(payload: &[u8], ctx: &BlockContext) -> Result<()> {
    let head = parse_head(payload)?;
    let tail = parse_tail(payload)?;

    if head.end > tail.start {
        return Err(Error::assertion(format!(
            "value-change head cursor {} crossed tail cursor {}",
            head.end, tail.start
        )));
    }
    let wave_region = &payload[head.end..tail.start];

    let timestamps = decode_time_table(&tail.dec_time, tail.time_count)?;
    let positions = decode_position_table(&tail.position_data)?;
    let wave_entries = decode_wave_slots(wave_region, &positions)?;

    let info = VcInfo {
        vc_start_time: head.vc_start_time,
        vc_end_time: head.vc_end_time,
        vc_memory_required: head.vc_memory_required,
        bits_uncomp_len: head.bits_uncomp_len,
        bits_comp_len: head.bits_comp_len,
        bits_count: head.bits_count,
        waves_count: head.waves_count,
        waves_packtype: head.waves_packtype,
        waves_bytes: wave_region.len() as u64,
        time_count: tail.time_count,
        time_uncomp_len: tail.time_uncomp_len,
        time_comp_len: tail.time_comp_len,
        position_length: tail.position_length,
        position_count: positions.len() as u64,
    };

    ctx.emit_json(0, "header.json", &info)?;
    ctx.emit(0, "init_bits.txt", &head.dec_bits)?;
    ctx.emit(0, "time_array.txt", &join_lines(&timestamps))?;
    ctx.emit(0, "position_array.txt", &join_lines(&positions))?;
    ctx.emit(0, "wave_data.bin", wave_region)?;
    ctx.emit_json(1, "wave_data.json", &wave_entries)
}
