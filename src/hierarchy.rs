//! Streaming parser for the decompressed hierarchy buffer.
//!
//! The buffer is a concatenation of tagged records. The leading byte selects
//! the record type: `252 ATTRBEGIN`, `253 ATTREND`, `254 SCOPE`,
//! `255 UPSCOPE`, and `0..=29` a VAR record whose tag byte is the variable
//! type itself. Variable IDs are assigned by a counter that lives for
//! exactly one [`parse_hier_binary`] call: non-alias VAR records take the
//! next sequential id, alias records refer back to `alias - 1`.

use serde::Serialize;

use crate::cursor::ByteReader;
use crate::error::{Error, Result};
use crate::types::{ScopeType, VarType};
use crate::util::preview;

/// One parsed hierarchy record annotated with the buffer offset it began at.
#[derive(Debug, Serialize)]
pub struct HierRecord {
    /// Offset of the record's tag byte within the decompressed buffer.
    pub offset: usize,
    /// The record itself.
    #[serde(flatten)]
    pub entry: HierEntry,
}

/// A decoded hierarchy record.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
#[allow(missing_docs)]
pub enum HierEntry {
    #[serde(rename = "SCOPE")]
    Scope {
        scope_type_num: u8,
        scope_type_name: String,
        name: String,
        component: String,
    },
    #[serde(rename = "UPSCOPE")]
    Upscope,
    #[serde(rename = "ATTRBEGIN")]
    AttrBegin {
        attrtype: u8,
        subtype: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        attr_value1: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        attr_value2: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        attr_str: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        attr_value: Option<u64>,
    },
    #[serde(rename = "ATTREND")]
    AttrEnd,
    #[serde(rename = "VAR")]
    Var {
        var_type_num: u8,
        var_dir_num: u8,
        var_type_name: String,
        name: String,
        bit_length: u64,
        alias: u64,
        is_alias: bool,
        var_id: u64,
    },
}

/// Result of one hierarchy buffer parse.
#[derive(Debug, Serialize)]
pub struct HierParse {
    /// Total length of the input buffer.
    pub total_len: usize,
    /// Bytes consumed; equals `total_len` on success.
    pub consumed: usize,
    /// The parsed records in stream order.
    pub data: Vec<HierRecord>,
    /// Always `false`: an unknown tag is an error, not a stop.
    pub stopped: bool,
}

/// Parses a decompressed hierarchy buffer from offset 0 until exhausted.
pub fn parse_hier_binary(data: &[u8]) -> Result<HierParse> {
    let mut br = ByteReader::new(data);
    let mut records = Vec::new();
    let mut next_var_id = 0u64;

    while br.remaining() > 0 {
        let offset = br.tell();
        let tag = br.peek_bytes(1)[0];
        let entry = match ScopeType::try_from(tag) {
            Ok(ScopeType::VcdScope) => parse_scope(&mut br)?,
            Ok(ScopeType::VcdUpscope) => {
                br.read_u8()?;
                HierEntry::Upscope
            }
            Ok(ScopeType::GenAttrBegin) => parse_attrbegin(&mut br)?,
            Ok(ScopeType::GenAttrEnd) => {
                br.read_u8()?;
                HierEntry::AttrEnd
            }
            _ => match VarType::try_from(tag) {
                Ok(var_type) => parse_var(&mut br, var_type, &mut next_var_id)?,
                Err(_) => {
                    return Err(Error::UnregisteredHierarchyTag {
                        tag,
                        offset,
                        preview: preview(&data[offset..]),
                    });
                }
            },
        };
        records.push(HierRecord { offset, entry });
    }

    Ok(HierParse {
        total_len: data.len(),
        consumed: br.tell(),
        data: records,
        stopped: false,
    })
}

fn parse_scope(br: &mut ByteReader) -> Result<HierEntry> {
    br.read_u8()?;
    let scope_type = br.read_u8()?;
    let (name, _) = br.read_cstring()?;
    let (component, _) = br.read_cstring()?;
    let scope_type_name = match ScopeType::try_from(scope_type) {
        Ok(st) => st.name().to_string(),
        Err(_) => format!("UNKNOWN_{scope_type}"),
    };
    Ok(HierEntry::Scope {
        scope_type_num: scope_type,
        scope_type_name,
        name,
        component,
    })
}

fn parse_attrbegin(br: &mut ByteReader) -> Result<HierEntry> {
    br.read_u8()?;
    let attrtype = br.read_u8()?;
    if attrtype != 0 {
        return Err(Error::assertion(format!(
            "non-zero attrtype {attrtype} not supported"
        )));
    }
    let subtype = br.read_u8()?;

    // subtypes 4 (SOURCESTEM) and 5 (SOURCEISTEM) carry two varints split by
    // a NUL; everything else carries a string and one varint
    if subtype == 4 || subtype == 5 {
        let (value1, _) = br.read_uleb128()?;
        let separator = br.read_u8()?;
        if separator != 0 {
            return Err(Error::assertion(format!(
                "expected NUL between attribute values, found {separator:#04x}"
            )));
        }
        let (value2, _) = br.read_uleb128()?;
        Ok(HierEntry::AttrBegin {
            attrtype,
            subtype,
            attr_value1: Some(value1),
            attr_value2: Some(value2),
            attr_str: None,
            attr_value: None,
        })
    } else {
        let (text, _) = br.read_cstring()?;
        let (value, _) = br.read_uleb128()?;
        Ok(HierEntry::AttrBegin {
            attrtype,
            subtype,
            attr_value1: None,
            attr_value2: None,
            attr_str: Some(text),
            attr_value: Some(value),
        })
    }
}

fn parse_var(br: &mut ByteReader, var_type: VarType, next_var_id: &mut u64) -> Result<HierEntry> {
    let tag = br.read_u8()?;
    let var_dir = br.read_u8()?;
    let (name, _) = br.read_cstring()?;
    let (bit_length, _) = br.read_uleb128()?;
    let (alias, _) = br.read_uleb128()?;

    let (var_id, is_alias) = if alias == 0 {
        let id = *next_var_id;
        *next_var_id += 1;
        (id, false)
    } else {
        (alias - 1, true)
    };

    Ok(HierEntry::Var {
        var_type_num: tag,
        var_dir_num: var_dir,
        var_type_name: var_type.name().to_string(),
        name,
        bit_length,
        alias,
        is_alias,
        var_id,
    })
}
