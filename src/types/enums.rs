#![allow(missing_docs)]

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

/// Enumeration of high level block identifiers present in FST streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum BlockType {
    Header = 0,
    VcData = 1,
    Blackout = 2,
    Geometry = 3,
    HierarchyGz = 4,
    VcDataDynAlias = 5,
    HierarchyLz4 = 6,
    HierarchyLz4Duo = 7,
    VcDataDynAlias2 = 8,
    ZWrapper = 254,
    Skip = 255,
}

impl BlockType {
    /// Canonical block-type name as it appears in artifact filenames.
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "HDR",
            Self::VcData => "VCDATA",
            Self::Blackout => "BLACKOUT",
            Self::Geometry => "GEOM",
            Self::HierarchyGz => "HIER_GZ",
            Self::VcDataDynAlias => "VCDATA_DYN_ALIAS",
            Self::HierarchyLz4 => "HIER_LZ4",
            Self::HierarchyLz4Duo => "HIER_LZ4DUO",
            Self::VcDataDynAlias2 => "VCDATA_DYN_ALIAS2",
            Self::ZWrapper => "ZWRAPPER",
            Self::Skip => "SKIP",
        }
    }
}

/// Scope/type markers used in hierarchy streams. Values 252-255 double as the
/// hierarchy control tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum ScopeType {
    VcdModule = 0,
    VcdTask = 1,
    VcdFunction = 2,
    VcdBegin = 3,
    VcdFork = 4,
    VcdGenerate = 5,
    VcdStruct = 6,
    VcdUnion = 7,
    VcdClass = 8,
    VcdInterface = 9,
    VcdPackage = 10,
    VcdProgram = 11,
    VhdlArchitecture = 12,
    VhdlProcedure = 13,
    VhdlFunction = 14,
    VhdlRecord = 15,
    VhdlProcess = 16,
    VhdlBlock = 17,
    VhdlForGenerate = 18,
    VhdlIfGenerate = 19,
    VhdlGenerate = 20,
    VhdlPackage = 21,
    GenAttrBegin = 252,
    GenAttrEnd = 253,
    VcdScope = 254,
    VcdUpscope = 255,
}

impl ScopeType {
    /// Wire-format name of the scope type.
    pub fn name(self) -> &'static str {
        match self {
            Self::VcdModule => "VCD_MODULE",
            Self::VcdTask => "VCD_TASK",
            Self::VcdFunction => "VCD_FUNCTION",
            Self::VcdBegin => "VCD_BEGIN",
            Self::VcdFork => "VCD_FORK",
            Self::VcdGenerate => "VCD_GENERATE",
            Self::VcdStruct => "VCD_STRUCT",
            Self::VcdUnion => "VCD_UNION",
            Self::VcdClass => "VCD_CLASS",
            Self::VcdInterface => "VCD_INTERFACE",
            Self::VcdPackage => "VCD_PACKAGE",
            Self::VcdProgram => "VCD_PROGRAM",
            Self::VhdlArchitecture => "VHDL_ARCHITECTURE",
            Self::VhdlProcedure => "VHDL_PROCEDURE",
            Self::VhdlFunction => "VHDL_FUNCTION",
            Self::VhdlRecord => "VHDL_RECORD",
            Self::VhdlProcess => "VHDL_PROCESS",
            Self::VhdlBlock => "VHDL_BLOCK",
            Self::VhdlForGenerate => "VHDL_FOR_GENERATE",
            Self::VhdlIfGenerate => "VHDL_IF_GENERATE",
            Self::VhdlGenerate => "VHDL_GENERATE",
            Self::VhdlPackage => "VHDL_PACKAGE",
            Self::GenAttrBegin => "GEN_ATTRBEGIN",
            Self::GenAttrEnd => "GEN_ATTREND",
            Self::VcdScope => "VCD_SCOPE",
            Self::VcdUpscope => "VCD_UPSCOPE",
        }
    }
}

/// All supported variable kinds. The tag byte of a VAR record in the
/// hierarchy stream is the variable type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum VarType {
    VcdEvent = 0,
    VcdInteger = 1,
    VcdParameter = 2,
    VcdReal = 3,
    VcdRealParameter = 4,
    VcdReg = 5,
    VcdSupply0 = 6,
    VcdSupply1 = 7,
    VcdTime = 8,
    VcdTri = 9,
    VcdTriand = 10,
    VcdTrior = 11,
    VcdTrireg = 12,
    VcdTri0 = 13,
    VcdTri1 = 14,
    VcdWand = 15,
    VcdWire = 16,
    VcdWor = 17,
    VcdPort = 18,
    VcdSparseArray = 19,
    VcdRealtime = 20,
    GenString = 21,
    SvBit = 22,
    SvLogic = 23,
    SvInt = 24,
    SvShortInt = 25,
    SvLongInt = 26,
    SvByte = 27,
    SvEnum = 28,
    SvShortReal = 29,
}

impl VarType {
    /// Wire-format name of the variable type.
    pub fn name(self) -> &'static str {
        match self {
            Self::VcdEvent => "VCD_EVENT",
            Self::VcdInteger => "VCD_INTEGER",
            Self::VcdParameter => "VCD_PARAMETER",
            Self::VcdReal => "VCD_REAL",
            Self::VcdRealParameter => "VCD_REAL_PARAMETER",
            Self::VcdReg => "VCD_REG",
            Self::VcdSupply0 => "VCD_SUPPLY0",
            Self::VcdSupply1 => "VCD_SUPPLY1",
            Self::VcdTime => "VCD_TIME",
            Self::VcdTri => "VCD_TRI",
            Self::VcdTriand => "VCD_TRIAND",
            Self::VcdTrior => "VCD_TRIOR",
            Self::VcdTrireg => "VCD_TRIREG",
            Self::VcdTri0 => "VCD_TRI0",
            Self::VcdTri1 => "VCD_TRI1",
            Self::VcdWand => "VCD_WAND",
            Self::VcdWire => "VCD_WIRE",
            Self::VcdWor => "VCD_WOR",
            Self::VcdPort => "VCD_PORT",
            Self::VcdSparseArray => "VCD_SPARRAY",
            Self::VcdRealtime => "VCD_REALTIME",
            Self::GenString => "GEN_STRING",
            Self::SvBit => "SV_BIT",
            Self::SvLogic => "SV_LOGIC",
            Self::SvInt => "SV_INT",
            Self::SvShortInt => "SV_SHORTINT",
            Self::SvLongInt => "SV_LONGINT",
            Self::SvByte => "SV_BYTE",
            Self::SvEnum => "SV_ENUM",
            Self::SvShortReal => "SV_SHORTREAL",
        }
    }
}

/// Signal direction (input/output) metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum VarDir {
    Implicit = 0,
    Input = 1,
    Output = 2,
    Inout = 3,
    Buffer = 4,
    Linkage = 5,
}
