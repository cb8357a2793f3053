use std::fmt;
use std::io;

/// Convenient alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Compression codec families used by FST payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// zlib (RFC 1950) or gzip (RFC 1952) framing.
    Gzip,
    /// Raw LZ4 block format (not the frame format).
    Lz4,
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecKind::Gzip => f.write_str("gzip"),
            CodecKind::Lz4 => f.write_str("lz4"),
        }
    }
}

/// Errors that can be produced while decoding an FST file.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Wrapper around standard I/O errors.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Failure while serializing an artifact to JSON.
    #[error("artifact serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A read requested more bytes than the buffer holds.
    #[error("unexpected end of data while reading {0}")]
    UnexpectedEof(&'static str),

    /// A ULEB128 value would not fit in 64 bits.
    #[error("varint exceeds 64-bit capacity")]
    LebOverflow,

    /// A C string ran to the end of the buffer without a NUL terminator.
    #[error("unterminated string before end of buffer")]
    UnterminatedCString,

    /// A block header declared a length smaller than the length field itself.
    #[error("invalid block length {length} at offset {offset}")]
    InvalidFraming {
        /// File offset of the offending block header.
        offset: u64,
        /// The declared block length.
        length: u64,
    },

    /// The block type byte is outside the closed set of known types.
    #[error("unregistered block type {block_type} at offset {offset}; next bytes: {preview}")]
    UnknownBlockType {
        /// The unrecognized type byte.
        block_type: u8,
        /// File offset of the block header.
        offset: u64,
        /// Hex/ASCII snippet of the following bytes.
        preview: String,
    },

    /// The block type is known but this decoder does not handle it.
    #[error("block type {name} at offset {offset} is recognized but not supported by this decoder")]
    UnsupportedBlock {
        /// Canonical name of the block type.
        name: &'static str,
        /// File offset of the block header.
        offset: u64,
    },

    /// A hierarchy buffer contained a tag with no registered sub-parser.
    #[error("unregistered hierarchy tag {tag} at offset {offset}; next bytes: {preview}")]
    UnregisteredHierarchyTag {
        /// The unrecognized tag byte.
        tag: u8,
        /// Offset within the decompressed hierarchy buffer.
        offset: usize,
        /// Hex/ASCII snippet of the following bytes.
        preview: String,
    },

    /// A declared length or count does not match what was decoded.
    #[error("{what}: declared {declared} does not match actual {actual}")]
    LengthMismatch {
        /// What was being measured.
        what: &'static str,
        /// The length or count the file declared.
        declared: u64,
        /// The length or count actually observed.
        actual: u64,
    },

    /// The underlying codec rejected a compressed payload.
    #[error("{kind} decompression failed: {detail}")]
    Decompression {
        /// Which codec failed.
        kind: CodecKind,
        /// Codec-provided failure detail.
        detail: String,
    },

    /// A structural invariant of the format was violated.
    #[error("assertion violated: {0}")]
    Assertion(String),

    /// A required cargo feature was compiled out.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl Error {
    pub(crate) fn assertion<T: fmt::Display>(msg: T) -> Self {
        Self::Assertion(msg.to_string())
    }
}
