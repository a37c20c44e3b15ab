//! Custom error types for the vromfs-reader crate.

use thiserror::Error;

/// Identifies the codec behind a decompression failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Zstd,
    Zlib,
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Codec::Zstd => f.write_str("zstd"),
            Codec::Zlib => f.write_str("zlib"),
        }
    }
}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum VromfsError {
    /// The file does not start with a recognized container magic.
    #[error("invalid container magic {found:?}: expected \"VRFs\" or \"VRFx\"")]
    MagicInvalid { found: [u8; 4] },

    /// The platform tag is not one of the known values.
    #[error("unrecognized platform tag {found:?}")]
    PlatformInvalid { found: [u8; 4] },

    /// The packed-info type bits select a framing this crate does not know.
    #[error("unsupported outer framing type {framing_type:#04x}")]
    UnsupportedFraming { framing_type: u8 },

    /// The trailer after the body and digest must be 0 or 256 bytes long.
    #[error("invalid trailer length {found}: must be 0 or 256 bytes")]
    TrailerLengthInvalid { found: usize },

    /// The directory section is structurally invalid.
    #[error("malformed directory: {0}")]
    DirectoryMalformed(String),

    /// A declared count of items does not match the actual number found.
    #[error("count mismatch for {item_type}: expected {expected}, found {found}")]
    CountMismatch {
        item_type: &'static str,
        expected: u64,
        found: u64,
    },

    /// A table offset or extent points outside the directory body.
    #[error("range {start:#x}..{end:#x} exceeds body length {body_len:#x}")]
    OffsetOutOfRange { start: u64, end: u64, body_len: u64 },

    /// Digest verification was requested but the container carries none.
    #[error("container carries no content digest")]
    DigestMissing,

    /// The stored content digest does not match the decompressed body.
    #[error("digest mismatch: stored {stored}, computed {computed}")]
    DigestMismatch { stored: String, computed: String },

    /// A codec failed while decompressing a payload.
    #[error("{codec} decompression failed: {reason}")]
    DecompressFailed { codec: Codec, reason: String },

    /// Decompressed output exceeded the configured size limit.
    #[error("decompressed output exceeds the {limit}-byte limit")]
    OutputTooLarge { limit: u64 },

    /// The entry is dictionary-compressed but no dictionary was supplied.
    #[error("entry requires a zstd dictionary, but none was supplied")]
    DictionaryRequired,

    /// The shared-names entry references a dictionary absent from the container.
    #[error("dictionary entry \"{name}\" is missing from the container")]
    DictionaryMissing { name: String },

    /// A read ran past the end of the input.
    #[error("unexpected end of data at offset {offset:#x}: wanted {wanted} bytes, {available} available")]
    Truncated {
        offset: usize,
        wanted: usize,
        available: usize,
    },
}

/// A convenience `Result` type alias using the crate's `VromfsError` type.
pub type Result<T> = std::result::Result<T, VromfsError>;
