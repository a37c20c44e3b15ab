//! Reader for the `.vromfs.bin` virtual ROM filesystem containers used by
//! War Thunder and other Dagor-engine games.
//!
//! A container carries a directory of named entries plus per-entry binary
//! payloads. The outer body may be stored plain, zlib-compressed, or
//! obfuscated-zstd-compressed; script-like (`.blk`) entry payloads carry an
//! additional inner framing, including a dictionary-assisted variant whose
//! dictionary lives inside the same container, referenced from the
//! shared-names (`nm`) entry.
//!
//! Decoding is therefore two-pass: parse the directory without touching any
//! payload, resolve the dictionary, then decode payloads on demand.
//!
//! ```no_run
//! use vromfs_reader::{decode_blk, parse_container, resolve_dictionary, ParseOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("aces.vromfs.bin")?;
//! let options = ParseOptions::default();
//! let container = parse_container(&bytes, &options)?;
//! let dict = resolve_dictionary(&container)?;
//! for entry in container.entries() {
//!     let data = decode_blk(entry, dict.as_ref(), &options)?;
//!     println!("{}: {} bytes", entry.name, data.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod vromfs;

pub use vromfs::error::{Codec, Result, VromfsError};
pub use vromfs::models::{
    BlkFraming, Container, Dict, Directory, Entry, ExtendedHeader, Framing, Header, Magic,
    PackedInfo, ParseOptions, Platform,
};

use vromfs::{blk, container, dict};

/// Parse a whole container image held in memory.
///
/// The image must be fully resident; the format's tables point both forward
/// and backward, so it cannot be streamed.
pub fn parse_container(bytes: &[u8], options: &ParseOptions) -> Result<Container> {
    container::parse(bytes, options)
}

/// Locate the container's zstd dictionary, if it carries one.
///
/// `Ok(None)` means the container has no dictionary-compressed content;
/// entries with framings other than the dictionary-required one still
/// decode.
pub fn resolve_dictionary(container: &Container) -> Result<Option<Dict>> {
    dict::resolve(container)
}

/// Strip the inner framing from a `.blk` entry payload.
pub fn decode_blk(entry: &Entry, dict: Option<&Dict>, options: &ParseOptions) -> Result<Vec<u8>> {
    blk::decode(entry, dict, options)
}

/// Decode the shared-names (`nm`) entry body with the container dictionary.
pub fn decode_shared_names(entry: &Entry, dict: &Dict, options: &ParseOptions) -> Result<Vec<u8>> {
    dict::decode_shared_names(entry, dict, options)
}
