//! Dictionary bootstrap via the shared-names (`nm`) entry.
//!
//! Containers with dictionary-compressed payloads carry the dictionary as a
//! regular entry named `<hex of 32-byte id>.dict`, referenced from a fixed
//! region of the `nm` entry. The `nm` payload itself is
//! dictionary-compressed past that region, so resolution has to happen
//! before any payload decoding: parse the directory first, resolve the
//! dictionary second, decode payloads on demand.

use log::{debug, info};

use super::compression;
use super::error::{Result, VromfsError};
use super::models::{Container, Dict, Entry, ParseOptions};

/// Offset of the 32-byte dictionary id inside the `nm` payload.
const DICT_ID_OFFSET: usize = 8;
const DICT_ID_LEN: usize = 32;

/// Length of the dictionary-id region plus reserved bytes preceding the
/// packed names data.
const NAMES_DATA_OFFSET: usize = 40;

/// Locate the container's zstd dictionary, if it carries one.
///
/// Returns `Ok(None)` when the container has no `nm` entry, or when the
/// entry references no dictionary (an all-zero id). A referenced but
/// absent dictionary entry is an error: dictionary-compressed entries
/// cannot be decoded without it.
///
/// Resolution is idempotent. Resolve once per container and share the
/// returned [`Dict`] across payload decodes.
pub fn resolve(container: &Container) -> Result<Option<Dict>> {
    let Some(nm) = container.entry("nm") else {
        debug!("No shared-names entry; container carries no dictionary");
        return Ok(None);
    };

    let id = nm
        .payload
        .get(DICT_ID_OFFSET..DICT_ID_OFFSET + DICT_ID_LEN)
        .ok_or_else(|| {
            VromfsError::DirectoryMalformed(format!(
                "shared-names payload is {} bytes, too short for a dictionary id",
                nm.payload.len()
            ))
        })?;
    if id.iter().all(|&b| b == 0) {
        debug!("Shared-names entry references no dictionary");
        return Ok(None);
    }

    let dict_name = format!("{}.dict", hex::encode(id));
    let dict_entry = container
        .entry(&dict_name)
        .ok_or_else(|| VromfsError::DictionaryMissing {
            name: dict_name.clone(),
        })?;
    info!(
        "Resolved dictionary {} ({} bytes)",
        dict_name,
        dict_entry.payload.len()
    );
    Ok(Some(Dict::new(dict_name, dict_entry.payload.clone())))
}

/// Decode the shared-names (`nm`) entry body.
///
/// The payload opens with the 40-byte dictionary reference region already
/// consumed by [`resolve`]; the remainder is one dictionary-compressed
/// zstd frame.
pub fn decode_shared_names(entry: &Entry, dict: &Dict, options: &ParseOptions) -> Result<Vec<u8>> {
    let packed = entry.payload.get(NAMES_DATA_OFFSET..).ok_or_else(|| {
        VromfsError::DirectoryMalformed(format!(
            "shared-names payload is {} bytes, shorter than its {}-byte prefix",
            entry.payload.len(),
            NAMES_DATA_OFFSET
        ))
    })?;
    compression::zstd_with_dict(packed, dict, options.max_decompressed_size)
}
