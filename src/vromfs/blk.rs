//! Inner `.blk` payload decoding.

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use super::compression;
use super::error::{Result, VromfsError};
use super::models::{BlkFraming, Dict, Entry, ParseOptions};

/// Strip the inner framing from a `.blk` entry payload.
///
/// The first payload byte selects the framing:
///
/// | Marker | Framing | Decode |
/// |---|---|---|
/// | 0x01 | Fat | body after the marker |
/// | 0x02 | FatZstd | 24-bit LE packed size, zstd frame, drop first decoded byte |
/// | 0x03 | Slim | body after the marker |
/// | 0x04 | SlimZstd | zstd frame (dictionary used when available) |
/// | 0x05 | SlimZstdDict | zstd frame, dictionary required |
/// | other | Raw | payload passes through untouched |
///
/// An empty payload short-circuits to empty output.
pub fn decode(entry: &Entry, dict: Option<&Dict>, options: &ParseOptions) -> Result<Vec<u8>> {
    let payload = entry.payload.as_slice();
    let Some((&pk, rest)) = payload.split_first() else {
        return Ok(Vec::new());
    };
    let framing = BlkFraming::from(pk);
    trace!(
        "Decoding {:?} as {:?} ({} bytes)",
        entry.name,
        framing,
        payload.len()
    );

    match framing {
        BlkFraming::Fat | BlkFraming::Slim => Ok(rest.to_vec()),
        BlkFraming::FatZstd => {
            if payload.len() < 4 {
                return Err(VromfsError::Truncated {
                    offset: 1,
                    wanted: 3,
                    available: payload.len() - 1,
                });
            }
            // Bytes [1..4) hold the packed size as a 24-bit LE integer.
            let pk_size = LittleEndian::read_u24(&payload[1..4]) as usize;
            let frame =
                payload
                    .get(4..4 + pk_size)
                    .ok_or(VromfsError::OffsetOutOfRange {
                        start: 4,
                        end: 4 + pk_size as u64,
                        body_len: payload.len() as u64,
                    })?;
            let decompressed = zstd_maybe_dict(frame, dict, options)?;
            // The decompressed stream carries one leading marker byte.
            Ok(decompressed.get(1..).unwrap_or_default().to_vec())
        }
        BlkFraming::SlimZstd => zstd_maybe_dict(rest, dict, options),
        BlkFraming::SlimZstdDict => {
            let dict = dict.ok_or(VromfsError::DictionaryRequired)?;
            compression::zstd_with_dict(rest, dict, options.max_decompressed_size)
        }
        BlkFraming::Raw => Ok(payload.to_vec()),
    }
}

fn zstd_maybe_dict(frame: &[u8], dict: Option<&Dict>, options: &ParseOptions) -> Result<Vec<u8>> {
    match dict {
        Some(d) => compression::zstd_with_dict(frame, d, options.max_decompressed_size),
        None => compression::zstd(frame, options.max_decompressed_size),
    }
}
