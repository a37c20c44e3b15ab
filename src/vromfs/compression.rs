//! Bounded decompression fronts for the two codecs used by vromfs
//! containers.

use std::io::Read;

use flate2::read::ZlibDecoder;
use log::trace;
use zstd::stream::read::Decoder as ZstdDecoder;

use super::error::{Codec, Result, VromfsError};
use super::models::Dict;

/// Decompress a zstd frame, bounded by `max_size` output bytes.
pub fn zstd(payload: &[u8], max_size: u64) -> Result<Vec<u8>> {
    let decoder = ZstdDecoder::new(payload).map_err(|e| failed(Codec::Zstd, e))?;
    read_bounded(decoder, Codec::Zstd, max_size)
}

/// Decompress a zstd frame produced with an external dictionary.
pub fn zstd_with_dict(payload: &[u8], dict: &Dict, max_size: u64) -> Result<Vec<u8>> {
    let decoder = ZstdDecoder::with_dictionary(payload, dict.as_bytes())
        .map_err(|e| failed(Codec::Zstd, e))?;
    read_bounded(decoder, Codec::Zstd, max_size)
}

/// Decompress a zlib stream, bounded by `max_size` output bytes.
pub fn zlib(payload: &[u8], max_size: u64) -> Result<Vec<u8>> {
    read_bounded(ZlibDecoder::new(payload), Codec::Zlib, max_size)
}

/// Drain a decoder, failing once the output would exceed `max_size`.
///
/// The reader is capped one byte past the limit so an overrun is
/// distinguishable from an output of exactly `max_size` bytes.
fn read_bounded<R: Read>(decoder: R, codec: Codec, max_size: u64) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut capped = decoder.take(max_size.saturating_add(1));
    capped
        .read_to_end(&mut output)
        .map_err(|e| failed(codec, e))?;
    if output.len() as u64 > max_size {
        return Err(VromfsError::OutputTooLarge { limit: max_size });
    }
    trace!("{} decompression produced {} bytes", codec, output.len());
    Ok(output)
}

fn failed(codec: Codec, err: std::io::Error) -> VromfsError {
    VromfsError::DecompressFailed {
        codec,
        reason: err.to_string(),
    }
}
