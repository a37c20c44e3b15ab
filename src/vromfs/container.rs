//! Outer container parsing: header, framing, body recovery, trailer.

use log::{debug, info, trace, warn};
use md5::{Digest, Md5};

use super::compression;
use super::cursor::ByteCursor;
use super::directory;
use super::error::{Result, VromfsError};
use super::models::{
    Container, ExtendedHeader, Framing, Header, Magic, PackedInfo, ParseOptions, Platform,
};
use super::obfuscation;

/// Parse a whole `.vromfs.bin` image held in memory.
///
/// # Container layout
/// ```text
/// [16 bytes] Header: magic, platform tag, original size, packed info
/// [ 8 bytes] Extended header ("VRFx" containers only)
/// [ N bytes] Body: packed_size bytes when packed, original_size otherwise
/// [16 bytes] Content digest (absent for the NoCheck framing)
/// [ M bytes] Trailer, 0 or 256 bytes
/// ```
///
/// # Errors
/// Returns [`VromfsError`] if the magic, platform tag, framing type, or
/// trailer length is invalid, if any read runs past the end of the image,
/// or if body decompression fails or exceeds
/// [`ParseOptions::max_decompressed_size`].
pub fn parse(bytes: &[u8], options: &ParseOptions) -> Result<Container> {
    let mut cursor = ByteCursor::new(bytes);

    // Step 1: fixed 16-byte header
    let header = parse_header(&mut cursor, options)?;
    debug!(
        "Container header: {:?} {:?}, original size {}, packed type {:#04x}, packed size {}",
        header.magic,
        header.platform,
        header.original_size,
        header.packed.packed_type,
        header.packed.packed_size
    );

    // Step 2: extended header, present only behind the "VRFx" magic
    let extended = if header.magic.has_extended_header() {
        let ext = parse_extended_header(&mut cursor)?;
        trace!("Extended header: {:?}", ext);
        Some(ext)
    } else {
        None
    };

    // Step 3: select the framing and slice the raw body
    let framing = Framing::select(header.packed.packed_type, header.packed.packed_size)?;
    let body_len = if header.packed.packed_size > 0 {
        header.packed.packed_size
    } else {
        header.original_size
    };
    let raw_body = cursor.take(body_len as usize)?;

    // Step 4: recover the directory body
    let body = match framing {
        Framing::NotPacked => raw_body.to_vec(),
        Framing::Zstd | Framing::ZstdNoCheck => {
            let mut packed = raw_body.to_vec();
            obfuscation::deobfuscate(&mut packed);
            compression::zstd(&packed, options.max_decompressed_size)?
        }
        Framing::Zlib => compression::zlib(raw_body, options.max_decompressed_size)?,
    };
    if framing != Framing::NotPacked && body.len() != header.original_size as usize {
        warn!(
            "Decompressed body is {} bytes, header declares {}",
            body.len(),
            header.original_size
        );
    }

    // Step 5: content digest. NoCheck containers never carry one; for the
    // other framings it is present whenever bytes remain after the body.
    let digest = if framing.carries_digest() && cursor.remaining() > 0 {
        Some(cursor.take_array::<16>()?)
    } else {
        None
    };

    // Step 6: the trailer must be empty or exactly 256 bytes
    let tail = cursor.rest().to_vec();
    if options.strict_trailer && !(tail.is_empty() || tail.len() == 256) {
        return Err(VromfsError::TrailerLengthInvalid { found: tail.len() });
    }

    if options.verify_digest {
        verify_digest(&body, digest.as_ref())?;
    }

    // Step 7: parse the uncompressed directory
    let dir = directory::parse(&body)?;
    info!(
        "Parsed container: {} entries, framing {:?}, digest {}, {}-byte tail",
        dir.entries.len(),
        framing,
        if digest.is_some() { "present" } else { "absent" },
        tail.len()
    );

    Ok(Container {
        header,
        extended,
        framing,
        directory: dir,
        digest,
        tail,
    })
}

fn parse_header(cursor: &mut ByteCursor<'_>, options: &ParseOptions) -> Result<Header> {
    let magic = Magic::try_from(cursor.take_array::<4>()?)?;
    let platform = Platform::from_tag(cursor.take_array::<4>()?, options.strict_platform)?;
    let original_size = cursor.read_u32()?;
    let packed = PackedInfo::decode(cursor.read_u32()?);
    Ok(Header {
        magic,
        platform,
        original_size,
        packed,
    })
}

fn parse_extended_header(cursor: &mut ByteCursor<'_>) -> Result<ExtendedHeader> {
    Ok(ExtendedHeader {
        size: cursor.read_u16()?,
        flags: cursor.read_u16()?,
        version: cursor.read_u32()?,
    })
}

/// Check the stored MD5 digest against the decompressed body.
fn verify_digest(body: &[u8], stored: Option<&[u8; 16]>) -> Result<()> {
    let stored = stored.ok_or(VromfsError::DigestMissing)?;
    let computed: [u8; 16] = Md5::digest(body).into();
    if &computed != stored {
        return Err(VromfsError::DigestMismatch {
            stored: hex::encode(stored),
            computed: hex::encode(computed),
        });
    }
    trace!("Content digest verified: {}", hex::encode(stored));
    Ok(())
}
