//! Directory parsing: filename table and file-data table.

use log::{debug, trace};

use super::cursor::ByteCursor;
use super::error::{Result, VromfsError};
use super::models::{Directory, Entry};

/// End of the fixed directory header region.
const HEADER_REGION_END: u32 = 20;

/// Raw name bytes that alias the shared-names entry.
const NM_ALIAS: [u8; 4] = [0xFF, b'?', b'n', b'm'];

/// Parse the uncompressed directory body into an ordered entry list.
///
/// # Directory layout (all offsets body-relative)
/// ```text
/// [0..4)   Filename table offset
/// [4..8)   File count
/// [8..16)  Reserved
/// [16..20) File-data table offset
/// ```
///
/// The filename table starts with a u32 giving the offset of the first
/// filename; the names follow as consecutive NUL-terminated byte strings.
/// The file-data table holds one 16-byte row per file:
/// `[data offset u32][data size u32][8 reserved bytes]`.
pub fn parse(body: &[u8]) -> Result<Directory> {
    if body.len() < HEADER_REGION_END as usize {
        return Err(VromfsError::DirectoryMalformed(format!(
            "body is {} bytes, shorter than the {}-byte directory header",
            body.len(),
            HEADER_REGION_END
        )));
    }

    let body_len = body.len() as u64;
    let mut cursor = ByteCursor::new(body);

    let filename_table_offset = cursor.read_u32()?;
    let files_count = cursor.read_u32()?;
    let reserved = cursor.take_array::<8>()?;
    let file_data_table_offset = cursor.read_u32()?;
    debug!(
        "Directory: {} files, filename table at {:#x}, file-data table at {:#x}",
        files_count, filename_table_offset, file_data_table_offset
    );

    // Filename table: one leading u32, then the names back to back.
    cursor.seek(filename_table_offset as usize)?;
    let first_filename_offset = cursor.read_u32()?;
    if first_filename_offset < HEADER_REGION_END {
        return Err(VromfsError::DirectoryMalformed(format!(
            "first filename offset {:#x} overlaps the directory header",
            first_filename_offset
        )));
    }
    cursor.seek(first_filename_offset as usize)?;
    let mut names = Vec::with_capacity(files_count as usize);
    for _ in 0..files_count {
        match cursor.read_cstr() {
            Ok(raw) => names.push(decode_name(raw)),
            Err(_) => {
                return Err(VromfsError::CountMismatch {
                    item_type: "filenames",
                    expected: files_count as u64,
                    found: names.len() as u64,
                })
            }
        }
    }

    // File-data table: one 16-byte row per name, in the same order.
    cursor.seek(file_data_table_offset as usize)?;
    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let data_offset = cursor.read_u32()?;
        let data_size = cursor.read_u32()?;
        let row_reserved = cursor.take_array::<8>()?;

        let start = data_offset as u64;
        let end = start + data_size as u64;
        if end > body_len {
            return Err(VromfsError::OffsetOutOfRange {
                start,
                end,
                body_len,
            });
        }
        trace!("Entry {:?}: {} bytes at {:#x}", name, data_size, data_offset);
        entries.push(Entry {
            name,
            payload: body[start as usize..end as usize].to_vec(),
            reserved: row_reserved,
        });
    }

    Ok(Directory {
        filename_table_offset,
        file_data_table_offset,
        reserved,
        entries,
    })
}

/// Filenames are opaque bytes, UTF-8 by convention. The single remap the
/// format requires is the `0xFF?nm` alias for the shared-names entry.
fn decode_name(raw: &[u8]) -> String {
    if raw == NM_ALIAS {
        return "nm".to_string();
    }
    String::from_utf8_lossy(raw).into_owned()
}
