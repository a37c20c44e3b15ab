//! XOR obfuscation applied to zstd-packed container bodies.
//!
//! Only two 16-byte windows of the packed body are obfuscated: the head,
//! and (for bodies of at least 32 bytes) a tail window placed after the
//! 4-byte-aligned middle region. The middle region and any trailing
//! `len % 4` bytes are stored as-is.

use byteorder::{ByteOrder, LittleEndian};

/// XOR key for the leading 16-byte window, as little-endian u32 words.
const HEAD_KEY: [u32; 4] = [0xAA55_AA55, 0xF00F_F00F, 0xAA55_AA55, 0x1248_1248];

/// XOR key for the trailing 16-byte window.
const TAIL_KEY: [u32; 4] = [0x1248_1248, 0xAA55_AA55, 0xF00F_F00F, 0xAA55_AA55];

/// Undo the body obfuscation in place.
///
/// For a body of `n` bytes:
/// - `n >= 16`: the first 16 bytes are XORed with [`HEAD_KEY`];
/// - `n >= 32`: the 16 bytes following the middle region are XORed with
///   [`TAIL_KEY`], where the middle region is `n - 32` rounded down to a
///   multiple of 4.
///
/// The transform is an involution: applying it twice restores the input.
pub fn deobfuscate(data: &mut [u8]) {
    let n = data.len();
    if n >= 16 {
        xor_words(&mut data[..16], &HEAD_KEY);
    }
    if n >= 32 {
        let tail_start = 16 + ((n - 32) & !3);
        xor_words(&mut data[tail_start..tail_start + 16], &TAIL_KEY);
    }
}

fn xor_words(window: &mut [u8], key: &[u32; 4]) {
    for (chunk, k) in window.chunks_exact_mut(4).zip(key) {
        let word = LittleEndian::read_u32(chunk) ^ k;
        LittleEndian::write_u32(chunk, word);
    }
}
