#![allow(dead_code)]

use lib_pcx::compression::palette::VgaPalette;
use lib_pcx::compression::rle::rle_compression;
use lib_pcx::constants::{ENCODING_RAW, ENCODING_RLE};
use lib_pcx::PcxHeader;

/// Deterministic noise so tests don't depend on an RNG crate.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}

/// Every byte differs from its neighbour, so no run ever forms.
pub fn distinct(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 251) as u8).collect()
}

pub fn gradient(width: u32, height: u32, channels: u8) -> Vec<u8> {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels as u32 {
                data.push((x * 16 + y * 4 + c * 64) as u8);
            }
        }
    }
    data
}

/// Palette mapping index `i` to `(i, 255 - i, i / 2)`.
pub fn test_palette() -> VgaPalette {
    let mut entries = [[0u8; 3]; 256];
    for (i, entry) in entries.iter_mut().enumerate() {
        *entry = [i as u8, 255 - i as u8, (i / 2) as u8];
    }
    VgaPalette::new(entries)
}

/// Builds a VGA-indexed PCX file; `indices` holds one row of
/// `bytes_per_line` bytes per scanline.
pub fn indexed_pcx(width: u16, height: u16, indices: &[u8], run_length: bool) -> Vec<u8> {
    let mut header = PcxHeader::true_color(width, height, 1);
    header.encoding = if run_length { ENCODING_RLE } else { ENCODING_RAW };

    let mut bytes = bincode::serialize(&header).unwrap();
    if run_length {
        bytes.extend_from_slice(&rle_compression(indices));
    } else {
        bytes.extend_from_slice(indices);
    }
    bytes.extend_from_slice(&test_palette().to_bytes());
    bytes
}
