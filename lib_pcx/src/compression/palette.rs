use thiserror::Error;

use super::planar::{write_pixel, PlaneLayout};
use crate::constants::{VGA_PALETTE_ENTRIES, VGA_PALETTE_MARKER, VGA_PALETTE_SIZE};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Page of {0} bytes is too short to hold a VGA palette")]
    TooShort(usize),
    #[error("Invalid VGA palette marker {0:#04x}, expected 0x0c")]
    InvalidMarker(u8),
}

/// The 256-color RGB palette trailing a VGA-indexed PCX page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VgaPalette(Box<[[u8; 3]; VGA_PALETTE_ENTRIES]>);

impl VgaPalette {
    pub fn new(entries: [[u8; 3]; VGA_PALETTE_ENTRIES]) -> Self {
        Self(Box::new(entries))
    }

    /// Reads the palette block from the end of a page.
    ///
    /// # Parameters
    /// - `page`: All bytes of one page; the palette is the last 769 of them.
    ///
    /// # Errors
    /// - Returns `PaletteError::TooShort` if the page cannot hold a palette
    /// - Returns `PaletteError::InvalidMarker` if the marker byte is not `0x0C`
    pub fn from_page_end(page: &[u8]) -> Result<Self, PaletteError> {
        let start = page
            .len()
            .checked_sub(VGA_PALETTE_SIZE)
            .ok_or(PaletteError::TooShort(page.len()))?;

        let marker = page[start];
        if marker != VGA_PALETTE_MARKER {
            return Err(PaletteError::InvalidMarker(marker));
        }

        let mut entries = [[0u8; 3]; VGA_PALETTE_ENTRIES];
        for (entry, rgb) in entries.iter_mut().zip(page[start + 1..].chunks_exact(3)) {
            entry.copy_from_slice(rgb);
        }

        Ok(Self::new(entries))
    }

    /// Marker byte followed by the 256 RGB triples.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(VGA_PALETTE_SIZE);
        bytes.push(VGA_PALETTE_MARKER);
        for entry in self.0.iter() {
            bytes.extend_from_slice(entry);
        }
        bytes
    }

    pub fn color(&self, index: u8) -> [u8; 3] {
        self.0[index as usize]
    }

    pub fn entries(&self) -> &[[u8; 3]; VGA_PALETTE_ENTRIES] {
        &self.0
    }
}

/// Expands palette indices into a 3-plane RGB buffer.
///
/// # Parameters
/// - `indices`: One index byte per pixel, `layout.bytes_per_line` bytes per row.
/// - `palette`: The page's VGA palette.
/// - `layout`: Layout of the RGB buffer to produce.
///
/// # Returns
/// A plane-major buffer of `layout.buffer_len()` bytes. Padding stays zero.
pub fn palette_expansion(indices: &[u8], palette: &VgaPalette, layout: &PlaneLayout) -> Vec<u8> {
    let mut expanded = vec![0; layout.buffer_len()];

    for (y, row) in indices
        .chunks(layout.bytes_per_line)
        .take(layout.height)
        .enumerate()
    {
        for (x, &index) in row.iter().take(layout.width).enumerate() {
            write_pixel(&mut expanded, layout, x, y, &palette.color(index));
        }
    }

    expanded
}
