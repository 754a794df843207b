use log::{debug, error, info};
use thiserror::Error;

use super::format::Page;
use crate::compression::compress_planes;
use crate::constants::PCX_HEADER_SIZE;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Only 3- and 4-plane pages can be encoded, got {0} planes")]
    UnsupportedPlanes(u8),
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("Failed to serialize header: {0}")]
    HeaderSerializationFailed(#[from] bincode::Error),
}

/// Encodes a true color page: the header as stored on the page followed by
/// the run-length compressed planes.
pub fn encode(page: &Page) -> Result<Vec<u8>, EncodingError> {
    info!("Starting encoding");

    let header = page.header();
    if !matches!(header.num_of_color_planes, 3 | 4) {
        error!(
            "Cannot encode a page with {} planes",
            header.num_of_color_planes
        );
        return Err(EncodingError::UnsupportedPlanes(header.num_of_color_planes));
    }

    let layout = page.layout();
    if page.pixel_data().len() != layout.buffer_len() {
        error!(
            "Pixel buffer of {} bytes does not match layout ({} bytes)",
            page.pixel_data().len(),
            layout.buffer_len()
        );
        return Err(EncodingError::BufferSize {
            expected: layout.buffer_len(),
            actual: page.pixel_data().len(),
        });
    }

    // Step 1: Write header
    let mut encoded_data = Vec::with_capacity(PCX_HEADER_SIZE + layout.buffer_len());
    bincode::serialize_into(&mut encoded_data, header)?;
    debug!("Header written: {:?}", header);

    // Step 2: Compress the planes
    encoded_data.extend_from_slice(&compress_planes(page.pixel_data(), &layout));

    info!("Encoding completed: {} bytes", encoded_data.len());
    Ok(encoded_data)
}
