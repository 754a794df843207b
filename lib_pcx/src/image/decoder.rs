use log::{debug, error, info, warn};
use thiserror::Error;

use super::format::{Page, PcxHeader};
use crate::compression::decompress_planes;
use crate::compression::palette::{palette_expansion, PaletteError, VgaPalette};
use crate::compression::planar::PlaneLayout;
use crate::compression::rle::RleDecompressionError;
use crate::constants::{
    ENCODING_RAW, ENCODING_RLE, PCX_FILE_TYPE, PCX_HEADER_SIZE, PCX_VERSION, VGA_PALETTE_SIZE,
};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Truncated header: {0} bytes, expected at least 128")]
    TruncatedHeader(usize),
    #[error("Failed to parse header: {0}")]
    HeaderParsingFailed(#[from] bincode::Error),
    #[error("Unrecognized format: file type {0:#04x}, expected 0x0a")]
    UnrecognizedFormat(u8),
    #[error("Outdated versions are not supported: version {0}")]
    UnsupportedVersion(u8),
    #[error(
        "This reader works only with 24-bit and 32-bit true color and VGA images \
         ({planes} planes at {bits_per_pixel} bits per pixel)"
    )]
    UnsupportedDepth { planes: u8, bits_per_pixel: u8 },
    #[error("Invalid bounding box or scanline width")]
    InvalidDimensions,
    #[error("Unknown encoding {0}")]
    UnknownEncoding(u8),
    #[error("Uncompressed image data are not supported for 24 and 32 bit images")]
    UncompressedTrueColor,
    #[error("Error during palette loading: {0}")]
    Palette(#[from] PaletteError),
    #[error("Pixel data truncated: expected {expected} bytes, got {actual}")]
    TruncatedPixelData { expected: usize, actual: usize },
    #[error("Run-length decoding failed: {0}")]
    RunLength(#[from] RleDecompressionError),
}

/// Reads and validates the header at the start of `data`.
pub fn decode_header(data: &[u8]) -> Result<PcxHeader, DecodeError> {
    if data.len() < PCX_HEADER_SIZE {
        error!("Page of {} bytes cannot hold a header", data.len());
        return Err(DecodeError::TruncatedHeader(data.len()));
    }
    let header: PcxHeader = bincode::deserialize(&data[..PCX_HEADER_SIZE])?;
    debug!("Header read: {:?}", header);

    check_header(&header)?;
    Ok(header)
}

fn check_header(header: &PcxHeader) -> Result<(), DecodeError> {
    if header.file_type != PCX_FILE_TYPE {
        error!("Unrecognized file type {:#04x}", header.file_type);
        return Err(DecodeError::UnrecognizedFormat(header.file_type));
    }

    let true_color = matches!(header.num_of_color_planes, 3 | 4) && header.bits_per_pixel == 8;
    if !true_color && !header.is_vga() {
        error!(
            "Unsupported depth: {} planes at {} bits per pixel",
            header.num_of_color_planes, header.bits_per_pixel
        );
        return Err(DecodeError::UnsupportedDepth {
            planes: header.num_of_color_planes,
            bits_per_pixel: header.bits_per_pixel,
        });
    }

    if header.version != PCX_VERSION {
        error!("Unsupported version {}", header.version);
        return Err(DecodeError::UnsupportedVersion(header.version));
    }

    if header.x_max < header.x_min
        || header.y_max < header.y_min
        || (header.bytes_per_line as u32) < header.width()
    {
        error!(
            "Invalid dimensions: box ({}, {})-({}, {}), {} bytes per line",
            header.x_min, header.y_min, header.x_max, header.y_max, header.bytes_per_line
        );
        return Err(DecodeError::InvalidDimensions);
    }

    if header.encoding != ENCODING_RAW && header.encoding != ENCODING_RLE {
        error!("Unknown encoding {}", header.encoding);
        return Err(DecodeError::UnknownEncoding(header.encoding));
    }

    Ok(())
}

/// Decodes one PCX page occupying all of `data`.
///
/// Indexed pages are expanded through their palette, so every page that
/// comes back has 3 or 4 planes.
pub fn decode(data: &[u8]) -> Result<Page, DecodeError> {
    info!("Starting decoding of {} bytes", data.len());
    let header = decode_header(data)?;

    let page = match header.num_of_color_planes {
        1 => decode_vga(data, header)?,
        _ => decode_true_color(data, header)?,
    };

    info!(
        "Decoding successful: {}x{}, {} bits",
        page.width(),
        page.height(),
        page.bits()
    );
    Ok(page)
}

fn decode_vga(data: &[u8], mut header: PcxHeader) -> Result<Page, DecodeError> {
    // The palette must sit after the header, never overlap it
    let palette = VgaPalette::from_page_end(&data[PCX_HEADER_SIZE..])?;
    debug!("VGA palette read");

    let index_layout = PlaneLayout {
        planes: 1,
        ..header.layout()
    };
    let pixel_range = &data[PCX_HEADER_SIZE..data.len() - VGA_PALETTE_SIZE];
    let (indices, message) = read_pixel_stream(pixel_range, &header, &index_layout)?;

    header.num_of_color_planes = 3;
    header.encoding = ENCODING_RLE;
    let pixel_data = palette_expansion(&indices, &palette, &header.layout());
    debug!("Expanded {} indices into {} bytes", indices.len(), pixel_data.len());

    Ok(Page::from_parts(header, pixel_data, Some(palette), message))
}

fn decode_true_color(data: &[u8], header: PcxHeader) -> Result<Page, DecodeError> {
    if header.encoding == ENCODING_RAW {
        error!("Uncompressed true color data");
        return Err(DecodeError::UncompressedTrueColor);
    }

    let layout = header.layout();
    let (pixel_data, message) = read_pixel_stream(&data[PCX_HEADER_SIZE..], &header, &layout)?;
    Ok(Page::from_parts(header, pixel_data, None, message))
}

/// Reads exactly `layout.buffer_len()` bytes from a raw or run-length
/// stream, with a diagnostic when trailing bytes had to be dropped.
fn read_pixel_stream(
    data: &[u8],
    header: &PcxHeader,
    layout: &PlaneLayout,
) -> Result<(Vec<u8>, Option<String>), DecodeError> {
    let expected = layout.buffer_len();

    let (pixels, surplus) = if header.encoding == ENCODING_RLE {
        decompress_planes(data, layout)?
    } else {
        let len = expected.min(data.len());
        (data[..len].to_vec(), data.len() - len)
    };

    if pixels.len() < expected {
        error!(
            "Pixel data truncated: expected {} bytes, got {}",
            expected,
            pixels.len()
        );
        return Err(DecodeError::TruncatedPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let message = (surplus > 0).then(|| {
        warn!("Discarded {} trailing bytes of pixel data", surplus);
        format!("Discarded {} trailing bytes of pixel data", surplus)
    });
    Ok((pixels, message))
}
