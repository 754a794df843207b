pub mod palette;
pub mod planar;
pub mod rle;

use log::{debug, info};

use planar::PlaneLayout;
use rle::RleDecompressionError;

/// Run-length encodes a plane-major buffer one scanline plane at a time,
/// so no run crosses from one plane or row into the next.
pub fn compress_planes(data: &[u8], layout: &PlaneLayout) -> Vec<u8> {
    info!("Starting plane compression");
    debug!(
        "Layout: {}x{}, {} bytes per line, {} planes",
        layout.width, layout.height, layout.bytes_per_line, layout.planes
    );

    let mut encoded = Vec::with_capacity(data.len());
    if layout.bytes_per_line > 0 {
        for line in data.chunks(layout.bytes_per_line) {
            rle::rle_compression_into(line, &mut encoded);
        }
    }

    debug!("Compressed {} bytes into {}", data.len(), encoded.len());
    encoded
}

/// Expands a run-length stream and reports how many bytes it produced
/// beyond the layout's buffer size. The surplus is cut off.
pub fn decompress_planes(
    data: &[u8],
    layout: &PlaneLayout,
) -> Result<(Vec<u8>, usize), RleDecompressionError> {
    let expected = layout.buffer_len();
    let mut decoded = rle::rle_decompression(data, expected)?;
    debug!(
        "Decompressed {} bytes into {} (expected {})",
        data.len(),
        decoded.len(),
        expected
    );

    let surplus = decoded.len().saturating_sub(expected);
    decoded.truncate(expected);
    Ok((decoded, surplus))
}
