//! Conversion between plane-major and interleaved pixel layouts.
//!
//! A plane-major row holds one `bytes_per_line` run per channel, R first,
//! then G, B and optionally A. Rows follow each other, so the byte for
//! channel `c` of pixel `(x, y)` sits at
//! `y * bytes_per_line * planes + c * bytes_per_line + x`.
//!
//! Nothing in here checks coordinates. Callers exposing public pixel
//! access bound-check before calling in.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    pub width: usize,
    pub height: usize,
    pub bytes_per_line: usize,
    pub planes: usize,
}

impl PlaneLayout {
    pub fn new(width: usize, height: usize, bytes_per_line: usize, planes: usize) -> Self {
        Self {
            width,
            height,
            bytes_per_line,
            planes,
        }
    }

    /// Bytes in one row across all planes.
    pub fn row_stride(&self) -> usize {
        self.bytes_per_line * self.planes
    }

    /// Size of the whole plane-major buffer.
    pub fn buffer_len(&self) -> usize {
        self.row_stride() * self.height
    }

    pub fn offset(&self, x: usize, y: usize, plane: usize) -> usize {
        y * self.row_stride() + plane * self.bytes_per_line + x
    }
}

/// Copies the channels of pixel `(x, y)` into `pixel`, one byte per plane.
pub fn read_pixel(data: &[u8], layout: &PlaneLayout, x: usize, y: usize, pixel: &mut [u8]) {
    let base = layout.offset(x, y, 0);
    for (plane, channel) in pixel.iter_mut().take(layout.planes).enumerate() {
        *channel = data[base + plane * layout.bytes_per_line];
    }
}

/// Writes the channels of `pixel` back into the planes of `(x, y)`.
pub fn write_pixel(data: &mut [u8], layout: &PlaneLayout, x: usize, y: usize, pixel: &[u8]) {
    let base = layout.offset(x, y, 0);
    for (plane, &channel) in pixel.iter().take(layout.planes).enumerate() {
        data[base + plane * layout.bytes_per_line] = channel;
    }
}

/// Produces a `width * height * planes` buffer with the channels of each
/// pixel next to each other. Scanline padding is dropped.
pub fn planar_to_interleaved(data: &[u8], layout: &PlaneLayout) -> Vec<u8> {
    let mut interleaved = vec![0; layout.width * layout.height * layout.planes];

    for (index, pixel) in interleaved.chunks_exact_mut(layout.planes).enumerate() {
        let (x, y) = (index % layout.width, index / layout.width);
        read_pixel(data, layout, x, y, pixel);
    }

    interleaved
}

/// Inverse of [`planar_to_interleaved`]. Padding bytes come out as zero.
pub fn interleaved_to_planar(data: &[u8], layout: &PlaneLayout) -> Vec<u8> {
    let mut planar = vec![0; layout.buffer_len()];

    for (index, pixel) in data.chunks_exact(layout.planes).enumerate() {
        let (x, y) = (index % layout.width, index / layout.width);
        write_pixel(&mut planar, layout, x, y, pixel);
    }

    planar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_offsets() {
        let layout = PlaneLayout::new(3, 2, 4, 3);
        assert_eq!(layout.row_stride(), 12);
        assert_eq!(layout.buffer_len(), 24);
        assert_eq!(layout.offset(0, 0, 0), 0);
        assert_eq!(layout.offset(2, 0, 1), 6);
        assert_eq!(layout.offset(1, 1, 2), 12 + 8 + 1);
    }

    #[test]
    fn test_planar_to_interleaved_rgb() {
        // 2x1 image, bytes_per_line 2, planes R G B
        let layout = PlaneLayout::new(2, 1, 2, 3);
        let planar = vec![10, 11, 20, 21, 30, 31];
        assert_eq!(
            planar_to_interleaved(&planar, &layout),
            vec![10, 20, 30, 11, 21, 31]
        );
    }

    #[test]
    fn test_planar_padding_dropped_and_restored() {
        // width 3 padded to 4 bytes per line
        let layout = PlaneLayout::new(3, 1, 4, 4);
        let interleaved: Vec<u8> = (1..=12).collect();
        let planar = interleaved_to_planar(&interleaved, &layout);
        assert_eq!(
            planar,
            vec![1, 5, 9, 0, 2, 6, 10, 0, 3, 7, 11, 0, 4, 8, 12, 0]
        );
        assert_eq!(planar_to_interleaved(&planar, &layout), interleaved);
    }

    #[test]
    fn test_planar_single_pixel_access() {
        let layout = PlaneLayout::new(2, 2, 2, 3);
        let mut planar = vec![0; layout.buffer_len()];
        write_pixel(&mut planar, &layout, 1, 1, &[1, 2, 3]);

        let mut pixel = [0; 3];
        read_pixel(&planar, &layout, 1, 1, &mut pixel);
        assert_eq!(pixel, [1, 2, 3]);
        assert_eq!(planar[layout.offset(1, 1, 2)], 3);
        assert_eq!(planar.iter().filter(|&&b| b != 0).count(), 3);
    }
}
