use serde::{Deserialize, Serialize};

use super::encoder::EncodingError;
use crate::compression::palette::VgaPalette;
use crate::compression::planar::{interleaved_to_planar, planar_to_interleaved, PlaneLayout};
use crate::constants::{DEFAULT_DPI, ENCODING_RLE, PCX_FILE_TYPE, PCX_VERSION};

/// The fixed 128-byte PCX header, field for field in file order.
///
/// Multi-byte fields are little-endian on disk; `bincode`'s fixed-int
/// encoding reproduces the layout exactly.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcxHeader {
    pub file_type: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub x_min: u16,
    pub y_min: u16,
    pub x_max: u16,
    pub y_max: u16,
    pub h_dpi: u16,
    pub v_dpi: u16,
    pub ega_palette: [[u8; 3]; 16],
    pub reserved: u8,
    pub num_of_color_planes: u8,
    pub bytes_per_line: u16,
    pub palette_type: u16,
    pub h_screen_size: u16,
    pub v_screen_size: u16,
    // 54 filler bytes
    pub filler: [[u8; 18]; 3],
}

impl PcxHeader {
    /// Header for a run-length encoded 8-bit true color page.
    pub fn true_color(width: u16, height: u16, planes: u8) -> Self {
        // Scanlines are padded to an even number of bytes
        let bytes_per_line = width.saturating_add(width & 1);
        Self {
            file_type: PCX_FILE_TYPE,
            version: PCX_VERSION,
            encoding: ENCODING_RLE,
            bits_per_pixel: 8,
            x_min: 0,
            y_min: 0,
            x_max: width.saturating_sub(1),
            y_max: height.saturating_sub(1),
            h_dpi: DEFAULT_DPI,
            v_dpi: DEFAULT_DPI,
            ega_palette: [[0; 3]; 16],
            reserved: 0,
            num_of_color_planes: planes,
            bytes_per_line,
            palette_type: 1,
            h_screen_size: 0,
            v_screen_size: 0,
            filler: [[0; 18]; 3],
        }
    }

    pub fn width(&self) -> u32 {
        u32::from(self.x_max).saturating_sub(u32::from(self.x_min)) + 1
    }

    pub fn height(&self) -> u32 {
        u32::from(self.y_max).saturating_sub(u32::from(self.y_min)) + 1
    }

    /// Nominal bit depth of the decoded page.
    pub fn bits(&self) -> u8 {
        self.num_of_color_planes.saturating_mul(8)
    }

    /// One plane with more than 4 bits per pixel: indices into a trailing palette.
    pub fn is_vga(&self) -> bool {
        self.num_of_color_planes == 1 && self.bits_per_pixel > 4
    }

    pub fn layout(&self) -> PlaneLayout {
        PlaneLayout::new(
            self.width() as usize,
            self.height() as usize,
            self.bytes_per_line as usize,
            self.num_of_color_planes as usize,
        )
    }
}

/// One decoded PCX raster with its pixels stored plane-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    header: PcxHeader,
    width: u32,
    height: u32,
    bits: u8,
    planar: bool,
    pixel_data: Vec<u8>,
    palette: Option<VgaPalette>,
    message: Option<String>,
}

impl Page {
    pub(crate) fn from_parts(
        header: PcxHeader,
        pixel_data: Vec<u8>,
        palette: Option<VgaPalette>,
        message: Option<String>,
    ) -> Self {
        Self {
            header,
            width: header.width(),
            height: header.height(),
            bits: header.bits(),
            planar: true,
            pixel_data,
            palette,
            message,
        }
    }

    /// Builds a page from pixel-major RGB or RGBA data.
    ///
    /// # Errors
    /// - `EncodingError::UnsupportedPlanes` unless `channels` is 3 or 4
    /// - `EncodingError::InvalidDimensions` for empty or oversized images
    /// - `EncodingError::BufferSize` if `data` does not hold `width * height` pixels
    pub fn from_interleaved(
        width: u32,
        height: u32,
        channels: u8,
        data: &[u8],
    ) -> Result<Self, EncodingError> {
        if channels != 3 && channels != 4 {
            return Err(EncodingError::UnsupportedPlanes(channels));
        }
        let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(EncodingError::InvalidDimensions { width, height }),
        };
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(EncodingError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let header = PcxHeader::true_color(w, h, channels);
        let pixel_data = interleaved_to_planar(data, &header.layout());
        Ok(Self::from_parts(header, pixel_data, None, None))
    }

    pub fn header(&self) -> &PcxHeader {
        &self.header
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn is_planar(&self) -> bool {
        self.planar
    }

    pub fn channels(&self) -> u8 {
        self.header.num_of_color_planes
    }

    pub fn has_alpha(&self) -> bool {
        self.channels() == 4
    }

    /// The palette an indexed page was expanded through, if any.
    pub fn palette(&self) -> Option<&VgaPalette> {
        self.palette.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn layout(&self) -> PlaneLayout {
        self.header.layout()
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn pixel_data_mut(&mut self) -> &mut [u8] {
        &mut self.pixel_data
    }

    /// Pixel-major copy of the page, `width * height * channels` bytes.
    pub fn to_interleaved(&self) -> Vec<u8> {
        planar_to_interleaved(&self.pixel_data, &self.layout())
    }
}
