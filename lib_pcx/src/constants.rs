/// File type tag every PCX header starts with.
pub const PCX_FILE_TYPE: u8 = 0x0A;
/// The only header version this codec reads and writes.
pub const PCX_VERSION: u8 = 5;
/// Size of the fixed PCX header in bytes.
pub const PCX_HEADER_SIZE: usize = 128;

pub const ENCODING_RAW: u8 = 0;
pub const ENCODING_RLE: u8 = 1;

/// Marker byte preceding the trailing VGA palette.
pub const VGA_PALETTE_MARKER: u8 = 0x0C;
pub const VGA_PALETTE_ENTRIES: usize = 256;
/// Marker byte plus 256 RGB triples, measured back from the page end.
pub const VGA_PALETTE_SIZE: usize = 1 + VGA_PALETTE_ENTRIES * 3;

/// Top two bits set marks a run-length byte.
pub const RLE_MARKER: u8 = 0xC0;
pub const RLE_COUNT_MASK: u8 = 0x3F;
pub const RLE_MAX_RUN: usize = 63;

/// Little-endian magic of a DCX multi-page container.
pub const DCX_MAGIC: u32 = 0x3ADE_68B1;
pub const DCX_OFFSET_SIZE: usize = 4;

/// Resolution written into headers of freshly built pages.
pub const DEFAULT_DPI: u16 = 72;
