use log::{debug, error};

use super::ContainerError;
use crate::constants::{DCX_MAGIC, DCX_OFFSET_SIZE};

/// Byte span `[start, end)` of one page inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    pub start: u32,
    pub end: u32,
}

impl OffsetRange {
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Size of magic plus `pages` offsets plus the zero terminator.
pub fn table_size(pages: usize) -> usize {
    DCX_OFFSET_SIZE * (pages + 2)
}

fn read_u32(data: &[u8], cursor: usize) -> Option<u32> {
    data.get(cursor..cursor + DCX_OFFSET_SIZE)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u32::from_le_bytes)
}

/// Checks the magic, reads the zero-terminated offset table and turns it
/// into one range per page. The last page runs to the end of `data`.
pub fn read_offset_table(data: &[u8]) -> Result<Vec<OffsetRange>, ContainerError> {
    let magic = read_u32(data, 0).ok_or(ContainerError::MissingMagic(data.len()))?;
    if magic != DCX_MAGIC {
        error!("Invalid container magic {:#010x}", magic);
        return Err(ContainerError::InvalidMagic(magic));
    }
    debug!("Magic number validated successfully");

    let mut offsets = Vec::new();
    let mut cursor = DCX_OFFSET_SIZE;
    loop {
        let offset = read_u32(data, cursor).ok_or_else(|| {
            error!("Offset table runs past end of file at byte {}", cursor);
            ContainerError::TruncatedOffsetTable
        })?;
        cursor += DCX_OFFSET_SIZE;
        if offset == 0 {
            break;
        }
        offsets.push(offset);
    }
    debug!("Offset table: {:?}", offsets);

    if offsets.is_empty() {
        error!("Offset table declares no pages");
        return Err(ContainerError::EmptyOffsetTable);
    }

    let file_end = u32::try_from(data.len()).unwrap_or(u32::MAX);
    let ranges = offsets
        .iter()
        .enumerate()
        .map(|(i, &start)| OffsetRange {
            start,
            end: offsets.get(i + 1).copied().unwrap_or(file_end),
        })
        .collect();

    Ok(ranges)
}

/// Appends magic, one offset per page for pages of the given sizes laid
/// out back to back after the table, and the zero terminator.
pub fn write_offset_table(page_sizes: &[usize], out: &mut Vec<u8>) -> Result<(), ContainerError> {
    out.extend_from_slice(&DCX_MAGIC.to_le_bytes());

    let mut offset = table_size(page_sizes.len());
    for &size in page_sizes {
        let value = u32::try_from(offset).map_err(|_| ContainerError::TooLarge(offset))?;
        out.extend_from_slice(&value.to_le_bytes());
        offset += size;
    }
    if u32::try_from(offset).is_err() {
        return Err(ContainerError::TooLarge(offset));
    }

    out.extend_from_slice(&0u32.to_le_bytes());
    Ok(())
}
