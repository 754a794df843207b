//! DCX multi-page container.
//!
//! A container owns its decoded pages and keeps one of them selected.
//! Pixel access through the container reaches straight into the selected
//! stored page, so edits are never lost when another page is selected.
//!
//! Saving encodes every page into memory first, then writes magic, offset
//! table and pages in one sequential pass. A write error part way through
//! leaves a partial file behind; callers needing atomic saves write to a
//! temporary path and rename.

pub mod offsets;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{debug, error, info, warn};
use thiserror::Error;

pub use offsets::{read_offset_table, OffsetRange};

use crate::error::Result;
use crate::image::format::Page;
use crate::image::{decode, encode};
use crate::pixel::{Pixel, PixelAccess, PixelError};

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("File of {0} bytes is too short to hold a container magic")]
    MissingMagic(usize),
    #[error("Not a DCX container: magic {0:#010x}")]
    InvalidMagic(u32),
    #[error("Offset table runs past end of file")]
    TruncatedOffsetTable,
    #[error("Offset table declares no pages")]
    EmptyOffsetTable,
    #[error("Container has no pages to save")]
    NoPages,
    #[error("Container size {0} exceeds the 32-bit offset range")]
    TooLarge(usize),
}

/// A page listed in the offset table that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    pub index: usize,
    pub range: OffsetRange,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Container {
    pages: Vec<Page>,
    ranges: Vec<OffsetRange>,
    skipped: Vec<SkippedPage>,
    selected: usize,
}

impl Container {
    /// Empty container for building a new file page by page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whole DCX file held in memory.
    ///
    /// Pages that fail to decode are skipped and listed in [`skipped`];
    /// only a broken offset table fails the load. A container whose every
    /// page was skipped loads with no pages.
    ///
    /// [`skipped`]: Container::skipped
    pub fn decode(data: &[u8]) -> std::result::Result<Self, ContainerError> {
        info!("Starting container decoding of {} bytes", data.len());
        let ranges = read_offset_table(data)?;
        let table_end = offsets::table_size(ranges.len());

        let mut pages = Vec::with_capacity(ranges.len());
        let mut skipped = Vec::new();

        for (index, range) in ranges.iter().enumerate() {
            debug!("Page {}: bytes {}..{}", index, range.start, range.end);
            match decode_range(data, range, table_end) {
                Ok(page) => pages.push(page),
                Err(reason) => {
                    warn!("Skipping page {}: {}", index, reason);
                    skipped.push(SkippedPage {
                        index,
                        range: *range,
                        reason,
                    });
                }
            }
        }

        if pages.is_empty() {
            warn!("No page of the container could be decoded");
        }

        info!(
            "Container decoded: {} of {} pages",
            pages.len(),
            ranges.len()
        );
        Ok(Self {
            pages,
            ranges,
            skipped,
            selected: 0,
        })
    }

    /// Reads and decodes a DCX file. The file is closed before returning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading DCX file {}", path.display());
        let data = std::fs::read(path)?;
        Ok(Self::decode(&data)?)
    }

    /// Serializes every page into a complete DCX file image.
    pub fn encode(&self) -> Result<Vec<u8>> {
        info!("Starting container encoding of {} pages", self.pages.len());
        if self.pages.is_empty() {
            error!("Refusing to save a container without pages");
            return Err(ContainerError::NoPages.into());
        }

        let encoded = self
            .pages
            .iter()
            .map(encode)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let sizes: Vec<usize> = encoded.iter().map(Vec::len).collect();
        debug!("Encoded page sizes: {:?}", sizes);

        let total = offsets::table_size(sizes.len()) + sizes.iter().sum::<usize>();
        let mut data = Vec::with_capacity(total);
        offsets::write_offset_table(&sizes, &mut data)?;
        for page in &encoded {
            data.extend_from_slice(page);
        }

        info!("Container encoded: {} bytes", data.len());
        Ok(data)
    }

    /// Encodes the container and writes it to `path`.
    ///
    /// A failure while writing may leave a partially written file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!("Saving DCX file {}", path.display());
        let data = self.encode()?;

        let mut file = File::create(path)?;
        file.write_all(&data)?;
        file.flush()?;
        Ok(())
    }

    /// Appends a page and returns its index. Ranges of the last load no
    /// longer describe the pages and are dropped.
    pub fn push_page(&mut self, page: Page) -> usize {
        self.ranges.clear();
        self.pages.push(page);
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Makes `index` the active page. Out of range indices are ignored.
    pub fn select_page(&mut self, index: usize) {
        if index < self.pages.len() {
            debug!("Selecting page {}", index);
            self.selected = index;
        }
    }

    pub fn selected_page_index(&self) -> usize {
        self.selected
    }

    pub fn selected_page(&self) -> Option<&Page> {
        self.pages.get(self.selected)
    }

    pub fn selected_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.get_mut(self.selected)
    }

    /// Page ranges from the offset table of the last load, empty once pages
    /// were pushed.
    pub fn ranges(&self) -> &[OffsetRange] {
        &self.ranges
    }

    /// Pages of the last load that failed to decode.
    pub fn skipped(&self) -> &[SkippedPage] {
        &self.skipped
    }
}

fn decode_range(
    data: &[u8],
    range: &OffsetRange,
    table_end: usize,
) -> std::result::Result<Page, String> {
    let (start, end) = (range.start as usize, range.end as usize);
    if start < table_end {
        return Err(format!("Page offset {} overlaps the offset table", start));
    }
    let bytes = data
        .get(start..end)
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| format!("Invalid page range {}..{}", start, end))?;

    decode(bytes).map_err(|e| e.to_string())
}

impl PixelAccess for Container {
    fn dimensions(&self) -> (u32, u32) {
        self.selected_page()
            .map_or((0, 0), |page| (page.width(), page.height()))
    }

    fn channels(&self) -> u8 {
        self.selected_page().map_or(0, Page::channels)
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.selected_page()?.pixel(x, y)
    }

    fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> std::result::Result<(), PixelError> {
        self.selected_page_mut()
            .ok_or(PixelError::NoPageSelected)?
            .set_pixel(x, y, pixel)
    }
}
