use std::fs;
use std::io;
use std::path::Path;

use image::{DynamicImage, ImageError, Rgb, RgbImage, Rgba, RgbaImage};
use lib_pcx::constants::{DCX_MAGIC, PCX_FILE_TYPE};
use lib_pcx::image::encoder::EncodingError;
use lib_pcx::{Container, Page, PixelAccess};
use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageHandlingError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    #[error("{0}")]
    CodecError(#[from] lib_pcx::Error),

    #[error("Cannot build a PCX page: {0}")]
    EncodingError(#[from] EncodingError),

    #[error("Only 3- and 4-channel pages can be exported, got {0}")]
    UnsupportedChannels(u8),

    #[error("Container holds no pages")]
    EmptyContainer,
}

/// What a file turned out to contain, judged by its leading bytes.
pub enum Source {
    Dcx(Container),
    Pcx(Page),
    Other(DynamicImage),
}

impl Source {
    /// Every page of the source, converting foreign images on the way.
    pub fn into_pages(self) -> Result<Vec<Page>, ImageHandlingError> {
        match self {
            Source::Dcx(container) => Ok(container.pages().to_vec()),
            Source::Pcx(page) => Ok(vec![page]),
            Source::Other(image) => Ok(vec![page_from_image(image)?]),
        }
    }
}

pub fn open(path: &Path) -> Result<Source, ImageHandlingError> {
    let buffer = fs::read(path)?;

    if buffer.len() >= 4 && buffer[..4] == DCX_MAGIC.to_le_bytes() {
        debug!("{} is a DCX container", path.display());
        let container = Container::decode(&buffer).map_err(lib_pcx::Error::from)?;
        Ok(Source::Dcx(container))
    } else if buffer.first() == Some(&PCX_FILE_TYPE) {
        debug!("{} is a PCX page", path.display());
        let page = lib_pcx::decode(&buffer).map_err(lib_pcx::Error::from)?;
        Ok(Source::Pcx(page))
    } else {
        debug!("{} goes to the image crate", path.display());
        Ok(Source::Other(image::load_from_memory(&buffer)?))
    }
}

/// Builds an RGB page, or an RGBA page when the image carries alpha.
pub fn page_from_image(image: DynamicImage) -> Result<Page, EncodingError> {
    if image.color().has_alpha() {
        let rgba = image.into_rgba8();
        Page::from_interleaved(rgba.width(), rgba.height(), 4, rgba.as_raw())
    } else {
        let rgb = image.into_rgb8();
        Page::from_interleaved(rgb.width(), rgb.height(), 3, rgb.as_raw())
    }
}

/// Reads the page back pixel by pixel through [`PixelAccess`].
pub fn page_to_image<P: PixelAccess>(page: &P) -> Result<DynamicImage, ImageHandlingError> {
    let (width, height) = page.dimensions();

    match page.channels() {
        3 => Ok(DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            page.pixel(x, y)
                .map_or(Rgb([0, 0, 0]), |p| Rgb([p.red, p.green, p.blue]))
        }))),
        4 => Ok(DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            page.pixel(x, y).map_or(Rgba([0, 0, 0, 0]), |p| {
                Rgba([p.red, p.green, p.blue, p.alpha])
            })
        }))),
        channels => Err(ImageHandlingError::UnsupportedChannels(channels)),
    }
}
