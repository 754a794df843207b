use thiserror::Error;

use crate::compression::planar::{read_pixel, write_pixel};
use crate::image::format::Page;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PixelError {
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("No page is selected")]
    NoPageSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// 255 when the page has no alpha plane.
    pub alpha: u8,
}

impl Pixel {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Uniform pixel access shared by single pages and containers.
pub trait PixelAccess {
    /// Get the dimensions of the image (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Number of color channels, 3 or 4
    fn channels(&self) -> u8;

    /// Get the pixel at the specified coordinates, `None` outside the image
    fn pixel(&self, x: u32, y: u32) -> Option<Pixel>;

    /// Overwrite the pixel at the specified coordinates. Alpha is dropped
    /// for images without an alpha channel.
    fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), PixelError>;
}

impl PixelAccess for Page {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn channels(&self) -> u8 {
        Page::channels(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let mut channels = [0, 0, 0, 255];
        read_pixel(
            self.pixel_data(),
            &self.layout(),
            x as usize,
            y as usize,
            &mut channels,
        );
        let [red, green, blue, alpha] = channels;
        Some(Pixel::rgba(red, green, blue, alpha))
    }

    fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), PixelError> {
        let (width, height) = PixelAccess::dimensions(self);
        if x >= width || y >= height {
            return Err(PixelError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        let layout = self.layout();
        write_pixel(
            self.pixel_data_mut(),
            &layout,
            x as usize,
            y as usize,
            &[pixel.red, pixel.green, pixel.blue, pixel.alpha],
        );
        Ok(())
    }
}
