use std::io;

use thiserror::Error;

use crate::container::ContainerError;
use crate::image::decoder::DecodeError;
use crate::image::encoder::EncodingError;

/// Failure of a whole load or save call.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Format error: {0}")]
    Format(#[from] DecodeError),
    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Malformed container: {0}")]
    Container(#[from] ContainerError),
}

pub type Result<T> = std::result::Result<T, Error>;
