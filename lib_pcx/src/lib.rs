pub mod compression;
pub mod constants;
pub mod container;
pub mod error;
pub mod image;
pub mod pixel;

use log::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub use crate::container::{Container, ContainerError, OffsetRange, SkippedPage};
pub use crate::error::{Error, Result};
pub use crate::image::format::{Page, PcxHeader};
pub use crate::image::{decode, encode};
pub use crate::pixel::{Pixel, PixelAccess, PixelError};

/// Sets up `env_logger`.
///
/// Records from this crate pass at `level` and above; everything else
/// follows `RUST_LOG`. With a path, logs go to that file instead of stderr.
pub fn init_logging(log_file: Option<&Path>, level: LevelFilter) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let target = Box::new(File::create(path)?);
        builder.target(env_logger::Target::Pipe(target));
    }

    builder
        .filter(Some("lib_pcx"), level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
