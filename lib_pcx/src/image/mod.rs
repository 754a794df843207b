pub mod decoder;
pub mod encoder;
pub mod format;

use std::fs;
use std::path::Path;

use log::info;

pub use decoder::decode;
pub use encoder::encode;

use crate::error::Result;
use format::Page;

impl Page {
    /// Reads and decodes a single-page PCX file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading PCX file {}", path.display());
        let data = fs::read(path)?;
        Ok(decode(&data)?)
    }

    /// Encodes the page and writes it to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!("Saving PCX file {}", path.display());
        let data = encode(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}
