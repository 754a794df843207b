use std::fs;
use std::path::{Path, PathBuf};

use lib_pcx::{Container, Page};
use log::info;

use crate::filemanager::{self, ImageHandlingError, Source};

pub fn info(input: &Path) -> Result<(), ImageHandlingError> {
    match filemanager::open(input)? {
        Source::Dcx(container) => {
            println!(
                "{}: DCX container, {} pages ({} skipped)",
                input.display(),
                container.page_count(),
                container.skipped().len()
            );
            let mut loaded = container.pages().iter();
            let mut skipped = container.skipped().iter().peekable();
            for (index, range) in container.ranges().iter().enumerate() {
                print!("  #{} bytes {}..{}: ", index, range.start, range.end);
                match skipped.next_if(|s| s.index == index) {
                    Some(skip) => println!("skipped, {}", skip.reason),
                    None => match loaded.next() {
                        Some(page) => print_page(page),
                        None => println!("missing"),
                    },
                }
            }
        }
        Source::Pcx(page) => {
            print!("{}: PCX page, ", input.display());
            print_page(&page);
        }
        Source::Other(image) => {
            println!(
                "{}: not a PCX or DCX file ({}x{} {:?})",
                input.display(),
                image.width(),
                image.height(),
                image.color()
            );
        }
    }
    Ok(())
}

fn print_page(page: &Page) {
    let header = page.header();
    println!(
        "{}x{}, {} bits, {} planes, {} bytes per line, {}x{} dpi{}",
        page.width(),
        page.height(),
        page.bits(),
        page.channels(),
        header.bytes_per_line,
        header.h_dpi,
        header.v_dpi,
        if page.palette().is_some() { ", from VGA palette" } else { "" }
    );
    if let Some(message) = page.message() {
        println!("      note: {}", message);
    }
}

pub fn extract(input: &Path, out_dir: &Path) -> Result<(), ImageHandlingError> {
    let pages = filemanager::open(input)?.into_pages()?;
    fs::create_dir_all(out_dir)?;

    let stem = input
        .file_stem()
        .map_or_else(|| "page".into(), |stem| stem.to_string_lossy());
    for (index, page) in pages.iter().enumerate() {
        let path = out_dir.join(format!("{}_{:03}.png", stem, index));
        filemanager::page_to_image(page)?.save(&path)?;
        info!("Wrote page {} to {}", index, path.display());
        println!("{}", path.display());
    }
    Ok(())
}

pub fn pack(output: &Path, inputs: &[PathBuf]) -> Result<(), ImageHandlingError> {
    let mut container = Container::new();
    for input in inputs {
        for page in filemanager::open(input)?.into_pages()? {
            container.push_page(page);
        }
    }

    container.save(output)?;
    println!(
        "{}: packed {} pages",
        output.display(),
        container.page_count()
    );
    Ok(())
}

pub fn convert(input: &Path, output: &Path) -> Result<(), ImageHandlingError> {
    let page = match filemanager::open(input)? {
        Source::Dcx(container) => container
            .selected_page()
            .cloned()
            .ok_or(ImageHandlingError::EmptyContainer)?,
        Source::Pcx(page) => page,
        Source::Other(image) => filemanager::page_from_image(image)?,
    };

    page.save(output)?;
    println!("{}: {}x{}", output.display(), page.width(), page.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_pcx::{Pixel, PixelAccess};

    #[test]
    fn test_pack_then_extract() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.pcx");
        let second = dir.path().join("second.pcx");
        Page::from_interleaved(4, 2, 3, &[0x30; 24]).unwrap().save(&first).unwrap();
        Page::from_interleaved(3, 3, 4, &[0xE0; 36]).unwrap().save(&second).unwrap();

        let packed = dir.path().join("packed.dcx");
        pack(&packed, &[first, second]).unwrap();
        assert_eq!(Container::load(&packed).unwrap().page_count(), 2);

        let out_dir = dir.path().join("pages");
        extract(&packed, &out_dir).unwrap();
        assert!(out_dir.join("packed_000.png").exists());
        assert!(out_dir.join("packed_001.png").exists());
    }

    #[test]
    fn test_convert_png_to_pcx() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("in.png");
        let pcx = dir.path().join("out.pcx");

        let page = Page::from_interleaved(2, 2, 3, &[9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0xC1, 0xFF])
            .unwrap();
        filemanager::page_to_image(&page).unwrap().save(&png).unwrap();
        convert(&png, &pcx).unwrap();

        let loaded = Page::load(&pcx).unwrap();
        assert_eq!(loaded.pixel(1, 1), Some(Pixel::rgb(0, 0xC1, 0xFF)));
    }
}
