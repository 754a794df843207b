mod common;

use common::{distinct, gradient, indexed_pcx, noise, test_palette};
use lib_pcx::image::decoder::DecodeError;
use lib_pcx::{decode, encode, Error, Page, Pixel, PixelAccess};
use rstest::rstest;

#[rstest]
#[case::rgb_gradient(16, 16, 3, gradient(16, 16, 3))]
#[case::rgba_gradient(9, 4, 4, gradient(9, 4, 4))]
#[case::odd_width_padding(7, 3, 3, noise(7 * 3 * 3, 1))]
#[case::all_distinct(40, 2, 3, distinct(40 * 2 * 3))]
#[case::all_distinct_rgba(33, 3, 4, distinct(33 * 3 * 4))]
#[case::long_runs(130, 2, 3, vec![0x41; 130 * 2 * 3])]
#[case::long_high_runs(200, 1, 4, vec![0xF0; 200 * 4])]
#[case::high_noise(12, 12, 4, noise(12 * 12 * 4, 7).iter().map(|b| b | 0xC0).collect())]
#[case::single_pixel(1, 1, 3, vec![0xC0, 0x00, 0xFF])]
fn test_encode_decode_roundtrip(
    #[case] width: u32,
    #[case] height: u32,
    #[case] channels: u8,
    #[case] data: Vec<u8>,
) {
    let page = Page::from_interleaved(width, height, channels, &data).unwrap();
    let encoded = encode(&page).unwrap();
    assert!(!encoded.is_empty());

    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.pixel_data(), page.pixel_data());
    assert_eq!(decoded.to_interleaved(), data);
    assert_eq!(decoded.header(), page.header());
    assert_eq!(decoded.width(), width);
    assert_eq!(decoded.height(), height);
    assert_eq!(decoded.channels(), channels);
}

#[rstest]
#[case::run_length(true)]
#[case::raw(false)]
fn test_indexed_expansion(#[case] run_length: bool) {
    let bytes = indexed_pcx(2, 2, &[0, 1, 2, 3], run_length);
    let page = decode(&bytes).unwrap();
    let palette = test_palette();

    assert_eq!(page.channels(), 3);
    assert_eq!(page.bits(), 24);
    assert_eq!(page.palette(), Some(&palette));
    for (index, (x, y)) in [(0, 0), (1, 0), (0, 1), (1, 1)].into_iter().enumerate() {
        let [red, green, blue] = palette.color(index as u8);
        assert_eq!(page.pixel(x, y), Some(Pixel::rgb(red, green, blue)));
    }
}

#[test]
fn test_indexed_with_padded_scanlines() {
    // width 3 padded to 4 bytes per line: index 9 must never show up
    let indices = [10, 20, 30, 9, 40, 50, 60, 9];
    let page = decode(&indexed_pcx(3, 2, &indices, true)).unwrap();

    assert_eq!(page.dimensions(), (3, 2));
    assert_eq!(page.pixel(2, 1), Some(Pixel::rgb(60, 195, 30)));
    assert!(page.to_interleaved().chunks(3).all(|p| p[0] != 9));
}

#[test]
fn test_indexed_page_reencodes_as_true_color() {
    let indices = noise(8 * 5, 3);
    let page = decode(&indexed_pcx(8, 5, &indices, false)).unwrap();

    let reloaded = decode(&encode(&page).unwrap()).unwrap();
    assert_eq!(reloaded.channels(), 3);
    assert_eq!(reloaded.palette(), None);
    assert_eq!(reloaded.to_interleaved(), page.to_interleaved());
}

#[test]
fn test_indexed_truncated_palette_marker() {
    let mut bytes = indexed_pcx(2, 2, &[0, 1, 2, 3], true);
    let marker = bytes.len() - 769;
    bytes[marker] = 0;

    assert!(matches!(decode(&bytes), Err(DecodeError::Palette(_))));
}

#[test]
fn test_save_load_page_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.pcx");

    let mut page = Page::from_interleaved(5, 4, 4, &gradient(5, 4, 4)).unwrap();
    page.set_pixel(4, 3, Pixel::rgba(1, 2, 3, 4)).unwrap();
    page.save(&path).unwrap();

    let loaded = Page::load(&path).unwrap();
    assert_eq!(loaded, page);
    assert_eq!(loaded.pixel(4, 3), Some(Pixel::rgba(1, 2, 3, 4)));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Page::load(dir.path().join("missing.pcx"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_load_outdated_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.pcx");

    let mut bytes = encode(&Page::from_interleaved(2, 2, 3, &[0; 12]).unwrap()).unwrap();
    bytes[1] = 2;
    std::fs::write(&path, bytes).unwrap();

    let error = Page::load(&path).unwrap_err();
    assert!(matches!(
        error,
        Error::Format(DecodeError::UnsupportedVersion(2))
    ));
    assert!(error.to_string().contains("Outdated versions"));
}
