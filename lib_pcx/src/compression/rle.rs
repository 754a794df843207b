use thiserror::Error;

use crate::constants::{RLE_COUNT_MASK, RLE_MARKER, RLE_MAX_RUN};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RleDecompressionError {
    #[error("Run-length marker at byte {position} is not followed by a value byte")]
    DanglingMarker { position: usize },
}

/// Run-length encodes one scanline plane the way PCX expects it.
///
/// Runs longer than one byte, and any byte with its top two bits set, are
/// written as a `0xC0 | count` marker followed by the value. Runs longer
/// than 63 bytes are split into several markers.
///
/// # Arguments
/// * `data` - Bytes to compress
/// * `encoded` - Output buffer the compressed bytes are appended to
pub fn rle_compression_into(data: &[u8], encoded: &mut Vec<u8>) {
    let mut index = 0;

    while index < data.len() {
        let value = data[index];
        let run = data[index..].iter().take_while(|&&byte| byte == value).count();

        if run == 1 && value & RLE_MARKER != RLE_MARKER {
            encoded.push(value);
        } else {
            let mut remaining = run;
            while remaining > 0 {
                let count = remaining.min(RLE_MAX_RUN);
                encoded.push(RLE_MARKER | count as u8);
                encoded.push(value);
                remaining -= count;
            }
        }

        index += run;
    }
}

/// Convenience wrapper around [`rle_compression_into`] returning a fresh buffer.
pub fn rle_compression(data: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(data.len());
    rle_compression_into(data, &mut encoded);
    encoded
}

/// Expands a PCX run-length stream.
///
/// The stream carries no terminator, so the whole slice is consumed; the
/// caller bounds it to the page's byte range.
///
/// # Arguments
/// * `data` - Compressed bytes of exactly one page range
/// * `expected_len` - Capacity hint for the decoded buffer, capped by what
///   `data` can expand to
///
/// # Returns
/// * `Result<Vec<u8>, RleDecompressionError>` - Decoded bytes or error
pub fn rle_decompression(
    data: &[u8],
    expected_len: usize,
) -> Result<Vec<u8>, RleDecompressionError> {
    let capacity = expected_len.min(data.len().saturating_mul(RLE_MAX_RUN));
    let mut decoded = Vec::with_capacity(capacity);
    let mut bytes = data.iter().enumerate();

    while let Some((position, &byte)) = bytes.next() {
        if byte & RLE_MARKER == RLE_MARKER {
            let count = (byte & RLE_COUNT_MASK) as usize;
            let (_, &value) = bytes
                .next()
                .ok_or(RleDecompressionError::DanglingMarker { position })?;
            decoded.resize(decoded.len() + count, value);
        } else {
            decoded.push(byte);
        }
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rle_empty_input() {
        assert!(rle_compression(&[]).is_empty());
        assert!(rle_decompression(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_rle_literals_pass_through() {
        let input = vec![1, 2, 3, 4, 0x3F, 0x80, 0xBF];
        let compressed = rle_compression(&input);
        assert_eq!(compressed, input);
    }

    #[test]
    fn test_rle_run_of_63_is_one_marker() {
        let compressed = rle_compression(&[7; 63]);
        assert_eq!(compressed, vec![0xFF, 7]);
    }

    #[test]
    fn test_rle_run_of_64_is_two_markers() {
        let compressed = rle_compression(&[7; 64]);
        assert_eq!(compressed, vec![0xFF, 7, 0xC1, 7]);
        assert_eq!(rle_decompression(&compressed, 64).unwrap(), vec![7; 64]);
    }

    #[test]
    fn test_rle_single_high_byte_is_escaped() {
        for value in 0xC0..=0xFF_u8 {
            let compressed = rle_compression(&[1, value, 2]);
            assert_eq!(compressed, vec![1, 0xC1, value, 2]);
            assert_eq!(rle_decompression(&compressed, 3).unwrap(), vec![1, value, 2]);
        }
    }

    #[test]
    fn test_rle_short_runs() {
        let input = vec![5, 5, 6, 9, 9, 9];
        let compressed = rle_compression(&input);
        assert_eq!(compressed, vec![0xC2, 5, 6, 0xC3, 9]);
        assert_eq!(rle_decompression(&compressed, input.len()).unwrap(), input);
    }

    #[test]
    fn test_rle_zero_count_marker_emits_nothing() {
        let decoded = rle_decompression(&[0xC0, 9, 4], 1).unwrap();
        assert_eq!(decoded, vec![4]);
    }

    #[test]
    fn test_rle_dangling_marker() {
        assert_eq!(
            rle_decompression(&[1, 2, 0xC5], 8),
            Err(RleDecompressionError::DanglingMarker { position: 2 })
        );
    }

    #[test]
    fn test_rle_capacity_hint_bounded_by_input() {
        let decoded = rle_decompression(&[0xC2, 5], usize::MAX / 2).unwrap();
        assert_eq!(decoded, vec![5, 5]);
        assert!(decoded.capacity() <= 2 * RLE_MAX_RUN);
    }

    #[test]
    fn test_rle_gradients() {
        let mut data = Vec::new();
        for i in 0..256 {
            data.extend_from_slice(&[i as u8, i as u8, i as u8, 255]);
        }

        let compressed = rle_compression(&data);
        let decompressed = rle_decompression(&compressed, data.len()).unwrap();
        assert_eq!(data, decompressed);
    }
}
