//! Readers for the gzip-compressed IDX archives MNIST ships in.
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x03        (number of dimensions = 3)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-1:   0x00 0x00   (reserved, must be zero)
//! byte   2:     0x08        (dtype = uint8)
//! byte   3:     0x01        (number of dimensions = 1)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index
//! ```
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use log::info;

use crate::data::sample_set::SampleSet;
use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

pub const IMAGE_HEADER_LEN: usize = 16;
pub const LABEL_HEADER_LEN: usize = 8;
pub const IMAGE_PIXELS: usize = 28 * 28;

/// Reads and gunzips a whole archive into memory.
pub fn read_gz<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NetError::MissingDataFile { path: path.display().to_string() });
    }
    let mut decoder = GzDecoder::new(BufReader::new(File::open(path)?));
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes).map_err(|e| {
        NetError::MalformedArchive(format!("{}: {}", path.display(), e))
    })?;
    Ok(bytes)
}

fn be_u32(bytes: &[u8], offset: usize) -> usize {
    u32::from_be_bytes([
        bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3],
    ]) as usize
}

fn check_magic(bytes: &[u8], dims: u8, what: &str) -> Result<()> {
    if bytes[0] != 0x00 || bytes[1] != 0x00 || bytes[2] != 0x08 || bytes[3] != dims {
        return Err(NetError::MalformedArchive(format!(
            "{} file: magic must be 00 00 08 {:02X}, got {:02X} {:02X} {:02X} {:02X}",
            what, dims, bytes[0], bytes[1], bytes[2], bytes[3]
        )));
    }
    Ok(())
}

/// Parses decompressed IDX3 image bytes into an N×784 matrix of pixels in [0, 1].
pub fn parse_images(image_bytes: &[u8]) -> Result<Matrix> {
    if image_bytes.len() < IMAGE_HEADER_LEN {
        return Err(NetError::MalformedArchive(format!(
            "image file too short: expected at least {} header bytes, got {}",
            IMAGE_HEADER_LEN, image_bytes.len()
        )));
    }
    check_magic(image_bytes, 0x03, "image")?;

    let n_items = be_u32(image_bytes, 4);
    let rows = be_u32(image_bytes, 8);
    let cols = be_u32(image_bytes, 12);
    if rows * cols != IMAGE_PIXELS {
        return Err(NetError::MalformedArchive(format!(
            "expected 28x28 images ({} pixels), got {}x{}", IMAGE_PIXELS, rows, cols
        )));
    }

    let payload = &image_bytes[IMAGE_HEADER_LEN..];
    let expected = n_items.checked_mul(IMAGE_PIXELS).ok_or_else(|| {
        NetError::MalformedArchive(format!("image count {} overflows", n_items))
    })?;
    if payload.len() != expected {
        return Err(NetError::MalformedArchive(format!(
            "header declares {} images ({} bytes) but payload has {} bytes",
            n_items, expected, payload.len()
        )));
    }

    let data = payload
        .chunks_exact(IMAGE_PIXELS)
        .map(|chunk| chunk.iter().map(|&px| px as f64 / 255.0).collect())
        .collect();
    Ok(Matrix { rows: n_items, cols: IMAGE_PIXELS, data })
}

/// Parses decompressed IDX1 label bytes.
pub fn parse_labels(label_bytes: &[u8]) -> Result<Vec<u8>> {
    if label_bytes.len() < LABEL_HEADER_LEN {
        return Err(NetError::MalformedArchive(format!(
            "label file too short: expected at least {} header bytes, got {}",
            LABEL_HEADER_LEN, label_bytes.len()
        )));
    }
    check_magic(label_bytes, 0x01, "label")?;

    let n_items = be_u32(label_bytes, 4);
    let payload = &label_bytes[LABEL_HEADER_LEN..];
    if payload.len() != n_items {
        return Err(NetError::MalformedArchive(format!(
            "header declares {} labels but payload has {} bytes",
            n_items, payload.len()
        )));
    }
    Ok(payload.to_vec())
}

/// Parses an image/label pair into a `SampleSet`.
pub fn parse_idx_pair(image_bytes: &[u8], label_bytes: &[u8]) -> Result<SampleSet> {
    let images = parse_images(image_bytes)?;
    let labels = parse_labels(label_bytes)?;
    SampleSet::new(images, labels)
}

/// Loads the gzipped training archives from disk.
pub fn load_mnist_gz<P: AsRef<Path>, Q: AsRef<Path>>(images: P, labels: Q) -> Result<SampleSet> {
    let image_bytes = read_gz(&images)?;
    let label_bytes = read_gz(&labels)?;
    let samples = parse_idx_pair(&image_bytes, &label_bytes)?;
    info!(
        "loaded {} samples from {} / {}",
        samples.len(),
        images.as_ref().display(),
        labels.as_ref().display()
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    fn image_file(n: usize) -> Vec<u8> {
        let mut bytes = vec![0x00, 0x00, 0x08, 0x03];
        bytes.extend_from_slice(&(n as u32).to_be_bytes());
        bytes.extend_from_slice(&28u32.to_be_bytes());
        bytes.extend_from_slice(&28u32.to_be_bytes());
        for i in 0..n * IMAGE_PIXELS {
            bytes.push((i % 256) as u8);
        }
        bytes
    }

    fn label_file(labels: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0x00, 0x00, 0x08, 0x01];
        bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        bytes.extend_from_slice(labels);
        bytes
    }

    #[test]
    fn parses_and_normalizes_pixels() {
        let set = parse_idx_pair(&image_file(2), &label_file(&[4, 7])).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.images().shape(), (2, IMAGE_PIXELS));
        assert_eq!(set.images().data[0][255], 1.0);
        assert_eq!(set.images().data[0][0], 0.0);
        assert!(set.images().data.iter().flatten().all(|&x| (0.0..=1.0).contains(&x)));
        assert_eq!(set.labels(), &[4u8, 7]);
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let mut images = image_file(3);
        images.truncate(images.len() - 10);
        assert!(matches!(parse_images(&images), Err(NetError::MalformedArchive(_))));
    }

    #[test]
    fn wrong_magic_is_malformed() {
        let mut labels = label_file(&[1]);
        labels[3] = 0x03;
        assert!(matches!(parse_labels(&labels), Err(NetError::MalformedArchive(_))));
    }

    #[test]
    fn count_mismatch_between_files_is_malformed() {
        let err = parse_idx_pair(&image_file(2), &label_file(&[1, 2, 3])).unwrap_err();
        assert!(matches!(err, NetError::MalformedArchive(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_gz("/definitely/not/here.gz").unwrap_err();
        assert!(matches!(err, NetError::MissingDataFile { .. }));
    }

    #[test]
    fn reads_gzipped_archives() {
        let dir = tempfile::tempdir().unwrap();
        let write_gz = |name: &str, bytes: &[u8]| {
            let path = dir.path().join(name);
            let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
            enc.write_all(bytes).unwrap();
            enc.finish().unwrap();
            path
        };
        let images = write_gz("images.gz", &image_file(3));
        let labels = write_gz("labels.gz", &label_file(&[0, 1, 2]));

        let set = load_mnist_gz(&images, &labels).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.targets().data[2][2], 1.0);
    }
}
