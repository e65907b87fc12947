//! PNG export with transparency and a physical resolution chunk

use crate::io::configuration::OUTPUT_DPI;
use crate::io::error::{PlotError, Result};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::path::Path;

const PNG_SIGNATURE_LEN: usize = 8;
// Length, type, 13 data bytes and CRC of the IHDR chunk
const IHDR_CHUNK_LEN: usize = 4 + 4 + 13 + 4;
const INCHES_PER_METRE: f64 = 39.370_078_740_157_48;

/// Pixels per metre stored in the `pHYs` chunk for a resolution in DPI
pub fn pixels_per_metre(dpi: u32) -> u32 {
    (f64::from(dpi) * INCHES_PER_METRE).round() as u32
}

/// Encode an RGBA image as PNG bytes tagged with `OUTPUT_DPI`
///
/// The encoder writes no timestamps, so equal images give equal bytes.
///
/// # Errors
///
/// Returns an error if the encoder rejects the image
pub fn encode_png(image: &RgbaImage, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| PlotError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })?;

    let ppm = pixels_per_metre(OUTPUT_DPI);
    let mut data = Vec::with_capacity(9);
    data.extend_from_slice(&ppm.to_be_bytes());
    data.extend_from_slice(&ppm.to_be_bytes());
    // Unit specifier: metre
    data.push(1);

    let at = (PNG_SIGNATURE_LEN + IHDR_CHUNK_LEN).min(bytes.len());
    let tail = bytes.split_off(at);
    write_chunk(&mut bytes, *b"pHYs", &data);
    bytes.extend_from_slice(&tail);
    Ok(bytes)
}

fn write_chunk(out: &mut Vec<u8>, chunk_type: [u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&chunk_type);
    out.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&chunk_type);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Write an RGBA image to `path` as PNG, replacing any existing file
///
/// # Errors
///
/// Returns an error if:
/// - The image cannot be encoded
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let bytes = encode_png(image, path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PlotError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(path, bytes).map_err(|e| PlotError::FileSystem {
        path: path.to_path_buf(),
        operation: "write plot",
        source: e,
    })
}
