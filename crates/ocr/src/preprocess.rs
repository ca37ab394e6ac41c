use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Contrast gain applied around mid-gray. Chosen empirically: glyphs on card
/// photographs separate from the background well before the midtones clip.
const CONTRAST_FACTOR: f32 = 2.0;

/// Process raw image bytes (JPEG / PNG) and return normalized PNG bytes
/// ready for OCR.
pub fn prepare_for_ocr_from_bytes(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    encode_as_png(normalize(img))
}

/// Grayscale + fixed contrast stretch. Deliberately cheap and deterministic:
/// no thresholding, no deskew, no denoising.
fn normalize(img: DynamicImage) -> DynamicImage {
    let gray: GrayImage = img.to_luma8();

    let stretched: GrayImage = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([stretch(gray.get_pixel(x, y)[0])])
    });

    DynamicImage::ImageLuma8(stretched)
}

fn stretch(px: u8) -> u8 {
    ((px as f32 - 128.0) * CONTRAST_FACTOR + 128.0)
        .round()
        .clamp(0.0, 255.0) as u8
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
