use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::GenericImageView;
use tracing::debug;

use crate::error::{DiagError, Result};
use diagelec_common::ImagePayload;

const JPEG_QUALITY: u8 = 85;

/// Lit une photo et la prépare pour l'analyse
pub fn load_image(path: &Path, max_size: u32) -> Result<ImagePayload> {
    if !path.is_file() {
        return Err(DiagError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    encode_image_bytes(&bytes, max_size)
        .map_err(|e| DiagError::ImageLoad(format!("{}: {}", path.display(), e)))
}

/// Décode, réduit au besoin (côté le plus long <= `max_size`) puis
/// réencode en JPEG base64
pub fn encode_image_bytes(bytes: &[u8], max_size: u32) -> std::result::Result<ImagePayload, String> {
    let image = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let (width, height) = image.dimensions();

    let image = if max_size > 0 && width.max(height) > max_size {
        debug!(width, height, max_size, "Réduction de l'image");
        image.thumbnail(max_size, max_size)
    } else {
        image
    };

    let rgb = image.to_rgb8();
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| e.to_string())?;

    ImagePayload::new("image/jpeg", STANDARD.encode(buffer.into_inner()))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn decoded_dimensions(payload: &ImagePayload) -> (u32, u32) {
        let raw = STANDARD.decode(&payload.data).unwrap();
        image::load_from_memory(&raw).unwrap().dimensions()
    }

    #[test]
    fn test_small_image_keeps_size() {
        let payload = encode_image_bytes(&png_bytes(40, 20), 1568).unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(decoded_dimensions(&payload), (40, 20));
    }

    #[test]
    fn test_large_image_is_downscaled() {
        let payload = encode_image_bytes(&png_bytes(400, 200), 100).unwrap();
        let (w, h) = decoded_dimensions(&payload);
        assert!(w <= 100 && h <= 100);
        assert_eq!(w, 100);
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        assert!(encode_image_bytes(b"pas une image", 1568).is_err());
    }

    #[test]
    fn test_load_image_missing_file() {
        let result = load_image(Path::new("/nonexistent/photo.jpg"), 1568);
        assert!(matches!(result, Err(DiagError::FileNotFound(_))));
    }
}
