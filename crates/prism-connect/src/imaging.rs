//! Image request encoding and decoding of returned buffers

use crate::error::{ClientError, Result};
use image::DynamicImage;
use serde::Serialize;
use std::fmt;

/// Encoder parameter ids understood by the image services (OpenCV `imwrite` flags).
pub const IMWRITE_JPEG_QUALITY: i32 = 1;
pub const IMWRITE_PNG_COMPRESSION: i32 = 16;
pub const IMWRITE_WEBP_QUALITY: i32 = 64;

/// JPEG quality used when the caller does not pick an encoding.
pub const DEFAULT_JPEG_QUALITY: i32 = 80;

/// Output format the service should encode the image with.
///
/// `params` is a flat list of `(flag, value)` pairs passed through to the
/// service's encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEncoding {
    pub format: String,
    pub params: Vec<i32>,
}

impl ImageEncoding {
    pub fn new(format: impl Into<String>, params: Vec<i32>) -> Self {
        Self {
            format: format.into(),
            params,
        }
    }

    /// Lossy JPEG, quality 0-100.
    pub fn jpeg(quality: u8) -> Self {
        Self::new(".jpg", vec![IMWRITE_JPEG_QUALITY, i32::from(quality.min(100))])
    }

    /// Lossless PNG, compression level 0-9.
    pub fn png(compression: u8) -> Self {
        Self::new(".png", vec![IMWRITE_PNG_COMPRESSION, i32::from(compression.min(9))])
    }

    /// WebP, quality 1-100 (above 100 is lossless).
    pub fn webp(quality: u8) -> Self {
        Self::new(".webp", vec![IMWRITE_WEBP_QUALITY, i32::from(quality)])
    }
}

impl Default for ImageEncoding {
    fn default() -> Self {
        Self::new(".jpg", vec![IMWRITE_JPEG_QUALITY, DEFAULT_JPEG_QUALITY])
    }
}

/// Encoded image bytes as returned by a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub image_id: i64,
    pub buffer: Vec<u8>,
}

impl ImageBuffer {
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Decode the buffer as a 3-channel color image.
    pub fn decode(self) -> Result<DecodedImage> {
        if self.buffer.is_empty() {
            return Err(ClientError::EmptyImage(self.image_id));
        }

        let image = image::load_from_memory(&self.buffer).map_err(|source| ClientError::Decode {
            image_id: self.image_id,
            source,
        })?;

        Ok(DecodedImage {
            image_id: self.image_id,
            image: DynamicImage::ImageRgb8(image.to_rgb8()),
        })
    }
}

/// A decoded frame together with the id the service reported for it.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image_id: i64,
    pub image: DynamicImage,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Dimensions of a stored image, fetched without its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub width: i32,
    pub height: i32,
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    /// Small PNG used by the client tests as a service payload.
    pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 10]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .expect("encode sample png");
        buf.into_inner()
    }

    #[test]
    fn test_default_encoding_is_jpeg_80() {
        let encoding = ImageEncoding::default();
        assert_eq!(encoding.format, ".jpg");
        assert_eq!(encoding.params, vec![IMWRITE_JPEG_QUALITY, 80]);
    }

    #[test]
    fn test_default_encoding_is_fresh_per_call() {
        let mut first = ImageEncoding::default();
        first.params.push(IMWRITE_PNG_COMPRESSION);

        assert_eq!(ImageEncoding::default().params.len(), 2);
    }

    #[test]
    fn test_encoding_helpers_clamp() {
        assert_eq!(ImageEncoding::jpeg(150).params, vec![IMWRITE_JPEG_QUALITY, 100]);
        assert_eq!(ImageEncoding::png(12).params, vec![IMWRITE_PNG_COMPRESSION, 9]);
        assert_eq!(ImageEncoding::webp(90).format, ".webp");
    }

    #[test]
    fn test_decode_png_buffer() {
        let buffer = ImageBuffer {
            image_id: 12,
            buffer: sample_png(4, 3),
        };

        let decoded = buffer.decode().unwrap();
        assert_eq!(decoded.image_id, 12);
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
        assert_eq!(decoded.image.to_rgb8().get_pixel(0, 0), &Rgb([200, 40, 10]));
    }

    #[test]
    fn test_decode_empty_buffer() {
        let buffer = ImageBuffer {
            image_id: 5,
            buffer: Vec::new(),
        };

        assert!(matches!(buffer.decode(), Err(ClientError::EmptyImage(5))));
    }

    #[test]
    fn test_decode_garbage_buffer() {
        let buffer = ImageBuffer {
            image_id: 6,
            buffer: vec![0x00, 0x01, 0x02, 0x03],
        };

        assert!(matches!(
            buffer.decode(),
            Err(ClientError::Decode { image_id: 6, .. })
        ));
    }

    #[test]
    fn test_size_display() {
        let size = ImageSize {
            width: 1920,
            height: 1080,
        };
        assert_eq!(size.to_string(), "1920x1080");
    }
}
