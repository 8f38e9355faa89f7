//! An RGBA pixel buffer with PNG export.

use std::io::Cursor;
use std::path::Path;

use hashbrown::HashSet;

/// Largest width or height, in pixels, a [`DebugImage`] may have.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Failure building a [`DebugImage`] or writing it to PNG.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The requested image exceeds [`MAX_IMAGE_SIDE`] on some axis.
    #[error("image of {width}x{height} pixels exceeds the {max} pixel limit", max = MAX_IMAGE_SIDE)]
    TooLarge {
        /// Requested width in pixels.
        width: u64,
        /// Requested height in pixels.
        height: u64,
    },

    /// The PNG encoder rejected the image.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    /// The file could not be written.
    #[error("failed to write image file: {0}")]
    Io(#[from] std::io::Error),
}

/// A 2D debug image stored as row-major RGBA pixels, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new transparent black image.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::TooLarge`] if either side exceeds [`MAX_IMAGE_SIDE`].
    pub fn new(width: u32, height: u32) -> Result<Self, ExportError> {
        if width > MAX_IMAGE_SIDE || height > MAX_IMAGE_SIDE {
            return Err(ExportError::TooLarge {
                width: width.into(),
                height: height.into(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Create an image filled with one opaque color.
    ///
    /// # Errors
    ///
    /// Same as [`DebugImage::new`].
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, ExportError> {
        let mut image = Self::new(width, height)?;
        for px in image.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Ok(image)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    /// Set one pixel. Writes outside the image are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&rgba);
        }
    }

    /// Read one pixel, or `None` outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(rgba)
    }

    /// Fill an axis-aligned rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, rgba: [u8; 4]) {
        for py in y..y.saturating_add(h).min(self.height) {
            for px in x..x.saturating_add(w).min(self.width) {
                self.set_pixel(px, py, rgba);
            }
        }
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of distinct RGB colors, alpha ignored.
    pub fn unique_color_count(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|px| (px[0], px[1], px[2]))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Encode as an 8-bit RGBA PNG.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Encode`] if the encoder fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(Cursor::new(&mut buf), self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
            writer.finish()?;
        }
        Ok(buf)
    }

    /// Encode as PNG and write to `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if encoding or writing fails.
    pub fn save_png(&self, path: &Path) -> Result<(), ExportError> {
        let bytes = self.to_png_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
