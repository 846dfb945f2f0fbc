//! Background image drawn behind all components.

use crate::error::SceneResult;
use image::{DynamicImage, RgbaImage};
use kurbo::{Rect, Size};
use std::path::Path;

/// A raster image placed with its top-left corner at the world origin.
#[derive(Debug, Clone)]
pub struct Background {
    image: RgbaImage,
}

impl Background {
    /// Load a background from a local image file.
    pub fn open(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)?;
        log::debug!(
            "Loaded background {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_image(image))
    }

    /// Decode a background from an in-memory encoded image (PNG, JPEG).
    pub fn from_bytes(data: &[u8]) -> SceneResult<Self> {
        Ok(Self::from_image(image::load_from_memory(data)?))
    }

    /// Wrap an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.into_rgba8(),
        }
    }

    /// Width in pixels (= world units).
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels (= world units).
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Size in world units.
    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    /// Area covered by the background in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.size())
    }

    /// RGBA8 pixel data for rendering.
    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }
}

impl From<RgbaImage> for Background {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use image::Rgba;

    #[test]
    fn test_open_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("background.png");
        RgbaImage::from_pixel(40, 30, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let background = Background::open(&path).unwrap();
        assert_eq!(background.width(), 40);
        assert_eq!(background.height(), 30);
        assert_eq!(background.bounds(), Rect::new(0.0, 0.0, 40.0, 30.0));
        assert_eq!(background.pixels().get_pixel(5, 5), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Background::open(dir.path().join("missing.png"));
        assert!(matches!(result, Err(SceneError::Image(_))));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(matches!(
            Background::from_bytes(b"definitely not an image"),
            Err(SceneError::Image(_))
        ));
    }

    #[test]
    fn test_from_rgba_image() {
        let background = Background::from(RgbaImage::new(8, 2));
        assert_eq!(background.size(), Size::new(8.0, 2.0));
    }
}
