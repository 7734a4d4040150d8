//! Vertical gradient background rendering.
//!
//! The background shared by every slide is a raster whose rows blend
//! linearly from a top color to a bottom color. Rendering is pure and
//! deterministic; writing encodes the buffer in the format implied by the
//! output path's extension.
use crate::common::RGBColor;
use crate::error::{Error, Result};
use image::{ImageError, Rgb, RgbImage};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of a vertical gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientSpec {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color of row 0
    pub top: RGBColor,
    /// Color of the last row
    pub bottom: RGBColor,
}

impl Default for GradientSpec {
    /// Full-HD dark navy gradient.
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            top: RGBColor::new(10, 15, 25),
            bottom: RGBColor::new(5, 35, 70),
        }
    }
}

impl GradientSpec {
    pub fn new(width: u32, height: u32, top: RGBColor, bottom: RGBColor) -> Self {
        Self {
            width,
            height,
            top,
            bottom,
        }
    }

    /// Blend factor for row `y`: `y / (height - 1)`, or 0 for a single row.
    #[inline]
    pub fn blend_factor(&self, y: u32) -> f64 {
        if self.height <= 1 {
            0.0
        } else {
            y as f64 / (self.height - 1) as f64
        }
    }

    /// Color every pixel of row `y` receives.
    #[inline]
    pub fn row_color(&self, y: u32) -> RGBColor {
        self.top.lerp(self.bottom, self.blend_factor(y))
    }

    /// Render the gradient into an in-memory RGB buffer.
    pub fn render(&self) -> Result<RgbImage> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let mut img = RgbImage::new(self.width, self.height);
        for (y, row) in img.rows_mut().enumerate() {
            let color = Rgb(self.row_color(y as u32).to_array());
            for pixel in row {
                *pixel = color;
            }
        }
        Ok(img)
    }

    /// Render and write the gradient to `path`, replacing any existing file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let img = self.render()?;
        img.save(path).map_err(|e| match e {
            ImageError::IoError(io) => Error::io(path, io),
            other => Error::Image(other),
        })?;
        debug!(
            "wrote {}x{} gradient {} -> {} to {}",
            self.width,
            self.height,
            self.top,
            self.bottom,
            path.display()
        );
        Ok(())
    }
}

/// Render a vertical gradient and write it to `path`.
pub fn make_vertical_gradient(
    width: u32,
    height: u32,
    top: RGBColor,
    bottom: RGBColor,
    path: impl AsRef<Path>,
) -> Result<()> {
    GradientSpec::new(width, height, top, bottom).write(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rgb_strategy() -> impl Strategy<Value = RGBColor> {
        any::<[u8; 3]>().prop_map(RGBColor::from)
    }

    fn pixel(img: &RgbImage, x: u32, y: u32) -> RGBColor {
        RGBColor::from(img.get_pixel(x, y).0)
    }

    #[test]
    fn test_default_endpoints() {
        let spec = GradientSpec::default();
        let img = spec.render().unwrap();
        assert_eq!(img.dimensions(), (1920, 1080));
        assert_eq!(pixel(&img, 0, 0), RGBColor::new(10, 15, 25));
        assert_eq!(pixel(&img, 1919, 1079), RGBColor::new(5, 35, 70));
    }

    #[test]
    fn test_single_row_uses_top_color() {
        let spec = GradientSpec::new(4, 1, RGBColor::WHITE, RGBColor::BLACK);
        let img = spec.render().unwrap();
        for x in 0..4 {
            assert_eq!(pixel(&img, x, 0), RGBColor::WHITE);
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let spec = GradientSpec::new(0, 10, RGBColor::WHITE, RGBColor::BLACK);
        assert!(matches!(
            spec.render(),
            Err(Error::InvalidDimensions { width: 0, height: 10 })
        ));
        let spec = GradientSpec::new(10, 0, RGBColor::WHITE, RGBColor::BLACK);
        assert!(spec.render().is_err());
    }

    #[test]
    fn test_write_is_byte_identical_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        let spec = GradientSpec::new(64, 48, RGBColor::new(10, 15, 25), RGBColor::new(5, 35, 70));
        spec.write(&a).unwrap();
        spec.write(&b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());

        let decoded = image::open(&a).unwrap().to_rgb8();
        assert_eq!(decoded, spec.render().unwrap());
    }

    #[test]
    fn test_make_vertical_gradient_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bb_gradient_bg.png");
        make_vertical_gradient(32, 18, RGBColor::new(10, 15, 25), RGBColor::new(5, 35, 70), &path)
            .unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (32, 18));
        assert_eq!(pixel(&img, 31, 17), RGBColor::new(5, 35, 70));
    }

    #[test]
    fn test_write_to_missing_directory_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("bg.png");
        let err = GradientSpec::default().write(&path).unwrap_err();
        assert!(err.to_string().contains("bg.png"), "{err}");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_rows_are_uniform_and_endpoints_exact(
            width in 1u32..24,
            height in 2u32..48,
            top in rgb_strategy(),
            bottom in rgb_strategy(),
        ) {
            let img = GradientSpec::new(width, height, top, bottom).render().unwrap();

            for x in 0..width {
                prop_assert_eq!(pixel(&img, x, 0), top);
                prop_assert_eq!(pixel(&img, x, height - 1), bottom);
            }
            for y in 0..height {
                let first = pixel(&img, 0, y);
                for x in 1..width {
                    prop_assert_eq!(pixel(&img, x, y), first);
                }
            }
        }

        #[test]
        fn prop_channels_move_monotonically(
            height in 2u32..64,
            top in rgb_strategy(),
            bottom in rgb_strategy(),
        ) {
            let img = GradientSpec::new(1, height, top, bottom).render().unwrap();
            let column: Vec<[u8; 3]> = (0..height).map(|y| img.get_pixel(0, y).0).collect();

            for c in 0..3 {
                let rising = bottom.to_array()[c] >= top.to_array()[c];
                for pair in column.windows(2) {
                    if rising {
                        prop_assert!(pair[0][c] <= pair[1][c]);
                    } else {
                        prop_assert!(pair[0][c] >= pair[1][c]);
                    }
                }
            }
        }
    }
}
