use crate::{
    BorderMode, Effect, ImageEffectError, ImageEffectResult, convolve, raster::Raster,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{DynamicImage, GrayImage};

/// Laplacian sharpening kernel; sums to 1 so flat regions keep their value.
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Sharpen effect configuration
#[derive(Debug, Clone, Default, Setters)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SharpenConfig {
    border: BorderMode,
}

impl SharpenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn border(&self) -> BorderMode {
        self.border
    }
}

impl Effect for SharpenConfig {
    fn apply(&self, image: &DynamicImage) -> ImageEffectResult<DynamicImage> {
        let src = Raster::from_image(image);
        log::debug!(
            "sharpen: border={:?}, {} channel(s)",
            self.border,
            src.channels
        );

        convolve::kernel_3x3(&src, &SHARPEN_KERNEL, self.border).into_image()
    }
}

/// Canny edge detection configuration
///
/// Output is always a single channel image holding 0 or 255.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct EdgeDetectionConfig {
    #[derivative(Default(value = "100.0"))]
    low_threshold: f32,

    #[derivative(Default(value = "200.0"))]
    high_threshold: f32,
}

impl EdgeDetectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thresholds(&self) -> (f32, f32) {
        (self.low_threshold, self.high_threshold)
    }
}

impl Effect for EdgeDetectionConfig {
    fn apply(&self, image: &DynamicImage) -> ImageEffectResult<DynamicImage> {
        self.validate()?;

        let gray = image.to_luma8();
        if gray.width() == 0 || gray.height() == 0 {
            return Ok(DynamicImage::ImageLuma8(GrayImage::new(
                gray.width(),
                gray.height(),
            )));
        }

        log::debug!(
            "canny: low={}, high={}, {}x{}",
            self.low_threshold,
            self.high_threshold,
            gray.width(),
            gray.height()
        );

        let edges = imageproc::edges::canny(&gray, self.low_threshold, self.high_threshold);
        Ok(DynamicImage::ImageLuma8(edges))
    }

    fn validate(&self) -> ImageEffectResult<()> {
        let (low, high) = self.thresholds();

        if !low.is_finite() || !high.is_finite() || low < 0.0 {
            return Err(ImageEffectError::InvalidParameter(format!(
                "canny thresholds must be finite and non-negative, got {low}/{high}"
            )));
        }

        if low > high {
            return Err(ImageEffectError::InvalidParameter(format!(
                "canny low threshold {low} is above high threshold {high}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    fn square(size: u32) -> RgbImage {
        let (lo, hi) = (size / 4, size * 3 / 4);
        RgbImage::from_fn(size, size, |x, y| {
            if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_sharpen_uniform_image_is_unchanged() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(9, 7, Rgb([40, 120, 250])));
        let out = SharpenConfig::new().apply(&rgb).unwrap();
        assert_eq!(out.as_bytes(), rgb.as_bytes());

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 4])));
        let out = SharpenConfig::new()
            .with_border(BorderMode::Replicate)
            .apply(&rgba)
            .unwrap();
        assert_eq!(out.as_bytes(), rgba.as_bytes());
    }

    #[test]
    fn test_sharpen_kernel_values() {
        // Centre 100 surrounded by 50: 5 * 100 - 4 * 50 = 300, saturated.
        let gray = DynamicImage::ImageLuma8(GrayImage::from_fn(3, 3, |x, y| {
            image::Luma([if x == 1 && y == 1 { 100 } else { 50 }])
        }));
        let out = SharpenConfig::new().apply(&gray).unwrap();
        assert_eq!(out.as_bytes()[4], 255);

        // (0,1) reflects its left neighbour onto the centre: 250 - 50 - 50 - 100 - 100 < 0
        assert_eq!(out.as_bytes()[3], 0);
    }

    #[test]
    fn test_sharpen_keeps_channels() {
        let la = DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(6, 5, LumaA([90, 255])));
        let out = SharpenConfig::new().apply(&la).unwrap();
        assert_eq!(out.color().channel_count(), 2);
        assert_eq!((out.width(), out.height()), (6, 5));
    }

    #[test]
    fn test_canny_default_thresholds() {
        assert_eq!(EdgeDetectionConfig::new().thresholds(), (100.0, 200.0));
    }

    #[test]
    fn test_canny_output_is_binary_single_channel() {
        let image = DynamicImage::ImageRgb8(square(32));
        let out = EdgeDetectionConfig::new().apply(&image).unwrap();

        assert_eq!(out.color().channel_count(), 1);
        assert_eq!((out.width(), out.height()), (32, 32));
        assert!(out.as_bytes().iter().all(|v| *v == 0 || *v == 255));
        assert!(out.as_bytes().contains(&255));
    }

    #[test]
    fn test_canny_alpha_input_gives_single_channel() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_fn(32, 32, |x, y| {
            let inside = (8..24).contains(&x) && (8..24).contains(&y);
            if inside {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 128])
            }
        }));
        let out = EdgeDetectionConfig::new().apply(&rgba).unwrap();
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
        assert_eq!((out.width(), out.height()), (32, 32));
        assert!(out.as_bytes().iter().all(|v| *v == 0 || *v == 255));
        assert!(out.as_bytes().contains(&255));

        let la = DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(5, 4, LumaA([70, 255])));
        let out = EdgeDetectionConfig::new().apply(&la).unwrap();
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
        assert_eq!((out.width(), out.height()), (5, 4));
    }

    #[test]
    fn test_canny_flat_image_has_no_edges() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([80, 80, 80])));
        let out = EdgeDetectionConfig::new().apply(&image).unwrap();
        assert!(out.as_bytes().iter().all(|v| *v == 0));
    }

    #[test]
    fn test_canny_rejects_inverted_thresholds() {
        let config = EdgeDetectionConfig::new()
            .with_low_threshold(250.0)
            .with_high_threshold(10.0);
        let image = DynamicImage::ImageRgb8(square(8));
        assert!(matches!(
            config.apply(&image),
            Err(ImageEffectError::InvalidParameter(_))
        ));
    }
}
