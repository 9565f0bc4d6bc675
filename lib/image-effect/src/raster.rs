//! Interleaved 8-bit pixel buffer shared by the convolution filters.

use crate::{ImageEffectError, ImageEffectResult};
use image::{DynamicImage, ImageBuffer};

/// Height x width x channels grid of 8-bit samples, row major, channels interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl Raster {
    /// Converts any decoded image to 8-bit samples, keeping its channel count.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let channels = image.color().channel_count() as usize;

        let data = match channels {
            1 => image.to_luma8().into_raw(),
            2 => image.to_luma_alpha8().into_raw(),
            3 => image.to_rgb8().into_raw(),
            _ => image.to_rgba8().into_raw(),
        };

        Self {
            width,
            height,
            channels: channels.clamp(1, 4),
            data,
        }
    }

    pub fn new(width: u32, height: u32, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width as usize * height as usize * channels],
        }
    }

    pub fn index(&self, x: usize, y: usize, channel: usize) -> usize {
        (y * self.width as usize + x) * self.channels + channel
    }

    pub fn into_image(self) -> ImageEffectResult<DynamicImage> {
        let (width, height, channels) = (self.width, self.height, self.channels);
        let mismatch = || {
            ImageEffectError::ImageProc(format!(
                "buffer of {channels} channel(s) does not match {width}x{height}"
            ))
        };

        let image = match channels {
            1 => DynamicImage::ImageLuma8(
                ImageBuffer::from_raw(width, height, self.data).ok_or_else(mismatch)?,
            ),
            2 => DynamicImage::ImageLumaA8(
                ImageBuffer::from_raw(width, height, self.data).ok_or_else(mismatch)?,
            ),
            3 => DynamicImage::ImageRgb8(
                ImageBuffer::from_raw(width, height, self.data).ok_or_else(mismatch)?,
            ),
            4 => DynamicImage::ImageRgba8(
                ImageBuffer::from_raw(width, height, self.data).ok_or_else(mismatch)?,
            ),
            _ => return Err(mismatch()),
        };

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb};

    #[test]
    fn test_keeps_channel_count() {
        let rgb = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(3, 2, Rgb([1u8, 2, 3])));
        let raster = Raster::from_image(&rgb);
        assert_eq!(raster.channels, 3);
        assert_eq!(raster.data.len(), 3 * 2 * 3);
        assert_eq!(&raster.data[..3], &[1, 2, 3]);

        let back = raster.into_image().unwrap();
        assert_eq!(back.as_bytes(), rgb.as_bytes());
    }

    #[test]
    fn test_sixteen_bit_is_reduced_to_eight() {
        let gray16 = DynamicImage::ImageLuma16(ImageBuffer::from_pixel(2, 2, Luma([u16::MAX])));
        let raster = Raster::from_image(&gray16);
        assert_eq!(raster.channels, 1);
        assert_eq!(raster.data, vec![255; 4]);
    }

    #[test]
    fn test_size_mismatch_is_an_error() {
        let mut raster = Raster::new(4, 4, 3);
        raster.data.pop();
        assert!(matches!(
            raster.into_image(),
            Err(ImageEffectError::ImageProc(_))
        ));
    }

    #[test]
    fn test_index() {
        let raster = Raster::new(4, 3, 2);
        assert_eq!(raster.index(0, 0, 0), 0);
        assert_eq!(raster.index(1, 0, 1), 3);
        assert_eq!(raster.index(0, 1, 0), 8);
    }
}
