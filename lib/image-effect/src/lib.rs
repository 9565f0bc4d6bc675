pub mod blur_effect;
pub mod border;
pub mod convolve;
pub mod raster;
pub mod stylized_effect;

pub use border::BorderMode;

use image::DynamicImage;

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageEffectError {
    #[error("Image processing error: {0}")]
    ImageProc(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A pure image filter: the input is left untouched and a new image is returned.
pub trait Effect {
    fn apply(&self, image: &DynamicImage) -> ImageEffectResult<DynamicImage>;

    /// Checks the configuration without touching any pixels.
    fn validate(&self) -> ImageEffectResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum ImageEffect {
    GaussianBlur(blur_effect::GaussianBlurConfig),
    Sharpen(stylized_effect::SharpenConfig),
    EdgeDetection(stylized_effect::EdgeDetectionConfig),
}

impl ImageEffect {
    pub fn name(&self) -> &'static str {
        match self {
            ImageEffect::GaussianBlur(_) => "Gaussian Blur",
            ImageEffect::Sharpen(_) => "Sharpen",
            ImageEffect::EdgeDetection(_) => "Edge Detection",
        }
    }
}

impl Effect for ImageEffect {
    fn apply(&self, image: &DynamicImage) -> ImageEffectResult<DynamicImage> {
        log::debug!(
            "apply {} to {}x{} image",
            self.name(),
            image.width(),
            image.height()
        );

        match self {
            ImageEffect::GaussianBlur(config) => config.apply(image),
            ImageEffect::Sharpen(config) => config.apply(image),
            ImageEffect::EdgeDetection(config) => config.apply(image),
        }
    }

    fn validate(&self) -> ImageEffectResult<()> {
        match self {
            ImageEffect::GaussianBlur(config) => config.validate(),
            ImageEffect::Sharpen(config) => config.validate(),
            ImageEffect::EdgeDetection(config) => config.validate(),
        }
    }
}
