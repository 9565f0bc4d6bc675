use crate::{
    BorderMode, Effect, ImageEffectError, ImageEffectResult, convolve, raster::Raster,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::DynamicImage;

/// Binomial kernels used when sigma is derived from a small kernel size.
const SMALL_GAUSSIAN_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// Largest kernel, given or derived from sigma, that a blur accepts.
pub const MAX_KERNEL_SIZE: u32 = 1023;

/// Gaussian blur configuration
///
/// `kernel_size` must be odd. A `sigma` of zero or less is derived from the
/// kernel size. A `kernel_size` of zero is derived from a positive `sigma`.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GaussianBlurConfig {
    #[derivative(Default(value = "5"))]
    kernel_size: u32,

    #[derivative(Default(value = "0.0"))]
    sigma: f32,

    border: BorderMode,
}

impl GaussianBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kernel_size(&self) -> u32 {
        self.kernel_size
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn border(&self) -> BorderMode {
        self.border
    }

    // Only meaningful once the config has been validated.
    fn size(&self) -> u32 {
        if self.kernel_size == 0 {
            ((self.sigma * 6.0 + 1.0).round() as u32) | 1
        } else {
            self.kernel_size
        }
    }

    /// Builds the normalized 1-D kernel applied along both axes.
    pub fn kernel(&self) -> ImageEffectResult<Vec<f32>> {
        self.validate()?;

        let size = self.size();

        if self.sigma <= 0.0 && size <= 7 {
            return Ok(SMALL_GAUSSIAN_KERNELS[(size / 2) as usize].to_vec());
        }

        let sigma = if self.sigma > 0.0 {
            self.sigma
        } else {
            0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
        };

        let center = (size / 2) as f32;
        let scale = -0.5 / (sigma * sigma);
        let mut kernel: Vec<f32> = (0..size)
            .map(|i| {
                let x = i as f32 - center;
                (scale * x * x).exp()
            })
            .collect();

        let sum: f32 = kernel.iter().sum();
        kernel.iter_mut().for_each(|w| *w /= sum);

        log::trace!("gaussian kernel size={size} sigma={sigma}: {kernel:?}");
        Ok(kernel)
    }
}

impl Effect for GaussianBlurConfig {
    fn apply(&self, image: &DynamicImage) -> ImageEffectResult<DynamicImage> {
        let kernel = self.kernel()?;
        let src = Raster::from_image(image);

        log::debug!(
            "gaussian blur: {} tap(s), sigma={}, border={:?}, {} channel(s)",
            kernel.len(),
            self.sigma,
            self.border,
            src.channels
        );

        convolve::separable(&src, &kernel, &kernel, self.border).into_image()
    }

    fn validate(&self) -> ImageEffectResult<()> {
        if !self.sigma.is_finite() {
            return Err(ImageEffectError::InvalidParameter(format!(
                "blur sigma must be finite, got {}",
                self.sigma
            )));
        }

        if self.kernel_size == 0 && self.sigma <= 0.0 {
            return Err(ImageEffectError::InvalidParameter(
                "blur needs a kernel size or a positive sigma".to_string(),
            ));
        }

        let derived_size = (self.sigma * 6.0 + 1.0).round();
        if self.kernel_size == 0 && derived_size > MAX_KERNEL_SIZE as f32 {
            return Err(ImageEffectError::InvalidParameter(format!(
                "blur sigma {} needs a kernel wider than {MAX_KERNEL_SIZE}",
                self.sigma
            )));
        }

        if self.kernel_size > MAX_KERNEL_SIZE {
            return Err(ImageEffectError::InvalidParameter(format!(
                "blur kernel size must be at most {MAX_KERNEL_SIZE}, got {}",
                self.kernel_size
            )));
        }

        if self.kernel_size != 0 && self.kernel_size % 2 == 0 {
            return Err(ImageEffectError::InvalidParameter(format!(
                "blur kernel size must be odd, got {}",
                self.kernel_size
            )));
        }

        Ok(())
    }
}
