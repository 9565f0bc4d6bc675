use crate::{
    EditorError, EditorResult, Operation,
    config::Config,
    viewer::{HeadlessViewer, Viewer},
};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use image_effect::{Effect, ImageEffect};
use log::{debug, info};
use std::{borrow::Cow, path::Path};

/// Holds one source image, the latest processed image, and the fixed
/// operation registry.
pub struct Editor {
    source: Option<DynamicImage>,
    processed: Option<DynamicImage>,
    blur: ImageEffect,
    sharpen: ImageEffect,
    edge_detection: ImageEffect,
    viewer: Box<dyn Viewer>,
    title: String,
}

impl Editor {
    /// Builds the operation registry from `config`. Fails if any filter
    /// parameter is invalid.
    pub fn new(config: &Config, viewer: Box<dyn Viewer>) -> EditorResult<Self> {
        let register = |operation: Operation| -> EditorResult<ImageEffect> {
            let effect = config.effect(operation);
            effect.validate()?;
            debug!("register {operation} -> {effect:?}");
            Ok(effect)
        };

        Ok(Self {
            source: None,
            processed: None,
            blur: register(Operation::Blur)?,
            sharpen: register(Operation::Sharpen)?,
            edge_detection: register(Operation::EdgeDetection)?,
            viewer,
            title: config.display.title.clone(),
        })
    }

    /// Default filters, no window.
    pub fn headless() -> EditorResult<Self> {
        Self::new(&Config::default(), Box::new(HeadlessViewer))
    }

    pub fn source(&self) -> Option<&DynamicImage> {
        self.source.as_ref()
    }

    pub fn processed(&self) -> Option<&DynamicImage> {
        self.processed.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> {
        Operation::all().into_iter()
    }

    fn effect(&self, operation: Operation) -> &ImageEffect {
        match operation {
            Operation::Blur => &self.blur,
            Operation::Sharpen => &self.sharpen,
            Operation::EdgeDetection => &self.edge_detection,
        }
    }

    /// Decodes `path` into the source slot, copies it to the processed slot
    /// and shows it.
    pub fn load(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let image = decode(path).map_err(|source| EditorError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "loaded {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );

        let shown = self.display(&image);
        self.processed = Some(image.clone());
        self.source = Some(image);
        shown
    }

    /// Runs `operation` on the source image, stores the result and shows it.
    pub fn apply(&mut self, operation: Operation) -> EditorResult<()> {
        let source = self.source.as_ref().ok_or(EditorError::NoImageLoaded)?;
        let processed = self.effect(operation).apply(source)?;
        info!(
            "applied {operation}: {}x{} {:?}",
            processed.width(),
            processed.height(),
            processed.color()
        );

        let shown = self.display(&processed);
        self.processed = Some(processed);
        shown
    }

    /// Like [`apply`](Self::apply) for free-form input. Unknown names fail
    /// before any state is touched.
    pub fn apply_named(&mut self, name: &str) -> EditorResult<()> {
        let operation = name.parse::<Operation>()?;
        self.apply(operation)
    }

    /// Encodes the processed image to `path`, format taken from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let image = self.processed.as_ref().ok_or(EditorError::NothingToSave)?;

        let save_error = |source: ImageError| EditorError::Save {
            path: path.to_path_buf(),
            source,
        };

        let format = ImageFormat::from_path(path).map_err(save_error)?;
        encodable(image, format)
            .save_with_format(path, format)
            .map_err(save_error)?;

        info!("saved {} as {format:?}", path.display());
        Ok(())
    }

    /// Blocks until the viewer is dismissed. Never touches the stored images.
    pub fn display(&self, image: &DynamicImage) -> EditorResult<()> {
        self.viewer.show(&self.title, image)
    }
}

fn decode(path: &Path) -> Result<DynamicImage, ImageError> {
    ImageReader::open(path)
        .map_err(ImageError::IoError)?
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()
}

// JPEG holds neither alpha nor 16-bit samples. GIF only takes 8-bit RGB(A).
fn encodable(image: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    let has_alpha = image.color().has_alpha();

    match (format, image) {
        (ImageFormat::Jpeg, DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_)) => {
            Cow::Borrowed(image)
        }
        (ImageFormat::Jpeg, _) if image.color().channel_count() <= 2 => {
            Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8()))
        }
        (ImageFormat::Jpeg, _) => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        (ImageFormat::Gif, DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => {
            Cow::Borrowed(image)
        }
        (ImageFormat::Gif, _) if has_alpha => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        (ImageFormat::Gif, _) => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
        _ => Cow::Borrowed(image),
    }
}
