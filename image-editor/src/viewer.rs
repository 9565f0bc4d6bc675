//! Blocking presentation of an image.
//!
//! [`Viewer::show`] returns only after the user dismisses the image. It never
//! modifies the image it is given.

use crate::EditorResult;
use image::DynamicImage;

pub trait Viewer {
    fn show(&self, title: &str, image: &DynamicImage) -> EditorResult<()>;
}

/// Logs the image instead of opening a window.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessViewer;

impl Viewer for HeadlessViewer {
    fn show(&self, title: &str, image: &DynamicImage) -> EditorResult<()> {
        log::info!(
            "{title}: {}x{} {:?} (display disabled)",
            image.width(),
            image.height(),
            image.color()
        );
        Ok(())
    }
}

/// A window viewer when `enabled` and the `desktop` feature is on, otherwise headless.
pub fn create(enabled: bool) -> Box<dyn Viewer> {
    match enabled.then(window_viewer).flatten() {
        Some(viewer) => viewer,
        None => Box::new(HeadlessViewer),
    }
}

#[cfg(feature = "desktop")]
fn window_viewer() -> Option<Box<dyn Viewer>> {
    Some(Box::new(WindowViewer))
}

#[cfg(not(feature = "desktop"))]
fn window_viewer() -> Option<Box<dyn Viewer>> {
    log::warn!("built without the desktop feature, images will not be shown");
    None
}

#[cfg(feature = "desktop")]
pub use window::WindowViewer;

#[cfg(feature = "desktop")]
mod window {
    use super::Viewer;
    use crate::{EditorError, EditorResult};
    use image::DynamicImage;
    use slint::{ComponentHandle, PhysicalSize, Rgba8Pixel, SharedPixelBuffer};

    slint::slint! {
        export component ImageWindow inherits Window {
            in property <image> frame;
            in property <string> caption;
            callback dismissed();

            title: root.caption;
            forward-focus: scope;

            scope := FocusScope {
                width: 100%;
                height: 100%;

                key-pressed(event) => {
                    root.dismissed();
                    accept
                }

                Image {
                    width: 100%;
                    height: 100%;
                    source: root.frame;
                    image-fit: contain;
                }
            }
        }
    }

    /// Modal Slint window sized to the image. Any key press closes it.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct WindowViewer;

    impl Viewer for WindowViewer {
        fn show(&self, title: &str, image: &DynamicImage) -> EditorResult<()> {
            let rgba = image.to_rgba8();
            let (width, height) = (rgba.width(), rgba.height());

            let ui = ImageWindow::new().map_err(|e| EditorError::Display(e.to_string()))?;
            let buffer =
                SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(rgba.as_raw(), width, height);
            ui.set_frame(slint::Image::from_rgba8(buffer));
            ui.set_caption(title.into());
            ui.window()
                .set_size(PhysicalSize::new(width.max(1), height.max(1)));

            let ui_weak = ui.as_weak();
            ui.on_dismissed(move || {
                if let Some(ui) = ui_weak.upgrade() {
                    _ = ui.hide();
                }
            });

            log::debug!("show {width}x{height} window, waiting for a key press");
            ui.run().map_err(|e| EditorError::Display(e.to_string()))
        }
    }
}
