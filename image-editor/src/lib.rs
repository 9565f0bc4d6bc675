//! Minimal image editor
//!
//! Loads one image, applies one of three filters (`blur`, `sharpen`,
//! `edge_detection`), shows the result and saves it.
//!
//! # Architecture
//! - [`editor::Editor`]: source/processed image slots and the operation registry
//! - [`operation::Operation`]: the fixed set of operation names
//! - [`viewer`]: blocking display of an image (Slint window or headless)
//! - [`config`]: TOML configuration for filter parameters and display
//! - [`cli`]: interactive prompts and command line flags

use std::path::PathBuf;

pub mod cli;
pub mod config;
pub mod editor;
pub mod operation;
pub mod viewer;

pub use editor::Editor;
pub use operation::Operation;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    #[error("Could not load image {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid operation: {0:?}")]
    InvalidOperation(String),
    #[error("No image loaded")]
    NoImageLoaded,
    #[error("No processed image to save")]
    NothingToSave,
    #[error("Could not save image {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Display error: {0}")]
    Display(String),
    #[error("Effect error: {0}")]
    Effect(#[from] image_effect::ImageEffectError),
}

/// Initializes the logger.
///
/// Format: `[HH:MM:SS LEVEL file line] message`. Defaults to `info`,
/// `RUST_LOG` overrides it.
pub fn init_logger() {
    use std::io::Write;

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
