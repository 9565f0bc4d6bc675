use crate::Operation;
use anyhow::{Context, Result};
use derivative::Derivative;
use image_effect::{
    BorderMode, ImageEffect,
    blur_effect::GaussianBlurConfig,
    stylized_effect::{EdgeDetectionConfig, SharpenConfig},
};
use log::{debug, warn};
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const APP_NAME: &str = "image-editor";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    pub blur: Blur,
    pub sharpen: Sharpen,
    pub edge_detection: EdgeDetection,
    pub display: Preview,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Blur {
    #[derivative(Default(value = "5"))]
    pub kernel_size: u32,

    // <= 0 derives sigma from kernel_size
    pub sigma: f32,

    pub border: BorderMode,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Sharpen {
    pub border: BorderMode,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct EdgeDetection {
    #[derivative(Default(value = "100.0"))]
    pub low_threshold: f32,

    #[derivative(Default(value = "200.0"))]
    pub high_threshold: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Preview {
    #[derivative(Default(value = "true"))]
    pub enabled: bool,

    #[derivative(Default(value = "\"Image Editor\".to_string()"))]
    pub title: String,
}

impl Config {
    /// Loads the configuration
    ///
    /// An explicit `path` must exist and parse. Without one, the file in the
    /// platform config directory is used and created with defaults if missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match AppDirs::new(Some(APP_NAME), true) {
                Some(app_dirs) => {
                    let path = app_dirs.config_dir.join(format!("{APP_NAME}.toml"));
                    Ok(Self::load_or_init(&path))
                }
                None => {
                    warn!("no config directory available, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {} failed", path.display()))?;

        let mut config = Self::parse(&text)
            .with_context(|| format!("parse config file {} failed", path.display()))?;
        config.config_path = path.to_path_buf();

        debug!("{config:?}");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str::<Config>(text)?)
    }

    /// Reads `path`, falling back to defaults and rewriting the file when it
    /// is missing or broken. A broken file is kept as `<path>.bak`.
    pub fn load_or_init(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(text) => match Self::parse(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("invalid config file {}: {e:?}", path.display());

                    let mut backup = path.as_os_str().to_owned();
                    backup.push(".bak");
                    _ = fs::copy(path, &backup);

                    Self::first_run(path)
                }
            },
            Err(_) => Self::first_run(path),
        };

        config.config_path = path.to_path_buf();
        debug!("{config:?}");
        config
    }

    fn first_run(path: &Path) -> Self {
        let config = Self {
            is_first_run: true,
            ..Default::default()
        };

        if let Err(e) = config.save_to(path) {
            warn!("write default config {} failed: {e:?}", path.display());
        }

        config
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// The filter registered for `operation` under this configuration.
    pub fn effect(&self, operation: Operation) -> ImageEffect {
        match operation {
            Operation::Blur => ImageEffect::GaussianBlur(
                GaussianBlurConfig::new()
                    .with_kernel_size(self.blur.kernel_size)
                    .with_sigma(self.blur.sigma)
                    .with_border(self.blur.border),
            ),
            Operation::Sharpen => {
                ImageEffect::Sharpen(SharpenConfig::new().with_border(self.sharpen.border))
            }
            Operation::EdgeDetection => ImageEffect::EdgeDetection(
                EdgeDetectionConfig::new()
                    .with_low_threshold(self.edge_detection.low_threshold)
                    .with_high_threshold(self.edge_detection.high_threshold),
            ),
        }
    }
}
