//! Qrcraft Core - styled QR code generation
//!
//! This library validates generation options, builds encoder parameters,
//! renders QR codes as PNG, SVG or inline markup, overlays center logos and
//! processes line-delimited batch files.

pub mod batch;
pub mod builder;
pub mod color;
pub mod constants;
pub mod encoder;
pub mod generate;
pub mod logo;
pub mod paths;
pub mod request;
pub mod validate;

mod error;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use error::{Error, Result};

/// Flag defaults that the config file may override
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub size: String,
    pub margin: String,
    pub color: String,
    pub background: String,
    pub logo_size: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            size: constants::DEFAULT_SIZE.to_string(),
            margin: constants::DEFAULT_MARGIN.to_string(),
            color: constants::DEFAULT_COLOR.to_string(),
            background: constants::DEFAULT_BACKGROUND.to_string(),
            logo_size: constants::DEFAULT_LOGO_PERCENT.to_string(),
        }
    }
}

/// On-disk config file layout. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    export_dir: Option<PathBuf>,
    size: Option<u32>,
    margin: Option<i64>,
    color: Option<String>,
    background: Option<String>,
    logo_size: Option<f32>,
}

/// Runtime configuration, built once at startup and passed down
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for generated files
    pub export_dir: PathBuf,
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: dirs_home().join(constants::APP_DIR).join(constants::EXPORT_SUBDIR),
            defaults: Defaults::default(),
        }
    }
}

impl Config {
    /// Config rooted at a specific export directory
    pub fn with_export_dir(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            defaults: Defaults::default(),
        }
    }

    /// Load from the environment and the optional config file.
    ///
    /// Precedence for the export directory: `QRCRAFT_EXPORT_DIR`, then the
    /// config file, then `~/.qrcraft/exports`.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(constants::CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);

        let mut config = if path.is_file() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Some(dir) = std::env::var_os(constants::EXPORT_DIR_ENV).filter(|d| !d.is_empty()) {
            config.export_dir = PathBuf::from(dir);
        }

        tracing::debug!(?config, "loaded config");
        Ok(config)
    }

    /// Parse a JSON config file on top of the built-in defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_config_file(file))
    }

    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Config::default();
        if let Some(dir) = file.export_dir {
            config.export_dir = dir;
        }
        if let Some(size) = file.size {
            config.defaults.size = size.to_string();
        }
        if let Some(margin) = file.margin {
            config.defaults.margin = margin.to_string();
        }
        if let Some(color) = file.color {
            config.defaults.color = color;
        }
        if let Some(background) = file.background {
            config.defaults.background = background;
        }
        if let Some(logo_size) = file.logo_size {
            config.defaults.logo_size = logo_size.to_string();
        }
        config
    }
}

fn dirs_home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_config_path() -> PathBuf {
    dirs_home().join(constants::APP_DIR).join(constants::CONFIG_FILE)
}

// Re-export key types for convenience
pub use batch::{BatchEvent, BatchJob, BatchResult, ItemOutcome};
pub use builder::{EncoderOptions, PreviewOptions};
pub use color::Rgba;
pub use request::{GenerationRequest, LogoBacking, OutputFormat, RawOptions};
pub use validate::{validate, ValidationResult};
