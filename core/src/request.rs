//! Option and request types shared by every component

use std::fmt;
use std::path::{Path, PathBuf};

use qrcode::EcLevel;

use crate::color::Rgba;

/// Output encoding of a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG raster
    Raster,
    /// SVG markup
    Vector,
}

impl OutputFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Raster => "png",
            OutputFormat::Vector => "svg",
        }
    }

    /// Parse a `--format` value (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Raster),
            "svg" => Some(OutputFormat::Vector),
            _ => None,
        }
    }

    /// Format implied by a path's extension, if recognized
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Shape of the light backing drawn behind a logo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoBacking {
    #[default]
    Square,
    Circle,
}

impl LogoBacking {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "square" => Some(LogoBacking::Square),
            "circle" => Some(LogoBacking::Circle),
            _ => None,
        }
    }
}

/// Option values exactly as supplied on the command line.
///
/// Numbers and colors are kept as strings so that validation can report
/// unparsable input alongside out-of-range input.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub data: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub size: String,
    pub color: String,
    pub background: String,
    pub margin: String,
    pub logo: Option<String>,
    pub logo_size: String,
    pub logo_backing: Option<String>,
    pub batch: Option<String>,
    pub html: bool,
    pub img: bool,
}

impl RawOptions {
    pub fn is_batch(&self) -> bool {
        self.batch.is_some()
    }

    /// Logo path, ignoring an empty string
    pub fn logo_path(&self) -> Option<&str> {
        self.logo.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Everything needed to render one QR code.
///
/// Built fresh per item by [`crate::builder::build_request`] and not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub data: String,
    pub format: OutputFormat,
    pub pixel_width: u32,
    pub margin: u32,
    pub dark: Rgba,
    pub light: Rgba,
    pub ec_level: EcLevel,
    pub logo_path: Option<PathBuf>,
    /// Logo edge as a fraction of the QR edge, within [0.05, 0.40]
    pub logo_size_fraction: f32,
    pub logo_backing: LogoBacking,
}

impl GenerationRequest {
    /// Copy of this request carrying a different payload
    pub fn with_data(&self, data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..self.clone()
        }
    }

    /// Copy of this request with a different output format.
    ///
    /// Switching to vector drops the logo.
    pub fn with_format(&self, format: OutputFormat) -> Self {
        let logo_path = match format {
            OutputFormat::Raster => self.logo_path.clone(),
            OutputFormat::Vector => None,
        };
        Self {
            format,
            logo_path,
            ..self.clone()
        }
    }
}
