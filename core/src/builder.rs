//! Maps validated options into encoder and preview parameters

use std::path::{Path, PathBuf};

use qrcode::EcLevel;

use crate::color::{normalize, Rgba};
use crate::constants::{MAX_LOGO_PERCENT, MIN_LOGO_PERCENT, PREVIEW_MARGIN};
use crate::request::{GenerationRequest, LogoBacking, OutputFormat, RawOptions};
use crate::validate::{parse_logo_percent, parse_margin, parse_size};
use crate::{Error, Result};

/// Error-correction level used when no logo is requested
pub const DEFAULT_EC_LEVEL: EcLevel = EcLevel::M;

/// Parameters handed to the QR encoder for file output
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderOptions {
    pub ec_level: EcLevel,
    pub margin: u32,
    pub width: u32,
    pub dark: Rgba,
    pub light: Rgba,
}

/// Parameters for the interactive terminal preview.
///
/// Never used for anything written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOptions {
    /// Render two module rows per text line
    pub compact: bool,
    pub margin: u32,
    pub ec_level: EcLevel,
}

/// `H` whenever a logo is requested, otherwise the default level.
///
/// A logo hides central modules, and only the highest redundancy keeps
/// the symbol decodable.
pub fn select_ec_level(has_logo: bool) -> EcLevel {
    if has_logo {
        EcLevel::H
    } else {
        DEFAULT_EC_LEVEL
    }
}

/// Pick the output format.
///
/// Precedence: explicit `--format`, then the output path's extension, then
/// raster.
pub fn infer_format(explicit: Option<&str>, output: Option<&str>) -> OutputFormat {
    explicit
        .and_then(OutputFormat::from_name)
        .or_else(|| output.and_then(|o| OutputFormat::from_path(Path::new(o))))
        .unwrap_or(OutputFormat::Raster)
}

/// Clamp a logo percentage into the accepted fraction range
pub fn logo_fraction(percent: f32) -> f32 {
    percent.clamp(MIN_LOGO_PERCENT, MAX_LOGO_PERCENT) / 100.0
}

/// Build a request template from raw options.
///
/// `data` is left empty; callers fill it per item with
/// [`GenerationRequest::with_data`]. Fails with a validation error if a
/// numeric field does not parse, which cannot happen after [`crate::validate`]
/// accepted the same options.
pub fn build_template(opts: &RawOptions) -> Result<GenerationRequest> {
    let format = infer_format(opts.format.as_deref(), opts.output.as_deref());
    build_template_as(opts, format)
}

/// Like [`build_template`], but with the output format fixed by the caller.
///
/// Used where the output kind is decided by the mode rather than by
/// `--format` or the output extension, such as the `<img>` tag, which is
/// always a PNG.
pub fn build_template_as(opts: &RawOptions, format: OutputFormat) -> Result<GenerationRequest> {
    let mut errors = Vec::new();

    let pixel_width = parse_size(&opts.size).unwrap_or_else(|| {
        errors.push(format!("Invalid size '{}'", opts.size));
        0
    });
    let margin = parse_margin(&opts.margin).unwrap_or_else(|| {
        errors.push(format!("Invalid margin '{}'", opts.margin));
        0
    });
    let percent = parse_logo_percent(&opts.logo_size).unwrap_or_else(|| {
        errors.push(format!("Invalid logo size '{}'", opts.logo_size));
        0.0
    });

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let logo_requested = opts.logo_path().is_some();

    let logo_path = match (format, opts.logo_path()) {
        (OutputFormat::Raster, Some(p)) => Some(PathBuf::from(p)),
        (OutputFormat::Vector, Some(p)) => {
            tracing::warn!("logo {} ignored for svg output", p);
            None
        }
        (_, None) => None,
    };

    let request = GenerationRequest {
        data: String::new(),
        format,
        pixel_width,
        margin,
        dark: normalize(&opts.color),
        light: normalize(&opts.background),
        ec_level: select_ec_level(logo_requested),
        logo_path,
        logo_size_fraction: logo_fraction(percent),
        logo_backing: opts
            .logo_backing
            .as_deref()
            .and_then(LogoBacking::from_name)
            .unwrap_or_default(),
    };

    tracing::debug!(?request, "built request template");
    Ok(request)
}

/// Build a complete request for a single data string
pub fn build_request(data: &str, opts: &RawOptions) -> Result<GenerationRequest> {
    Ok(build_template(opts)?.with_data(data))
}

/// Build a complete request with the output format fixed by the caller
pub fn build_request_as(
    data: &str,
    opts: &RawOptions,
    format: OutputFormat,
) -> Result<GenerationRequest> {
    Ok(build_template_as(opts, format)?.with_data(data))
}

/// Encoder parameters for file output
pub fn encoder_options(req: &GenerationRequest) -> EncoderOptions {
    EncoderOptions {
        ec_level: req.ec_level,
        margin: req.margin,
        width: req.pixel_width,
        dark: req.dark,
        light: req.light,
    }
}

/// Terminal preview parameters
pub fn preview_options(req: &GenerationRequest) -> PreviewOptions {
    PreviewOptions {
        compact: true,
        margin: PREVIEW_MARGIN,
        ec_level: req.ec_level,
    }
}
