//! Single-item generation
//!
//! Runs builder output through the encoder, the optional logo overlay and
//! finally the file system. Also produces the inline HTML and `<img>` tag
//! variants.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::builder::encoder_options;
use crate::encoder;
use crate::logo;
use crate::paths::{resolve_single_output, timestamp_millis};
use crate::request::{GenerationRequest, OutputFormat};
use crate::{Config, Result};

/// Render the request as a raster, with the logo overlaid if requested
pub fn render_raster(req: &GenerationRequest) -> Result<RgbaImage> {
    let opts = encoder_options(req);
    let code = encoder::encode(&req.data, &opts)?;
    let qr = encoder::to_raster(&code, &opts);

    match &req.logo_path {
        Some(path) => logo::apply_logo(
            qr,
            path,
            req.logo_size_fraction,
            req.logo_backing,
            req.light,
        ),
        None => Ok(qr),
    }
}

/// Render the request as SVG markup. Logos are never applied.
pub fn render_svg(req: &GenerationRequest) -> Result<String> {
    let opts = encoder_options(req);
    let code = encoder::encode(&req.data, &opts)?;
    Ok(encoder::to_svg(&code, &opts))
}

/// Render in the request's format and write to `path`, creating parent
/// directories as needed.
pub fn write_to(req: &GenerationRequest, path: &Path) -> Result<PathBuf> {
    let bytes = match req.format {
        OutputFormat::Raster => encoder::to_png_bytes(&render_raster(req)?)?,
        OutputFormat::Vector => render_svg(req)?.into_bytes(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;

    tracing::info!("wrote {}", path.display());
    Ok(path.to_path_buf())
}

/// Resolve the destination for `output` and write the file there
pub fn generate_file(
    req: &GenerationRequest,
    output: Option<&str>,
    config: &Config,
) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let now_ms = timestamp_millis();
    let path = resolve_single_output(output, req.format, &config.export_dir, &cwd, now_ms);
    tracing::debug!("resolved output path {}", path.display());
    write_to(req, &path)
}

/// HTML fragment with the QR inlined as SVG.
///
/// A logo on the request is dropped since the payload is vector.
pub fn html_embed(req: &GenerationRequest) -> Result<String> {
    if req.logo_path.is_some() {
        tracing::warn!("logo ignored for html embed");
    }
    let svg = render_svg(&req.with_format(OutputFormat::Vector))?;
    Ok(format!("<div class=\"qr-code\">\n{}</div>\n", svg))
}

/// `<img>` tag carrying the raster as a PNG data URL
pub fn img_tag(req: &GenerationRequest) -> Result<String> {
    let raster = render_raster(&req.with_format(OutputFormat::Raster))?;
    let url = encoder::to_data_url(&raster)?;
    Ok(format!(
        "<img src=\"{}\" alt=\"QR Code\" width=\"{}\" height=\"{}\">\n",
        url,
        raster.width(),
        raster.height()
    ))
}

/// Write inline markup (from [`html_embed`] or [`img_tag`]) to a file
pub fn write_markup(markup: &str, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup)?;
    tracing::info!("wrote {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::request::LogoBacking;
    use qrcode::EcLevel;

    fn request(format: OutputFormat) -> GenerationRequest {
        GenerationRequest {
            data: "https://example.com".to_string(),
            format,
            pixel_width: 200,
            margin: 4,
            dark: Rgba::BLACK,
            light: Rgba::WHITE,
            ec_level: EcLevel::M,
            logo_path: None,
            logo_size_fraction: 0.2,
            logo_backing: LogoBacking::Square,
        }
    }

    fn write_logo(dir: &Path) -> PathBuf {
        let path = dir.join("logo.png");
        RgbaImage::from_pixel(16, 16, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_write_png_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/code.png");
        let written = write_to(&request(OutputFormat::Raster), &path).unwrap();
        assert_eq!(written, path);

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 200);
    }

    #[test]
    fn test_write_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.svg");
        write_to(&request(OutputFormat::Vector), &path).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_raster_with_logo_is_composited() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(OutputFormat::Raster);
        req.ec_level = EcLevel::H;
        req.logo_path = Some(write_logo(dir.path()));

        let plain = render_raster(&request(OutputFormat::Raster)).unwrap();
        let with_logo = render_raster(&req).unwrap();
        assert_eq!(with_logo.dimensions(), plain.dimensions());

        let center = with_logo.get_pixel(100, 100);
        assert!(center[0] >= 250 && center[1] <= 5);
    }

    #[test]
    fn test_missing_logo_fails_item() {
        let mut req = request(OutputFormat::Raster);
        req.logo_path = Some(PathBuf::from("/nonexistent/logo.png"));
        assert!(matches!(render_raster(&req), Err(crate::Error::Compositing(_))));
    }

    #[test]
    fn test_html_embed_wraps_svg() {
        let html = html_embed(&request(OutputFormat::Raster)).unwrap();
        assert!(html.starts_with("<div class=\"qr-code\">\n<svg"));
        assert!(html.ends_with("</svg>\n</div>\n"));
    }

    #[test]
    fn test_html_embed_ignores_logo() {
        let mut req = request(OutputFormat::Raster);
        req.logo_path = Some(PathBuf::from("/nonexistent/logo.png"));
        assert!(html_embed(&req).is_ok());
    }

    #[test]
    fn test_img_tag() {
        let tag = img_tag(&request(OutputFormat::Vector)).unwrap();
        assert!(tag.starts_with("<img src=\"data:image/png;base64,"));
        assert!(tag.contains("width=\"200\" height=\"200\""));
    }

    #[test]
    fn test_img_tag_keeps_logo_when_format_is_svg() {
        use crate::builder::build_request_as;
        use crate::request::RawOptions;
        use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

        let dir = tempfile::tempdir().unwrap();
        let logo = write_logo(dir.path());
        let raw = RawOptions {
            format: Some("svg".to_string()),
            output: Some("tag.svg".to_string()),
            size: "200".to_string(),
            color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            margin: "4".to_string(),
            logo: Some(logo.to_string_lossy().into_owned()),
            logo_size: "20".to_string(),
            ..Default::default()
        };
        let req = build_request_as("https://example.com", &raw, OutputFormat::Raster).unwrap();
        assert_eq!(req.ec_level, EcLevel::H);

        let tag = img_tag(&req).unwrap();
        let encoded = tag
            .strip_prefix("<img src=\"data:image/png;base64,")
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        let png = image::load_from_memory(&BASE64.decode(encoded).unwrap())
            .unwrap()
            .to_rgba8();
        let center = png.get_pixel(100, 100);
        assert!(center[0] >= 250 && center[1] <= 5, "{center:?}");
    }

    #[test]
    fn test_generate_file_uses_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_export_dir(dir.path());
        let path = generate_file(&request(OutputFormat::Vector), None, &config).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("qr-") && name.ends_with(".svg"));

        let path =
            generate_file(&request(OutputFormat::Raster), Some("named.png"), &config).unwrap();
        assert_eq!(path, dir.path().join("named.png"));
        assert!(path.is_file());
    }

    #[test]
    fn test_write_markup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("embed/qr.html");
        write_markup("<div></div>", &path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<div></div>");
    }
}
