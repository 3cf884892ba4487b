//! QR encoder adapter
//!
//! Symbol construction is left to the `qrcode` crate. This module only
//! turns the resulting module grid into a PNG raster, SVG markup or a
//! data URL, honoring margin, pixel width and colors.

use std::fmt::Write as _;
use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{ImageFormat, RgbaImage};
use qrcode::{Color, QrCode};

use crate::builder::EncoderOptions;
use crate::color::Rgba;
use crate::constants::FALLBACK_SCALE;
use crate::{Error, Result};

/// Encode a payload into a QR symbol
pub fn encode(data: &str, opts: &EncoderOptions) -> Result<QrCode> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), opts.ec_level)?;
    tracing::debug!(
        modules = code.width(),
        ec_level = ?opts.ec_level,
        "encoded {} bytes",
        data.len()
    );
    Ok(code)
}

/// Whole pixels per module for a symbol of `modules` modules plus margin.
///
/// Falls back to a fixed scale when the requested width cannot give every
/// module at least one pixel.
pub fn module_scale(modules: usize, margin: u32, width: u32) -> u32 {
    let total = modules as u32 + 2 * margin;
    if width >= total {
        width / total
    } else {
        FALLBACK_SCALE
    }
}

/// Edge length in pixels of the rendered raster
pub fn raster_side(modules: usize, margin: u32, width: u32) -> u32 {
    let total = modules as u32 + 2 * margin;
    if width >= total {
        width
    } else {
        total * FALLBACK_SCALE
    }
}

/// Rasterize a symbol at the requested width and colors.
///
/// Modules are a whole number of pixels wide; the pixels left over from
/// `width / total` widen the quiet zone, split evenly on both sides.
pub fn to_raster(code: &QrCode, opts: &EncoderOptions) -> RgbaImage {
    let modules = code.width();
    let colors = code.to_colors();
    let scale = module_scale(modules, opts.margin, opts.width) as i64;
    let side = raster_side(modules, opts.margin, opts.width);
    let symbol_px = modules as i64 * scale;
    let offset = (side as i64 - symbol_px) / 2;

    let dark = opts.dark.to_pixel();
    let light = opts.light.to_pixel();

    RgbaImage::from_fn(side, side, |x, y| {
        let px = x as i64 - offset;
        let py = y as i64 - offset;
        if px < 0 || py < 0 || px >= symbol_px || py >= symbol_px {
            return light;
        }
        let (mx, my) = ((px / scale) as usize, (py / scale) as usize);
        if colors[my * modules + mx] == Color::Dark {
            dark
        } else {
            light
        }
    })
}

/// Encode a raster as PNG bytes
pub fn to_png_bytes(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| Error::Compositing(format!("PNG encoding failed: {}", e)))?;
    Ok(buf.into_inner())
}

/// PNG data URL for inline embedding
pub fn to_data_url(image: &RgbaImage) -> Result<String> {
    let png = to_png_bytes(image)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

/// Render a symbol as standalone SVG markup.
///
/// The view box is in module units; `width`/`height` carry the requested
/// pixel width. Dark modules are merged into horizontal runs.
pub fn to_svg(code: &QrCode, opts: &EncoderOptions) -> String {
    let modules = code.width();
    let colors = code.to_colors();
    let total = modules + 2 * opts.margin as usize;
    let margin = opts.margin as usize;

    let mut path = String::new();
    for (y, row) in colors.chunks(modules).enumerate() {
        let mut x = 0;
        while x < modules {
            if row[x] != Color::Dark {
                x += 1;
                continue;
            }
            let start = x;
            while x < modules && row[x] == Color::Dark {
                x += 1;
            }
            let run = x - start;
            let _ = write!(path, "M{} {}h{}v1h-{}z", start + margin, y + margin, run, run);
        }
    }

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {total} {total}" "#,
            r#"width="{width}" height="{width}" shape-rendering="crispEdges">"#,
            r#"<rect width="{total}" height="{total}" fill="{light}"{light_opacity}/>"#,
            r#"<path d="{path}" fill="{dark}"{dark_opacity}/>"#,
            "</svg>\n"
        ),
        total = total,
        width = opts.width,
        light = opts.light.rgb_hex(),
        light_opacity = opacity_attr(&opts.light),
        path = path,
        dark = opts.dark.rgb_hex(),
        dark_opacity = opacity_attr(&opts.dark),
    )
}

fn opacity_attr(color: &Rgba) -> String {
    if color.a == 0xFF {
        String::new()
    } else {
        format!(r#" fill-opacity="{:.3}""#, color.opacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrcode::EcLevel;

    fn opts(width: u32, margin: u32) -> EncoderOptions {
        EncoderOptions {
            ec_level: EcLevel::M,
            margin,
            width,
            dark: Rgba::BLACK,
            light: Rgba::WHITE,
        }
    }

    #[test]
    fn test_raster_exact_width() {
        let o = opts(300, 4);
        let code = encode("https://example.com", &o).unwrap();
        let img = to_raster(&code, &o);
        assert_eq!(img.width(), 300);
        assert_eq!(img.height(), 300);
    }

    #[test]
    fn test_raster_margin_is_light_and_finder_is_dark() {
        let o = opts(290, 4);
        let code = encode("hello", &o).unwrap();
        let scale = module_scale(code.width(), 4, 290);
        let img = to_raster(&code, &o);

        assert_eq!(*img.get_pixel(0, 0), Rgba::WHITE.to_pixel());
        let inside = 4 * scale + scale / 2;
        assert_eq!(*img.get_pixel(inside, inside), Rgba::BLACK.to_pixel());
    }

    #[test]
    fn test_small_width_uses_fallback_scale() {
        let o = opts(50, 20);
        let code = encode("hello", &o).unwrap();
        assert_eq!(module_scale(code.width(), 20, 50), FALLBACK_SCALE);
        let img = to_raster(&code, &o);
        assert_eq!(img.width() as usize, (code.width() + 40) * 4);
    }

    #[test]
    fn test_modules_have_uniform_width() {
        // 300 px over 25 + 2 * 4 = 33 modules: 9 px modules, 3 px spare
        let o = opts(300, 4);
        let code = encode("https://example.com", &o).unwrap();
        assert_eq!(code.width(), 25);
        assert_eq!(module_scale(25, 4, 300), 9);

        let img = to_raster(&code, &o);
        assert_eq!(img.width(), 300);

        // the finder's top edge is a 7-module dark run: exactly 63 px
        let offset = (300 - 25 * 9) / 2;
        let row = offset + 1;
        let dark_run = (0..300)
            .skip_while(|&x| *img.get_pixel(x, row) != Rgba::BLACK.to_pixel())
            .take_while(|&x| *img.get_pixel(x, row) == Rgba::BLACK.to_pixel())
            .count();
        assert_eq!(dark_run, 63);
        assert_eq!(*img.get_pixel(offset - 1, row), Rgba::WHITE.to_pixel());
        assert_eq!(*img.get_pixel(offset, row), Rgba::BLACK.to_pixel());
    }

    #[test]
    fn test_custom_colors_applied() {
        let mut o = opts(200, 0);
        o.dark = Rgba::parse("#FF0000").unwrap();
        o.light = Rgba::parse("#00FF0080").unwrap();
        let code = encode("hello", &o).unwrap();
        let img = to_raster(&code, &o);
        // 200 px over 21 modules: 9 px modules, 5 px of spare light edge
        assert_eq!(*img.get_pixel(0, 0), image::Rgba([0, 0xFF, 0, 0x80]));
        assert_eq!(*img.get_pixel(5, 5), image::Rgba([0xFF, 0, 0, 0xFF]));
        let pixels: Vec<_> = img.pixels().collect();
        assert!(pixels.contains(&&image::Rgba([0, 0xFF, 0, 0x80])));
    }

    #[test]
    fn test_oversized_payload_is_encoding_error() {
        let mut o = opts(300, 4);
        o.ec_level = EcLevel::H;
        let data = "x".repeat(3000);
        assert!(matches!(encode(&data, &o), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_svg_markup() {
        let mut o = opts(256, 2);
        o.dark = Rgba::parse("#1a1a2e").unwrap();
        let code = encode("hello", &o).unwrap();
        let svg = to_svg(&code, &o);
        let total = code.width() + 4;

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains(&format!("viewBox=\"0 0 {total} {total}\"")));
        assert!(svg.contains("width=\"256\""));
        assert!(svg.contains("fill=\"#1A1A2E\""));
        assert!(!svg.contains("fill-opacity"));
        assert!(svg.contains("M2 2h7v1h-7z"));
    }

    #[test]
    fn test_svg_translucent_color_sets_opacity() {
        let mut o = opts(256, 0);
        o.light = Rgba::parse("#FFFFFF00").unwrap();
        let code = encode("hello", &o).unwrap();
        assert!(to_svg(&code, &o).contains("fill-opacity=\"0.000\""));
    }

    #[test]
    fn test_data_url_is_png() {
        let o = opts(100, 1);
        let code = encode("hello", &o).unwrap();
        let url = to_data_url(&to_raster(&code, &o)).unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let o = opts(150, 2);
        let a = to_png_bytes(&to_raster(&encode("same", &o).unwrap(), &o)).unwrap();
        let b = to_png_bytes(&to_raster(&encode("same", &o).unwrap(), &o)).unwrap();
        assert_eq!(a, b);
    }
}
