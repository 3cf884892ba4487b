//! Logo overlay
//!
//! Pixel work is done by the `image` crate. This module decides where the
//! logo goes and how large it is, then stacks the layers.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::color::Rgba;
use crate::constants::{LOGO_CIRCLE_PADDING, LOGO_PADDING_RATIO};
use crate::request::LogoBacking;
use crate::{Error, Result};

/// One overlay placed on top of a base raster
pub struct Layer {
    pub image: RgbaImage,
    pub x: i64,
    pub y: i64,
}

/// Placement computed for a logo on a QR raster of a given edge length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement {
    pub logo_dim: u32,
    pub logo_offset: i64,
    pub backing_dim: u32,
    pub backing_offset: i64,
}

impl LogoPlacement {
    /// Compute logo and backing geometry.
    ///
    /// The square backing is `logo_dim * 1.2` wide. The circular backing
    /// has radius `logo_dim * 1.15 / 2`, so its bounding box is
    /// `logo_dim * 1.15`.
    pub fn compute(qr_dim: u32, fraction: f32, backing: LogoBacking) -> Self {
        let logo_dim = ((qr_dim as f32 * fraction).round() as u32).max(1);
        let backing_dim = match backing {
            LogoBacking::Square => (logo_dim as f32 * LOGO_PADDING_RATIO).round() as u32,
            LogoBacking::Circle => (circle_radius(logo_dim) * 2.0).round() as u32,
        };

        Self {
            logo_dim,
            logo_offset: centered(qr_dim, logo_dim),
            backing_dim,
            backing_offset: centered(qr_dim, backing_dim),
        }
    }
}

fn centered(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64) / 2
}

fn circle_radius(logo_dim: u32) -> f32 {
    logo_dim as f32 * (1.0 + LOGO_CIRCLE_PADDING) / 2.0
}

/// Resize `src` to fit inside `width` x `height`, preserving aspect ratio,
/// centered on a transparent canvas of exactly that size.
pub fn contain_fit(src: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let fitted = src.resize(width, height, FilterType::Lanczos3).to_rgba8();
    let mut canvas = RgbaImage::new(width, height);
    imageops::overlay(
        &mut canvas,
        &fitted,
        centered(width, fitted.width()),
        centered(height, fitted.height()),
    );
    canvas
}

/// Stack layers onto `base` in order
pub fn composite(mut base: RgbaImage, layers: &[Layer]) -> RgbaImage {
    for layer in layers {
        imageops::overlay(&mut base, &layer.image, layer.x, layer.y);
    }
    base
}

/// Solid square backing
fn square_backing(dim: u32, fill: Rgba) -> RgbaImage {
    RgbaImage::from_pixel(dim, dim, fill.to_pixel())
}

/// Solid disc on a transparent square
fn circle_backing(dim: u32, fill: Rgba) -> RgbaImage {
    let r = dim as f32 / 2.0;
    let pixel = fill.to_pixel();
    RgbaImage::from_fn(dim, dim, |x, y| {
        let dx = x as f32 + 0.5 - r;
        let dy = y as f32 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            pixel
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    })
}

/// Load a logo image from disk
pub fn load_logo(path: &Path) -> Result<DynamicImage> {
    image::open(path)
        .map_err(|e| Error::Compositing(format!("cannot read logo {}: {}", path.display(), e)))
}

/// Overlay a logo centered on a QR raster.
///
/// Layers, bottom to top: the QR raster, a backing in the QR's light color,
/// the contain-fitted logo.
pub fn overlay_logo(
    qr: RgbaImage,
    logo: &DynamicImage,
    fraction: f32,
    backing: LogoBacking,
    backing_color: Rgba,
) -> RgbaImage {
    let placement = LogoPlacement::compute(qr.width(), fraction, backing);
    tracing::debug!(?placement, ?backing, "placing logo");

    let backing_image = match backing {
        LogoBacking::Square => square_backing(placement.backing_dim, backing_color),
        LogoBacking::Circle => circle_backing(placement.backing_dim, backing_color),
    };

    let layers = [
        Layer {
            image: backing_image,
            x: placement.backing_offset,
            y: placement.backing_offset,
        },
        Layer {
            image: contain_fit(logo, placement.logo_dim, placement.logo_dim),
            x: placement.logo_offset,
            y: placement.logo_offset,
        },
    ];

    composite(qr, &layers)
}

/// Load the logo at `path` and overlay it on `qr`
pub fn apply_logo(
    qr: RgbaImage,
    path: &Path,
    fraction: f32,
    backing: LogoBacking,
    backing_color: Rgba,
) -> Result<RgbaImage> {
    let logo = load_logo(path)?;
    Ok(overlay_logo(qr, &logo, fraction, backing, backing_color))
}
