//! Terminal QR preview.

use qrcode::{Color, QrCode};
use qrcraft_core::PreviewOptions;

/// Render a QR code as text.
///
/// Compact mode uses Unicode half blocks where each character covers two
/// vertical modules; otherwise each module is two full blocks wide.
pub fn render_preview(data: &str, opts: &PreviewOptions) -> Option<String> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), opts.ec_level).ok()?;
    let width = code.width();
    let colors = code.to_colors();
    let margin = opts.margin as usize;
    let total = width + 2 * margin;

    let is_dark = |x: usize, y: usize| {
        x >= margin
            && y >= margin
            && x - margin < width
            && y - margin < width
            && colors[(y - margin) * width + (x - margin)] == Color::Dark
    };

    // ▀ = top dark, bottom light
    // ▄ = top light, bottom dark
    // █ = both dark
    let mut out = String::new();
    if opts.compact {
        for y in (0..total).step_by(2) {
            for x in 0..total {
                out.push(match (is_dark(x, y), is_dark(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            out.push('\n');
        }
    } else {
        for y in 0..total {
            for x in 0..total {
                out.push_str(if is_dark(x, y) { "██" } else { "  " });
            }
            out.push('\n');
        }
    }

    Some(out)
}

/// Print a QR preview to the terminal.
pub fn print_qr_preview(data: &str, opts: &PreviewOptions) {
    match render_preview(data, opts) {
        Some(text) => print!("{}", text),
        None => eprintln!("Failed to render terminal preview"),
    }
}
