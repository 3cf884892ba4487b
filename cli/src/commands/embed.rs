//! Inline HTML and <img> tag commands.

use std::path::Path;
use std::process::ExitCode;

use qrcraft_core::builder::build_request_as;
use qrcraft_core::generate::{html_embed, img_tag, write_markup};
use qrcraft_core::{OutputFormat, RawOptions};

use crate::ui::report;

/// Print (or save) an HTML fragment with inline SVG.
pub fn run_html(raw: &RawOptions) -> anyhow::Result<ExitCode> {
    let data = raw.data.as_deref().unwrap_or_default();
    let request = build_request_as(data, raw, OutputFormat::Vector)?;
    if raw.logo_path().is_some() {
        report::warn("Logo ignored: HTML embeds use inline SVG");
    }
    emit(&html_embed(&request)?, raw.output.as_deref())
}

/// Print (or save) an <img> tag with a PNG data URL.
///
/// The tag is always PNG, so `--format` and the output extension only pick
/// where the markup goes and a requested logo is kept.
pub fn run_img(raw: &RawOptions) -> anyhow::Result<ExitCode> {
    let data = raw.data.as_deref().unwrap_or_default();
    let request = build_request_as(data, raw, OutputFormat::Raster)?;
    emit(&img_tag(&request)?, raw.output.as_deref())
}

fn emit(markup: &str, output: Option<&str>) -> anyhow::Result<ExitCode> {
    match output {
        Some(path) => {
            let written = write_markup(markup, Path::new(path))?;
            report::success(&format!("Markup saved to {}", written.display()));
        }
        None => print!("{}", markup),
    }
    Ok(ExitCode::SUCCESS)
}
