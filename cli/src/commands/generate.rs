//! Standard single-item command.

use std::process::ExitCode;

use qrcraft_core::builder::{build_request, preview_options};
use qrcraft_core::generate::generate_file;
use qrcraft_core::{Config, RawOptions};

use super::warn_dropped_logo;
use crate::ui::{print_qr_preview, report};

/// Generate one file and optionally preview it in the terminal.
pub fn run_generate(raw: &RawOptions, config: &Config, preview: bool) -> anyhow::Result<ExitCode> {
    let data = raw.data.as_deref().unwrap_or_default();
    let request = build_request(data, raw)?;
    warn_dropped_logo(raw, &request);

    let path = generate_file(&request, raw.output.as_deref(), config)?;
    report::success(&format!("QR code saved to {}", path.display()));

    if preview {
        println!();
        print_qr_preview(&request.data, &preview_options(&request));
    }

    Ok(ExitCode::SUCCESS)
}
