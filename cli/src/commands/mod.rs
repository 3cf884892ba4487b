//! CLI command implementations.

mod batch;
mod embed;
mod generate;

pub use batch::run_batch;
pub use embed::{run_html, run_img};
pub use generate::run_generate;

use qrcraft_core::{GenerationRequest, RawOptions};

use crate::ui::report;

/// Tell the user when a requested logo was dropped for vector output.
fn warn_dropped_logo(raw: &RawOptions, request: &GenerationRequest) {
    if raw.logo_path().is_some() && request.logo_path.is_none() {
        report::warn("Logo ignored: logos are only embedded in PNG output");
    }
}
