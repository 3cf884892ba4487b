//! Batch command implementation.

use std::path::Path;
use std::process::ExitCode;

use qrcraft_core::builder::build_template;
use qrcraft_core::paths::timestamp_millis;
use qrcraft_core::{BatchEvent, BatchJob, Config, RawOptions};

use super::warn_dropped_logo;
use crate::ui::{print_banner, report};

/// Generate one file per non-blank line of `batch_file`.
///
/// Exits non-zero if any item failed, even though the rest were written.
pub fn run_batch(raw: &RawOptions, batch_file: &str, config: &Config) -> anyhow::Result<ExitCode> {
    print_banner();

    let template = build_template(raw)?;
    warn_dropped_logo(raw, &template);

    let job = BatchJob::prepare(
        Path::new(batch_file),
        raw.output.as_deref(),
        template,
        config,
        timestamp_millis(),
    )?;

    let result = job.run(handle_event);

    if !result.is_success() {
        println!("\n\x1b[1;31mFailed items:\x1b[0m");
        for failure in result.failures() {
            if let Err(e) = &failure.result {
                let data = report::preview(&failure.data);
                println!("  {:>3}. {} \x1b[2m({})\x1b[0m", failure.index, data, e);
            }
        }
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Handle a batch event and print appropriate output.
fn handle_event(event: BatchEvent<'_>) {
    match event {
        BatchEvent::Started { total, output_directory } => {
            report::info(&format!("Processing {} item(s)", total));
            println!("\x1b[1mOutput:\x1b[0m {}\n", output_directory.display());
        }
        BatchEvent::ItemSucceeded { index, total, data, path } => {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            report::progress(index, total, &format!("{} → {}", report::preview(data), name));
        }
        BatchEvent::ItemFailed { index, total, data, error } => {
            report::item_failed(index, total, &format!("{}: {}", report::preview(data), error));
        }
        BatchEvent::Finished { success_count, failed_count } => {
            println!();
            if failed_count == 0 {
                report::success(&format!("{} QR code(s) generated", success_count));
            } else {
                report::warn(&format!(
                    "{} succeeded, {} failed",
                    success_count, failed_count
                ));
            }
        }
    }
}
