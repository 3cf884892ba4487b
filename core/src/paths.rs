//! Output path resolution
//!
//! All functions here are pure: the clock reading and working directory are
//! passed in, so identical inputs always resolve to the same path. Batch
//! folder names are only as unique as the millisecond timestamp; two runs
//! on the same file within one millisecond collide.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::request::OutputFormat;

/// Milliseconds since the Unix epoch
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn has_separator(path: &str) -> bool {
    path.contains('/') || path.contains('\\')
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Destination for a single generated file.
///
/// - no output: `<export_dir>/qr-<now_ms>.<ext>`
/// - bare file name: placed inside `export_dir`
/// - anything else: resolved against `cwd` (or kept if absolute)
pub fn resolve_single_output(
    output: Option<&str>,
    format: OutputFormat,
    export_dir: &Path,
    cwd: &Path,
    now_ms: u128,
) -> PathBuf {
    match output.filter(|o| !o.is_empty()) {
        None => export_dir.join(format!("qr-{}.{}", now_ms, format.extension())),
        Some(o) if !has_separator(o) && !Path::new(o).is_absolute() => export_dir.join(o),
        Some(o) => absolutize(Path::new(o), cwd),
    }
}

/// Per-run folder for a batch.
///
/// Named `<batch base name>_batch_<now_ms>` and placed in:
/// - `export_dir` when no output is given
/// - the parent of `output` when it carries a file extension
/// - `output` itself otherwise, resolved against `export_dir` when relative
pub fn resolve_batch_dir(
    batch_file: &Path,
    output: Option<&str>,
    export_dir: &Path,
    cwd: &Path,
    now_ms: u128,
) -> PathBuf {
    let base_name = batch_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "batch".to_string());
    let folder = format!("{}_batch_{}", base_name, now_ms);

    let parent = match output.filter(|o| !o.is_empty()) {
        None => export_dir.to_path_buf(),
        Some(o) => {
            let path = Path::new(o);
            if path.extension().is_some() {
                let abs = absolutize(path, cwd);
                abs.parent().map(Path::to_path_buf).unwrap_or(abs)
            } else {
                absolutize(path, export_dir)
            }
        }
    };

    parent.join(folder)
}

/// File name of the `index`-th (1-based) item in a batch folder
pub fn batch_item_filename(index: usize, format: OutputFormat) -> String {
    format!("qr-{:03}.{}", index, format.extension())
}
