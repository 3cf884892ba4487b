//! Option validation
//!
//! Every rule is checked and every violation is reported, so the user sees
//! all problems with a command line at once.

use std::fs;
use std::path::Path;

use crate::color::is_valid_hex;
use crate::constants::{
    FORMAT_NAMES, LOGO_EXTENSIONS, MAX_LOGO_PERCENT, MAX_MARGIN, MAX_SIZE, MIN_LOGO_PERCENT,
    MIN_MARGIN, MIN_SIZE,
};
use crate::request::{LogoBacking, RawOptions};
use crate::{Error, Result};

/// Outcome of validating one command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Convert into a `Result`, carrying all messages on failure
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(Error::Validation(self.errors))
        }
    }
}

/// Validate raw options. Reads the file system for logo and batch paths but
/// never writes.
pub fn validate(opts: &RawOptions) -> ValidationResult {
    let mut errors = Vec::new();

    if !opts.is_batch() && opts.data.as_deref().map_or(true, str::is_empty) {
        errors.push("Data argument is required unless --batch is used".to_string());
    }

    if !is_valid_hex(&opts.color) {
        errors.push(format!(
            "Invalid color '{}': use #RGB, #RGBA, #RRGGBB or #RRGGBBAA",
            opts.color
        ));
    }

    if !is_valid_hex(&opts.background) {
        errors.push(format!(
            "Invalid background '{}': use #RGB, #RGBA, #RRGGBB or #RRGGBBAA",
            opts.background
        ));
    }

    if !size_in_range(&opts.size) {
        errors.push(format!(
            "Invalid size '{}': must be a whole number between {} and {}",
            opts.size, MIN_SIZE, MAX_SIZE
        ));
    }

    if !margin_in_range(&opts.margin) {
        errors.push(format!(
            "Invalid margin '{}': must be a whole number between {} and {}",
            opts.margin, MIN_MARGIN, MAX_MARGIN
        ));
    }

    if let Some(format) = &opts.format {
        if !FORMAT_NAMES.contains(&format.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Invalid format '{}': must be one of {}",
                format,
                FORMAT_NAMES.join(", ")
            ));
        }
    }

    if let Some(logo) = opts.logo_path() {
        errors.extend(check_logo(Path::new(logo)));
    }

    if !logo_percent_in_range(&opts.logo_size) {
        errors.push(format!(
            "Invalid logo size '{}': must be between {} and {} percent",
            opts.logo_size, MIN_LOGO_PERCENT, MAX_LOGO_PERCENT
        ));
    }

    if let Some(backing) = &opts.logo_backing {
        if LogoBacking::from_name(backing).is_none() {
            errors.push(format!(
                "Invalid logo backing '{}': must be square or circle",
                backing
            ));
        }
    }

    if let Some(batch) = &opts.batch {
        if let Some(e) = check_batch_file(Path::new(batch)) {
            errors.push(e);
        }
    }

    ValidationResult::from_errors(errors)
}

/// Parse a size value, `None` when unparsable or out of range
pub fn parse_size(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|s| (MIN_SIZE..=MAX_SIZE).contains(s))
}

/// Parse a margin value, `None` when unparsable or out of range
pub fn parse_margin(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|m| (MIN_MARGIN..=MAX_MARGIN).contains(m))
        .map(|m| m as u32)
}

/// Parse a logo size percentage, `None` when unparsable or out of range
pub fn parse_logo_percent(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|p| (MIN_LOGO_PERCENT..=MAX_LOGO_PERCENT).contains(p))
}

fn size_in_range(value: &str) -> bool {
    parse_size(value).is_some()
}

fn margin_in_range(value: &str) -> bool {
    parse_margin(value).is_some()
}

fn logo_percent_in_range(value: &str) -> bool {
    parse_logo_percent(value).is_some()
}

fn check_logo(path: &Path) -> Vec<String> {
    let mut errors = Vec::new();

    if !path.is_file() {
        errors.push(format!("Logo file not found: {}", path.display()));
    }

    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| LOGO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !ext_ok {
        errors.push(format!(
            "Unsupported logo format: {} (expected {})",
            path.display(),
            LOGO_EXTENSIONS.join(", ")
        ));
    }

    errors
}

fn check_batch_file(path: &Path) -> Option<String> {
    if !path.is_file() {
        return Some(format!("Batch file not found: {}", path.display()));
    }

    match fs::read_to_string(path) {
        Ok(content) if content.lines().any(|l| !l.trim().is_empty()) => None,
        Ok(_) => Some(format!("Batch file is empty: {}", path.display())),
        Err(e) => Some(format!("Batch file is not readable: {} ({})", path.display(), e)),
    }
}
