//! Centralized option limits and defaults
//!
//! Validation, the option builder and the CLI all read their ranges from
//! here so the three never disagree.

/// Accepted pixel width range for rendered output
pub const MIN_SIZE: u32 = 50;
pub const MAX_SIZE: u32 = 2000;

/// Accepted quiet-zone range, in modules
pub const MIN_MARGIN: i64 = 0;
pub const MAX_MARGIN: i64 = 20;

/// Accepted logo size range, in percent of the QR edge
pub const MIN_LOGO_PERCENT: f32 = 5.0;
pub const MAX_LOGO_PERCENT: f32 = 40.0;

/// Built-in flag defaults, overridable through the config file
pub const DEFAULT_SIZE: &str = "300";
pub const DEFAULT_MARGIN: &str = "4";
pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
pub const DEFAULT_LOGO_PERCENT: &str = "20";

/// Image extensions accepted for `--logo`
pub const LOGO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Output format names accepted for `--format`
pub const FORMAT_NAMES: &[&str] = &["png", "svg"];

/// Padding square edge relative to the logo edge
pub const LOGO_PADDING_RATIO: f32 = 1.2;

/// Extra radius applied to the circular logo backing
pub const LOGO_CIRCLE_PADDING: f32 = 0.15;

/// Module scale used when the requested width cannot fit one pixel per module
pub const FALLBACK_SCALE: u32 = 4;

/// Quiet zone used by the terminal preview
pub const PREVIEW_MARGIN: u32 = 1;

/// Directory names under the user's home
pub const APP_DIR: &str = ".qrcraft";
pub const EXPORT_SUBDIR: &str = "exports";
pub const CONFIG_FILE: &str = "config.json";

/// Environment overrides
pub const EXPORT_DIR_ENV: &str = "QRCRAFT_EXPORT_DIR";
pub const CONFIG_PATH_ENV: &str = "QRCRAFT_CONFIG";
