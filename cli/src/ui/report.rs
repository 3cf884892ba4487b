//! Console reporter for user-facing progress and errors.
//!
//! Progress and success lines go to stdout; warnings and errors go to
//! stderr so they never mix into `--html`/`--img` output.

const MAX_PREVIEW_LEN: usize = 40;

pub fn info(msg: &str) {
    println!("\x1b[1;34m•\x1b[0m {}", msg);
}

pub fn success(msg: &str) {
    println!("\x1b[1;32m✓\x1b[0m {}", msg);
}

pub fn warn(msg: &str) {
    eprintln!("\x1b[1;33m⚠\x1b[0m {}", msg);
}

pub fn error(msg: &str) {
    eprintln!("\x1b[1;31m✗\x1b[0m Error: {}", msg);
}

/// One successful batch item
pub fn progress(index: usize, total: usize, msg: &str) {
    println!("\x1b[1;32m✓\x1b[0m [{}/{}] {}", index, total, msg);
}

/// One failed batch item
pub fn item_failed(index: usize, total: usize, msg: &str) {
    eprintln!("\x1b[1;31m✗\x1b[0m [{}/{}] {}", index, total, msg);
}

/// Print every validation problem, one per line.
pub fn validation_errors(errors: &[String]) {
    eprintln!("\x1b[1;31m✗\x1b[0m Invalid options:");
    for e in errors {
        eprintln!("  • {}", e);
    }
}

/// Shorten a payload for single-line display.
pub fn preview(text: &str) -> String {
    if text.chars().count() > MAX_PREVIEW_LEN {
        let cut: String = text.chars().take(MAX_PREVIEW_LEN).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
