//! UI utilities for terminal output.

mod banner;
mod qr;
pub mod report;

pub use banner::print_banner;
pub use qr::print_qr_preview;
