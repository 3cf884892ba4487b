//! Banner and header printing.

const FRAME: &str = "\x1b[1;36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Print the batch-mode banner.
pub fn print_banner() {
    println!("\n{FRAME}╔══════════════════════════════════════╗{RESET}");
    println!("{FRAME}║{RESET}          {BOLD}Qrcraft{RESET}  batch mode          {FRAME}║{RESET}");
    println!("{FRAME}╚══════════════════════════════════════╝{RESET}\n");
}
