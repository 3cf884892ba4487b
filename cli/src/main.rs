//! Qrcraft CLI - styled QR code generation.

mod commands;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use qrcraft_core::{validate, Config, RawOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrcraft")]
#[command(
    about = "Generate QR codes with custom colors, logos and batch export",
    long_about = None
)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Text or URL to encode (omit when using --batch)
    data: Option<String>,

    /// Output file, or output folder for --batch
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Output format [png, svg]; inferred from --output when omitted
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Image width in pixels (50-2000)
    #[arg(short = 's', long)]
    size: Option<String>,

    /// Module color as hex (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
    #[arg(short = 'c', long)]
    color: Option<String>,

    /// Background color as hex
    #[arg(short = 'b', long)]
    background: Option<String>,

    /// Quiet zone in modules (0-20)
    #[arg(short = 'm', long)]
    margin: Option<String>,

    /// Logo image to place in the center (PNG output only)
    #[arg(short = 'l', long)]
    logo: Option<String>,

    /// Logo edge as a percentage of the QR edge (5-40)
    #[arg(long)]
    logo_size: Option<String>,

    /// Backing drawn behind the logo [square, circle]
    #[arg(long)]
    logo_backing: Option<String>,

    /// Generate one QR code per line of FILE
    #[arg(long, value_name = "FILE")]
    batch: Option<String>,

    /// Print an HTML fragment with the QR code as inline SVG
    #[arg(long)]
    html: bool,

    /// Print an <img> tag with the QR code as a PNG data URL
    #[arg(long)]
    img: bool,

    /// Skip the terminal preview after saving
    #[arg(long)]
    no_preview: bool,

    /// Print version
    #[arg(short = 'v', long)]
    version: bool,
}

impl Cli {
    /// Merge flags over config defaults
    fn raw_options(&self, config: &Config) -> RawOptions {
        let defaults = &config.defaults;
        RawOptions {
            data: self.data.clone(),
            output: self.output.clone(),
            format: self.format.clone(),
            size: self.size.clone().unwrap_or_else(|| defaults.size.clone()),
            color: self.color.clone().unwrap_or_else(|| defaults.color.clone()),
            background: self
                .background
                .clone()
                .unwrap_or_else(|| defaults.background.clone()),
            margin: self.margin.clone().unwrap_or_else(|| defaults.margin.clone()),
            logo: self.logo.clone(),
            logo_size: self
                .logo_size
                .clone()
                .unwrap_or_else(|| defaults.logo_size.clone()),
            logo_backing: self.logo_backing.clone(),
            batch: self.batch.clone(),
            html: self.html,
            img: self.img,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            ui::report::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    // Diagnostics stay quiet unless RUST_LOG asks for them; the console
    // reporter covers normal output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .init();

    let cli = Cli::parse();

    if cli.version {
        println!("qrcraft {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load()?;
    let raw = cli.raw_options(&config);

    let validation = validate(&raw);
    if !validation.valid {
        ui::report::validation_errors(&validation.errors);
        return Ok(ExitCode::FAILURE);
    }

    if let Some(batch_file) = &raw.batch {
        commands::run_batch(&raw, batch_file, &config)
    } else if raw.html {
        commands::run_html(&raw)
    } else if raw.img {
        commands::run_img(&raw)
    } else {
        commands::run_generate(&raw, &config, !cli.no_preview)
    }
}
