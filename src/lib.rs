//! icnsgen library crate
//!
//! This crate provides the core functionality for the `icnsgen` CLI, which
//! turns one source image into a macOS `.icns` application icon. It is
//! organized into small modules: `sizes` (the required rendition table),
//! `iconset` (the transient working directory), `toolchain` (the `sips` /
//! `iconutil` backend and a built-in one), `builder` (the build pipeline) and
//! `error`. The binary `src/main.rs` calls `icnsgen_lib::run()` to execute the
//! CLI.
//!
//! Public API
//!
//! - `run()` — CLI entrypoint used by the binary.
//! - `builder::IconBuilder` / `builder::generate_icon` — library entrypoints.
//!
//! See each module for detailed documentation on functions and behavior.

pub mod builder;
pub mod error;
pub mod iconset;
pub mod logging;
pub mod sizes;
pub mod toolchain;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

use crate::builder::{BuildOptions, IconBuilder};
use crate::iconset::DEFAULT_ICONSET_DIR;
use crate::toolchain::{Backend, DEFAULT_COMPILER, DEFAULT_SCALER, NativeTools, SystemTools};

/// Where the icon lands when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "Resources/AppIcon.icns";

/// Top-level CLI types and runner. Keep `main.rs` thin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source image (PNG or JPEG, ideally at least 1024x1024)
    input: Option<PathBuf>,

    /// Output .icns path; parent directories are created
    #[arg(short = 'o', long = "output", env = "ICNSGEN_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Transient working directory for the renditions
    #[arg(long = "iconset", env = "ICNSGEN_ICONSET", default_value = DEFAULT_ICONSET_DIR)]
    iconset: PathBuf,

    /// Toolchain: system (sips + iconutil) or native. Defaults to system on macOS.
    #[arg(long = "backend", value_enum, env = "ICNSGEN_BACKEND")]
    backend: Option<Backend>,

    /// Scaling utility used by the system backend
    #[arg(long = "sips", env = "ICNSGEN_SIPS", default_value = DEFAULT_SCALER)]
    sips: String,

    /// Icon compiler used by the system backend
    #[arg(long = "iconutil", env = "ICNSGEN_ICONUTIL", default_value = DEFAULT_COMPILER)]
    iconutil: String,

    /// Suppress progress output
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// More diagnostic logging (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Run the icnsgen CLI.
///
/// Parses arguments, installs logging and exits the process with the code
/// returned by [`execute`]:
/// - `0` — the icon was generated.
/// - `1` — no input given, input missing, or any generation failure.
///
/// Example:
///
/// ```no_run
/// icnsgen_lib::run(); // called from src/main.rs
/// ```
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    std::process::exit(execute(&cli));
}

/// Execute parsed arguments and return the process exit code.
pub fn execute(cli: &Cli) -> i32 {
    let Some(input) = cli.input.as_deref() else {
        println!("Usage: icnsgen <image_path>");
        println!("Example: icnsgen icon.png");
        return 1;
    };

    if !input.exists() {
        eprintln!("❌ Error: File not found '{}'", input.display());
        return 1;
    }

    match build(cli, input) {
        Ok(_) => {
            println!("\n💡 Tip: Icon has been generated, you can now build the app bundle");
            0
        }
        Err(e) => {
            // BuildError's message already carries its causes; print it alone.
            eprintln!("❌ {}", e);
            1
        }
    }
}

fn build(cli: &Cli, input: &Path) -> anyhow::Result<PathBuf> {
    let options = BuildOptions {
        iconset_dir: cli.iconset.clone(),
        quiet: cli.quiet,
    };
    let backend = cli.backend.unwrap_or_else(Backend::platform_default);
    tracing::info!("using {:?} backend", backend);

    let built = match backend {
        Backend::System => IconBuilder::new(SystemTools::new(&cli.sips, &cli.iconutil), options)
            .build(input, &cli.output),
        Backend::Native => IconBuilder::new(NativeTools::new(), options).build(input, &cli.output),
    };
    Ok(built?)
}
