//! Backends that turn one source image into renditions and an `.icns` file.
//!
//! `SystemTools` shells out to macOS `sips` and `iconutil`. `NativeTools`
//! does the same work in-process with the `image` and `icns` crates, so the
//! tool also runs where those utilities do not exist.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use icns::{IconFamily, IconType};
use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageReader, RgbaImage};

use crate::error::ToolError;
use crate::sizes::{ICON_SIZES, SizeSpec};

/// The two capabilities icon generation needs.
pub trait Toolchain {
    /// Write `input` resized to `pixels`x`pixels` as a PNG at `output`.
    fn scale(&mut self, input: &Path, pixels: u32, output: &Path) -> Result<(), ToolError>;

    /// Compile the iconset directory into an `.icns` file at `output`.
    fn compile(&mut self, iconset: &Path, output: &Path) -> Result<(), ToolError>;
}

/// Which toolchain the CLI drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// macOS `sips` + `iconutil`
    System,
    /// Built-in resizer and `.icns` writer
    Native,
}

impl Backend {
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Backend::System
        } else {
            Backend::Native
        }
    }
}

pub const DEFAULT_SCALER: &str = "sips";
pub const DEFAULT_COMPILER: &str = "iconutil";

#[derive(Debug, Clone)]
pub struct SystemTools {
    pub scaler: String,
    pub compiler: String,
}

impl Default for SystemTools {
    fn default() -> Self {
        Self {
            scaler: DEFAULT_SCALER.to_string(),
            compiler: DEFAULT_COMPILER.to_string(),
        }
    }
}

impl SystemTools {
    pub fn new(scaler: impl Into<String>, compiler: impl Into<String>) -> Self {
        Self {
            scaler: scaler.into(),
            compiler: compiler.into(),
        }
    }
}

impl Toolchain for SystemTools {
    fn scale(&mut self, input: &Path, pixels: u32, output: &Path) -> Result<(), ToolError> {
        let px = pixels.to_string();
        let args: Vec<OsString> = vec![
            "-z".into(),
            px.clone().into(),
            px.into(),
            input.into(),
            "--out".into(),
            output.into(),
        ];
        run(&self.scaler, &args)
    }

    fn compile(&mut self, iconset: &Path, output: &Path) -> Result<(), ToolError> {
        let args: Vec<OsString> = vec![
            "-c".into(),
            "icns".into(),
            iconset.into(),
            "-o".into(),
            output.into(),
        ];
        run(&self.compiler, &args)
    }
}

fn run(program: &str, args: &[OsString]) -> Result<(), ToolError> {
    tracing::debug!(
        "RUN: {} {}",
        program,
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ToolError::Launch {
            program: program.to_string(),
            source,
        })?;
    if output.status.success() {
        return Ok(());
    }
    Err(ToolError::Failed {
        program: program.to_string(),
        status: output.status.to_string(),
        diagnostic: diagnostic(&output),
    })
}

/// Prefer stderr; some tools only report on stdout.
fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// In-process backend. The decoded source is kept between `scale` calls so
/// the input is read once per run.
#[derive(Debug, Default)]
pub struct NativeTools {
    source: Option<(PathBuf, RgbaImage)>,
}

impl NativeTools {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&mut self, input: &Path) -> Result<&RgbaImage, ToolError> {
        let img = match self.source.take() {
            Some((path, img)) if path == input => img,
            _ => decode(input)?,
        };
        let (_, img) = self.source.insert((input.to_path_buf(), img));
        Ok(img)
    }
}

fn decode(input: &Path) -> Result<RgbaImage, ToolError> {
    let io_err = |source| ToolError::Io {
        path: input.to_path_buf(),
        source,
    };
    let decoded = ImageReader::open(input)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()?;
    tracing::debug!(
        "decoded {} ({}x{})",
        input.display(),
        decoded.width(),
        decoded.height()
    );
    Ok(decoded.to_rgba8())
}

impl Toolchain for NativeTools {
    fn scale(&mut self, input: &Path, pixels: u32, output: &Path) -> Result<(), ToolError> {
        let src = self.load(input)?;
        let resized = if src.width() == pixels && src.height() == pixels {
            src.clone()
        } else {
            imageops::resize(src, pixels, pixels, FilterType::Lanczos3)
        };
        resized.save_with_format(output, ImageFormat::Png)?;
        Ok(())
    }

    fn compile(&mut self, iconset: &Path, output: &Path) -> Result<(), ToolError> {
        let mut family = IconFamily::new();
        for spec in &ICON_SIZES {
            let path = iconset.join(spec.file_name);
            let io_err = |source| ToolError::Io {
                path: path.clone(),
                source,
            };
            let file = File::open(&path).map_err(io_err)?;
            let image = icns::Image::read_png(BufReader::new(file)).map_err(io_err)?;
            if image.width() != spec.pixels || image.height() != spec.pixels {
                return Err(ToolError::Mismatch {
                    file: spec.file_name.to_string(),
                    expected: spec.pixels,
                    width: image.width(),
                    height: image.height(),
                });
            }
            family
                .add_icon_with_type(&image, icon_type(spec))
                .map_err(io_err)?;
        }

        let io_err = |source| ToolError::Io {
            path: output.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(output).map_err(io_err)?);
        family.write(&mut writer).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        tracing::debug!("wrote {} icon entries to {}", ICON_SIZES.len(), output.display());
        Ok(())
    }
}

fn icon_type(spec: &SizeSpec) -> IconType {
    match (spec.points(), spec.scale()) {
        (16, 1) => IconType::RGBA32_16x16,
        (16, _) => IconType::RGBA32_16x16_2x,
        (32, 1) => IconType::RGBA32_32x32,
        (32, _) => IconType::RGBA32_32x32_2x,
        (128, 1) => IconType::RGBA32_128x128,
        (128, _) => IconType::RGBA32_128x128_2x,
        (256, 1) => IconType::RGBA32_256x256,
        (256, _) => IconType::RGBA32_256x256_2x,
        (512, 1) => IconType::RGBA32_512x512,
        _ => IconType::RGBA32_512x512_2x,
    }
}
