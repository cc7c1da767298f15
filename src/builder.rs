//! Icon build pipeline: validate, render every size, compile, clean up.
//!
//! The builder owns no state between runs. Each call to [`IconBuilder::build`]
//! creates the working iconset, fills it through a [`Toolchain`], compiles it
//! and removes it again whatever the outcome.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::iconset::{DEFAULT_ICONSET_DIR, IconSet};
use crate::sizes::ICON_SIZES;
use crate::toolchain::Toolchain;

/// Per-run settings that are not part of the toolchain.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Working directory the renditions are written to.
    pub iconset_dir: PathBuf,
    /// Suppress progress lines on stdout.
    pub quiet: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            iconset_dir: PathBuf::from(DEFAULT_ICONSET_DIR),
            quiet: false,
        }
    }
}

impl BuildOptions {
    /// Defaults with progress output suppressed.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Default::default()
        }
    }
}

pub struct IconBuilder<T: Toolchain> {
    tools: T,
    options: BuildOptions,
}

impl<T: Toolchain> IconBuilder<T> {
    pub fn new(tools: T, options: BuildOptions) -> Self {
        Self { tools, options }
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    fn progress(&self, line: &str) {
        if !self.options.quiet {
            println!("{}", line);
        }
    }

    /// Generate `output` from `input`. Returns the output path on success.
    ///
    /// Fails with `InputMissing` before touching the filesystem when `input`
    /// is not a file. A failed rendition stops the run immediately; neither
    /// later sizes nor the compile step are attempted. The iconset directory
    /// never outlives this call.
    pub fn build(&mut self, input: &Path, output: &Path) -> Result<PathBuf, BuildError> {
        if !input.is_file() {
            return Err(BuildError::InputMissing(input.to_path_buf()));
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| BuildError::io("create output directory", parent, e))?;
        }

        let iconset = IconSet::create(&self.options.iconset_dir)?;

        self.progress("🎨 Generating app icon...");
        self.progress(&format!("📥 Input image: {}", input.display()));
        self.progress("📐 Generating icon sizes...");
        tracing::info!("rendering {} sizes into {}", ICON_SIZES.len(), iconset.path().display());

        for spec in &ICON_SIZES {
            let target = iconset.entry(spec);
            tracing::debug!("rendering {} at {}px", spec.file_name, spec.pixels);
            self.tools
                .scale(input, spec.pixels, &target)
                .map_err(|source| BuildError::Rendition {
                    file: spec.file_name.to_string(),
                    source,
                })?;
        }
        self.progress("✅ Generated all icon sizes");

        self.progress("🔨 Generating .icns file...");
        tracing::info!("compiling {} -> {}", iconset.path().display(), output.display());
        let compiled = self.tools.compile(iconset.path(), output);

        if let Err(e) = iconset.remove() {
            tracing::warn!("failed to remove iconset: {}", e);
        }

        compiled.map_err(|source| BuildError::Compile { source })?;

        self.progress("✅ Icon generated successfully!");
        self.progress(&format!("📦 Output file: {}", output.display()));
        Ok(output.to_path_buf())
    }
}

/// Boolean form of [`IconBuilder::build`]: prints the failure and reports
/// whether an icon was produced.
pub fn generate_icon<T: Toolchain>(
    tools: T,
    input: &Path,
    output: &Path,
    options: BuildOptions,
) -> bool {
    match IconBuilder::new(tools, options).build(input, output) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("❌ {}", e);
            false
        }
    }
}
