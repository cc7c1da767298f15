//! The fixed table of renditions a macOS iconset must contain.
//!
//! Every iconset holds five nominal sizes (16, 32, 128, 256 and 512 points),
//! each at 1x and 2x density. File names follow the `icon_<n>x<n>[@2x].png`
//! convention that `iconutil` expects; the pixel dimension of a `@2x` entry
//! is twice its nominal size.

/// One required rendition: a square pixel dimension and the file name it is
/// stored under inside the iconset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub pixels: u32,
    pub file_name: &'static str,
}

impl SizeSpec {
    const fn new(pixels: u32, file_name: &'static str) -> Self {
        Self { pixels, file_name }
    }

    /// Density encoded in the file name: 2 for `@2x` entries, 1 otherwise.
    pub fn scale(&self) -> u32 {
        if self.file_name.contains("@2x") { 2 } else { 1 }
    }

    /// Nominal point size, i.e. `pixels / scale`.
    pub fn points(&self) -> u32 {
        self.pixels / self.scale()
    }
}

/// Required renditions, in the order they are generated.
pub const ICON_SIZES: [SizeSpec; 10] = [
    SizeSpec::new(16, "icon_16x16.png"),
    SizeSpec::new(32, "icon_16x16@2x.png"),
    SizeSpec::new(32, "icon_32x32.png"),
    SizeSpec::new(64, "icon_32x32@2x.png"),
    SizeSpec::new(128, "icon_128x128.png"),
    SizeSpec::new(256, "icon_128x128@2x.png"),
    SizeSpec::new(256, "icon_256x256.png"),
    SizeSpec::new(512, "icon_256x256@2x.png"),
    SizeSpec::new(512, "icon_512x512.png"),
    SizeSpec::new(1024, "icon_512x512@2x.png"),
];
