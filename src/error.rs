//! Error types for icon generation.
//!
//! `ToolError` describes why a single scale or compile step failed inside a
//! backend. `BuildError` is what the builder reports: which phase failed and,
//! for renditions, which file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// The external program could not be started at all.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external program ran and exited unsuccessfully.
    #[error("`{program}` exited with {status}: {diagnostic}")]
    Failed {
        program: String,
        status: String,
        diagnostic: String,
    },

    /// The source image could not be decoded or a rendition not encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A rendition on disk does not have the dimensions its name promises.
    #[error("{file} is {width}x{height}, expected {expected}x{expected}")]
    Mismatch {
        file: String,
        expected: u32,
        width: u32,
        height: u32,
    },

    /// A rendition or output file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("File not found '{}'", .0.display())]
    InputMissing(PathBuf),

    #[error("Failed to generate {file}: {source}")]
    Rendition {
        file: String,
        #[source]
        source: ToolError,
    },

    #[error("Icon generation failed: {source}")]
    Compile {
        #[source]
        source: ToolError,
    },

    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
