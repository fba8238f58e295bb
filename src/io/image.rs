//! Image decoding and rendering export

use crate::analysis::pipeline::Rendering;
use crate::io::error::{AnalysisError, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Decode the image file at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a supported image
/// format. The error carries `path` so the caller can report it.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| AnalysisError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Decode an in-memory encoded image, guessing the format from its contents
///
/// # Errors
///
/// Returns an error if the format is not recognised or the data is corrupt
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| AnalysisError::ImageLoad {
        path: PathBuf::from("<memory>"),
        source: e,
    })
}

/// Save a rendering, choosing the format from the file extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The extension does not name a supported output format
/// - The image cannot be written
pub fn export_rendering(rendering: &Rendering, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AnalysisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    rendering
        .image
        .save(output_path)
        .map_err(|e| AnalysisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// File name of `path` for display, falling back to the whole path
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
