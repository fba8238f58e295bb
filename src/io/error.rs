//! Error types for the analysis pipeline and its entry point

use crate::analysis::pipeline::Rendering;
use image::{DynamicImage, GrayImage, RgbImage};
use std::fmt;
use std::path::PathBuf;

/// Title shown with the original image when no contour was found
pub const NO_CONTOURS_TITLE: &str = "Original Image (No Contours Found)";
/// Title shown with the edge map when the largest contour is too small
pub const INSUFFICIENT_POINTS_TITLE: &str = "Edges Detected (Insufficient Points for Ellipse Fit)";

/// Main error type for all analysis operations
///
/// Every variant is terminal for the run. A degenerate ellipse is not an
/// error; it surfaces as [`crate::geometry::ratio::Ratio::Degenerate`].
#[derive(Debug)]
pub enum AnalysisError {
    /// The user dismissed the prompt without choosing an image
    NoSelection,

    /// Failed to read or decode the source image
    ImageLoad {
        /// Selected path, or `<memory>` for in-memory bytes
        path: PathBuf,
        /// Decoder or file open failure
        source: image::ImageError,
    },

    /// The edge map contains no outer boundary
    NoContours {
        /// Source image, shown in place of the overlay
        original: RgbImage,
    },

    /// The largest contour cannot constrain an ellipse
    InsufficientContourPoints {
        /// Number of points in the largest contour
        found: usize,
        /// Minimum number of points needed
        required: usize,
        /// Edge map, shown in place of the overlay
        edges: GrayImage,
    },

    /// A threshold given on the command line is unusable
    InvalidParameter {
        /// Argument name as used in the configuration
        parameter: &'static str,
        /// Value as given
        value: String,
        /// Accepted range
        reason: String,
    },

    /// Failed to save a rendering to disk
    ImageExport {
        /// Requested `--output` path
        path: PathBuf,
        /// Encoder or write failure
        source: image::ImageError,
    },

    /// Directory creation or console I/O failure
    FileSystem {
        /// Directory, or `<terminal>` / `<stdout>` for console streams
        path: PathBuf,
        /// What was being done, e.g. "read selection"
        operation: &'static str,
        /// Cause reported by the OS
        source: std::io::Error,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => write!(f, "No image selected. Exiting."),
            Self::ImageLoad { path, .. } => {
                write!(
                    f,
                    "Error: Could not load image from '{}'. \
                     Please check if the file exists and is a valid image format.",
                    path.display()
                )
            }
            Self::NoContours { .. } => {
                write!(
                    f,
                    "No contours found in the image. \
                     Ensure the image clearly shows the eye/cornea with good contrast."
                )
            }
            Self::InsufficientContourPoints { .. } => {
                write!(
                    f,
                    "Not enough points found in the largest contour to fit an ellipse. \
                     The contour might be too small, fragmented, or poorly detected."
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl AnalysisError {
    /// The image the run displays instead of an overlay, if any
    pub fn fallback(&self) -> Option<Rendering> {
        match self {
            Self::NoContours { original } => Some(Rendering {
                title: NO_CONTOURS_TITLE,
                image: DynamicImage::ImageRgb8(original.clone()),
            }),
            Self::InsufficientContourPoints { edges, .. } => Some(Rendering {
                title: INSUFFICIENT_POINTS_TITLE,
                image: DynamicImage::ImageLuma8(edges.clone()),
            }),
            _ => None,
        }
    }

    /// Whether the run ended without anything having gone wrong
    pub const fn is_clean_exit(&self) -> bool {
        matches!(self, Self::NoSelection)
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
