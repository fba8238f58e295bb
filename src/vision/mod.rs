//! Raster processing stages from decoded image to candidate contours

/// External contour tracing and largest-area selection
pub mod contours;
/// Grayscale conversion, smoothing and edge detection
pub mod preprocess;
