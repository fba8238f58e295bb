//! Grayscale conversion, fixed-kernel smoothing and Canny edge detection

use crate::io::configuration::BLUR_KERNEL;
use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;

/// Intensity value marking an edge pixel in the edge map
pub const EDGE_VALUE: u8 = 255;

/// Reduce any decoded image to a single luma channel
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Smooth the grayscale raster with the separable 7×7 Gaussian kernel
///
/// Suppresses pixel noise that would otherwise fragment edges into
/// many small contours. Borders are clamped to the nearest pixel.
pub fn suppress_noise(gray: &GrayImage) -> GrayImage {
    separable_filter_equal(gray, &BLUR_KERNEL)
}

/// Binary edge map from a two-threshold (hysteresis) Canny detector
///
/// Pixels whose gradient magnitude exceeds `high` seed edges; pixels above
/// `low` are kept only when connected to a seed. Edge pixels are
/// [`EDGE_VALUE`], everything else is zero.
pub fn detect_edges(blurred: &GrayImage, low: f32, high: f32) -> GrayImage {
    canny(blurred, low, high)
}

/// Number of edge pixels in a binary edge map
pub fn edge_pixel_count(edges: &GrayImage) -> usize {
    edges.pixels().filter(|pixel| pixel.0[0] > 0).count()
}
