//! Drawing the fitted ellipse over the source image

use crate::geometry::ellipse::Ellipse;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

// Dense enough that consecutive stamps overlap for any thickness
const SAMPLE_SPACING: f64 = 0.5;

/// Return `canvas` with the ellipse outline drawn on it
pub fn draw_ellipse_overlay(
    mut canvas: RgbImage,
    ellipse: &Ellipse,
    color: [u8; 3],
    thickness: u32,
) -> RgbImage {
    trace_ellipse_mut(&mut canvas, ellipse, Rgb(color), thickness);
    canvas
}

/// Stroke a possibly rotated ellipse outline in place
///
/// The outline is sampled along the boundary and each sample is stamped with
/// a pixel-centered disc of radius `thickness / 2`. The stroke is therefore
/// `2 * (thickness / 2) + 1` pixels wide: odd thicknesses are exact and even
/// ones round up to the next odd width. Parts outside the canvas are
/// clipped. A thickness of zero draws nothing.
pub fn trace_ellipse_mut(canvas: &mut RgbImage, ellipse: &Ellipse, color: Rgb<u8>, thickness: u32) {
    if thickness == 0 {
        return;
    }
    let radius = stamp_radius(thickness);

    for [x, y] in ellipse.sample_boundary(SAMPLE_SPACING) {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        draw_filled_circle_mut(canvas, (x.round() as i32, y.round() as i32), radius, color);
    }
}

/// Width in pixels of the stroke drawn for a given `thickness`
pub const fn stroke_width(thickness: u32) -> u32 {
    if thickness == 0 {
        0
    } else {
        2 * (thickness / 2) + 1
    }
}

const fn stamp_radius(thickness: u32) -> i32 {
    (thickness / 2) as i32
}
