//! Outer boundary extraction, chain compression and largest-area selection

use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;
use num_traits::ToPrimitive;

/// Closed boundary traced from an edge map, with its enclosed area
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point<i32>>,
    area: f64,
}

impl Contour {
    /// Build a contour from ordered boundary points, closing it implicitly
    pub fn new(points: Vec<Point<i32>>) -> Self {
        let area = polygon_area(&points);
        Self { points, area }
    }

    /// Ordered boundary points
    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    /// Absolute enclosed polygon area in square pixels
    pub const fn area(&self) -> f64 {
        self.area
    }

    /// Number of boundary points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no points at all
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as floating-point pixel coordinates for fitting
    pub fn to_f64_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|p| [f64::from(p.x), f64::from(p.y)])
            .collect()
    }
}

/// Trace the outermost boundaries of an edge map
///
/// Borders nested inside a hole of another component are ignored, as are
/// hole borders themselves. Each border is compressed with
/// [`compress_chain`]. Contours are returned in raster scan order of their
/// starting pixel, which makes selection among equal areas deterministic.
pub fn extract_external_contours(edges: &image::GrayImage) -> Vec<Contour> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer))
        .filter(|contour| contour.parent.is_none())
        .map(|contour| Contour::new(compress_chain(&contour.points)))
        .collect()
}

/// Drop intermediate points of horizontal, vertical and diagonal runs
///
/// A point is kept only where the step arriving at it differs from the
/// step leaving it, treating the chain as closed. Chains shorter than three
/// points are returned unchanged.
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let previous = points.iter().cycle().skip(n - 1);
    let next = points.iter().cycle().skip(1);

    let kept: Vec<Point<i32>> = points
        .iter()
        .zip(previous)
        .zip(next)
        .filter(|((current, prev), next)| step(prev, current) != step(current, next))
        .map(|((current, _), _)| *current)
        .collect();

    // A chain that only ever moves in one direction has no corner to keep
    if kept.is_empty() {
        points.iter().take(1).copied().collect()
    } else {
        kept
    }
}

const fn step(from: &Point<i32>, to: &Point<i32>) -> (i32, i32) {
    (to.x - from.x, to.y - from.y)
}

/// Enclosed area of a closed polygon by the shoelace formula
///
/// Orientation is ignored; fewer than three vertices enclose nothing.
pub fn polygon_area<T>(points: &[Point<T>]) -> f64
where
    T: ToPrimitive + Copy,
{
    if points.len() < 3 {
        return 0.0;
    }

    let twice_signed: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| {
            let (ax, ay) = (coordinate(a.x), coordinate(a.y));
            let (bx, by) = (coordinate(b.x), coordinate(b.y));
            ax.mul_add(by, -(bx * ay))
        })
        .sum();

    (twice_signed / 2.0).abs()
}

fn coordinate<T: ToPrimitive>(value: T) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// The contour with the largest enclosed area
///
/// Ties go to the contour encountered first.
pub fn largest_contour(contours: &[Contour]) -> Option<&Contour> {
    contours.iter().fold(None, |best, candidate| match best {
        Some(current) if current.area() >= candidate.area() => Some(current),
        _ => Some(candidate),
    })
}
