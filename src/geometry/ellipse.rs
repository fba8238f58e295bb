//! Ellipse descriptor and least-squares ellipse fitting
//!
//! The fit works on centroid-normalized coordinates in two passes: a general
//! conic `a·u² + b·uv + c·v² + d·u + e·v = 1` locates the center through its
//! gradient, then the quadratic part is refit about that fixed center and
//! eigen-decomposed into axes and orientation. Collinear inputs yield a
//! degenerate ellipse with a zero minor axis instead of a failure.

use crate::io::configuration::MIN_ELLIPSE_POINTS;
use nalgebra::{DMatrix, DVector, Matrix2, SymmetricEigen};
use std::f64::consts::{PI, TAU};

// Singular values below this are treated as zero by the least-squares solves
const SVD_EPSILON: f64 = 1e-12;

// Relative spread below which a point set is considered a straight line
const COLLINEAR_TOLERANCE: f64 = 1e-9;

// Hard cap on boundary samples so a runaway fit cannot stall rendering
const MAX_BOUNDARY_SAMPLES: usize = 20_000;
const MIN_BOUNDARY_SAMPLES: usize = 8;

/// Fitted ellipse: center, full axis lengths and orientation
///
/// Axis lengths are diameters in pixels with `major >= minor`. The angle is
/// the direction of the major axis in degrees within `[0, 180)`, measured
/// from +x toward +y in image coordinates (clockwise on screen).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    center: [f64; 2],
    major: f64,
    minor: f64,
    angle: f64,
}

impl Ellipse {
    /// Build an ellipse from two axis lengths in any order
    ///
    /// `angle_degrees` is the direction of `first_axis`. When `second_axis`
    /// is the longer one the angle is turned by 90° so that it always
    /// describes the major axis.
    pub fn new(center: [f64; 2], first_axis: f64, second_axis: f64, angle_degrees: f64) -> Self {
        let (major, minor, angle) = if first_axis >= second_axis {
            (first_axis, second_axis, angle_degrees)
        } else {
            (second_axis, first_axis, angle_degrees + 90.0)
        };

        Self {
            center,
            major,
            minor,
            angle: normalize_angle(angle),
        }
    }

    /// Center `[x, y]` in pixel coordinates
    pub const fn center(&self) -> [f64; 2] {
        self.center
    }

    /// Length of the longer axis in pixels
    pub const fn major_axis(&self) -> f64 {
        self.major
    }

    /// Length of the shorter axis in pixels
    pub const fn minor_axis(&self) -> f64 {
        self.minor
    }

    /// Major axis direction in degrees within `[0, 180)`
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Whether the fit collapsed onto a line segment or a point
    pub const fn is_degenerate(&self) -> bool {
        self.minor <= 0.0
    }

    /// Point on the boundary at eccentric anomaly `t` radians
    pub fn boundary_point(&self, t: f64) -> [f64; 2] {
        let (sin_t, cos_t) = t.sin_cos();
        let (sin_a, cos_a) = self.angle.to_radians().sin_cos();
        let (a, b) = (self.major / 2.0, self.minor / 2.0);

        [
            (a * cos_a).mul_add(cos_t, -(b * sin_a * sin_t)) + self.center[0],
            (a * sin_a).mul_add(cos_t, b * cos_a * sin_t) + self.center[1],
        ]
    }

    /// Approximate circumference (Ramanujan's second-order formula)
    pub fn perimeter(&self) -> f64 {
        let (a, b) = (self.major / 2.0, self.minor / 2.0);
        let root = (3.0f64.mul_add(a, b) * 3.0f64.mul_add(b, a)).sqrt();
        PI * (3.0 * (a + b) - root)
    }

    /// Points along the boundary no further apart than `spacing` pixels
    pub fn sample_boundary(&self, spacing: f64) -> Vec<[f64; 2]> {
        let wanted = if spacing > 0.0 && self.perimeter().is_finite() {
            (self.perimeter() / spacing).ceil() as usize
        } else {
            MAX_BOUNDARY_SAMPLES
        };
        let count = wanted.clamp(MIN_BOUNDARY_SAMPLES, MAX_BOUNDARY_SAMPLES);

        (0..count)
            .map(|k| self.boundary_point(TAU * k as f64 / count as f64))
            .collect()
    }
}

fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(180.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 180.0 { 0.0 } else { wrapped }
}

/// Fit an ellipse to boundary points
///
/// Returns `None` only when fewer than [`MIN_ELLIPSE_POINTS`] points are
/// given. Any larger point set yields some ellipse:
/// - collinear or coincident points give a degenerate ellipse spanning the
///   points with a minor axis of exactly zero
/// - when the algebraic conic is not an ellipse, the second-moment ellipse
///   of the points is returned instead
pub fn fit_ellipse(points: &[[f64; 2]]) -> Option<Ellipse> {
    if points.len() < MIN_ELLIPSE_POINTS {
        return None;
    }

    let moments = Moments::of(points);
    if moments.is_collinear() {
        return Some(moments.segment_ellipse(points));
    }

    Some(fit_conic(points, &moments).unwrap_or_else(|| moments.ellipse()))
}

/// Centroid and covariance of a point set
#[derive(Debug, Clone, Copy)]
struct Moments {
    mean: [f64; 2],
    xx: f64,
    xy: f64,
    yy: f64,
}

impl Moments {
    fn of(points: &[[f64; 2]]) -> Self {
        let n = points.len() as f64;
        let (sum_x, sum_y) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        let mean = [sum_x / n, sum_y / n];

        let (xx, xy, yy) = points.iter().fold((0.0, 0.0, 0.0), |(xx, xy, yy), p| {
            let (dx, dy) = (p[0] - mean[0], p[1] - mean[1]);
            (dx.mul_add(dx, xx), dx.mul_add(dy, xy), dy.mul_add(dy, yy))
        });

        Self {
            mean,
            xx: xx / n,
            xy: xy / n,
            yy: yy / n,
        }
    }

    /// Eigenvalues (larger, smaller) of the covariance matrix
    fn principal_variances(&self) -> (f64, f64) {
        let half_trace = (self.xx + self.yy) / 2.0;
        let spread = ((self.xx - self.yy) / 2.0).hypot(self.xy);
        (half_trace + spread, (half_trace - spread).max(0.0))
    }

    /// Direction of largest variance in radians
    fn principal_direction(&self) -> f64 {
        0.5 * (2.0 * self.xy).atan2(self.xx - self.yy)
    }

    fn is_collinear(&self) -> bool {
        let (large, small) = self.principal_variances();
        large <= 0.0 || small <= COLLINEAR_TOLERANCE * large
    }

    /// Zero-width ellipse covering the extent of the points along the principal axis
    fn segment_ellipse(&self, points: &[[f64; 2]]) -> Ellipse {
        let theta = self.principal_direction();
        let (sin_t, cos_t) = theta.sin_cos();

        let (low, high) = points
            .iter()
            .map(|p| (p[0] - self.mean[0]).mul_add(cos_t, (p[1] - self.mean[1]) * sin_t))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t), hi.max(t))
            });

        let middle = (low + high) / 2.0;
        Ellipse::new(
            [
                middle.mul_add(cos_t, self.mean[0]),
                middle.mul_add(sin_t, self.mean[1]),
            ],
            high - low,
            0.0,
            theta.to_degrees(),
        )
    }

    /// Ellipse with the same second moments as points spread evenly along its boundary
    fn ellipse(&self) -> Ellipse {
        let (large, small) = self.principal_variances();
        Ellipse::new(
            self.mean,
            (8.0 * large).sqrt(),
            (8.0 * small).sqrt(),
            self.principal_direction().to_degrees(),
        )
    }
}

fn fit_conic(points: &[[f64; 2]], moments: &Moments) -> Option<Ellipse> {
    let n = points.len();

    // Scale so that the RMS distance from the centroid is one
    let rms = (moments.xx + moments.yy).sqrt();
    if !rms.is_normal() {
        return None;
    }
    let scale = rms.recip();

    let normalized: Vec<(f64, f64)> = points
        .iter()
        .map(|p| {
            (
                (p[0] - moments.mean[0]) * scale,
                (p[1] - moments.mean[1]) * scale,
            )
        })
        .collect();

    let ones = DVector::from_element(n, 1.0);

    let general = DMatrix::from_row_iterator(
        n,
        5,
        normalized
            .iter()
            .flat_map(|&(u, v)| [u * u, u * v, v * v, u, v]),
    );
    let solution = general.svd(true, true).solve(&ones, SVD_EPSILON).ok()?;
    let [a, b, c, d, e] = <[f64; 5]>::try_from(solution.as_slice()).ok()?;

    // Center where the conic gradient vanishes
    let det = (4.0 * a).mul_add(c, -(b * b));
    if !det.is_finite() || det <= SVD_EPSILON {
        return None;
    }
    let u0 = b.mul_add(e, -(2.0 * c * d)) / det;
    let v0 = b.mul_add(d, -(2.0 * a * e)) / det;

    let centered = DMatrix::from_row_iterator(
        n,
        3,
        normalized.iter().flat_map(|&(u, v)| {
            let (du, dv) = (u - u0, v - v0);
            [du * du, du * dv, dv * dv]
        }),
    );
    let quadratic = centered.svd(true, true).solve(&ones, SVD_EPSILON).ok()?;
    let [p, q, r] = <[f64; 3]>::try_from(quadratic.as_slice()).ok()?;

    let form = Matrix2::new(p, q / 2.0, q / 2.0, r);
    let eigen = SymmetricEigen::new(form);
    let (small, large, major_index) = if eigen.eigenvalues.x <= eigen.eigenvalues.y {
        (eigen.eigenvalues.x, eigen.eigenvalues.y, 0)
    } else {
        (eigen.eigenvalues.y, eigen.eigenvalues.x, 1)
    };
    if !(small.is_finite() && large.is_finite()) || small <= 0.0 {
        return None;
    }

    let direction = eigen.eigenvectors.column(major_index).into_owned();
    let major = 2.0 / (small.sqrt() * scale);
    let minor = 2.0 / (large.sqrt() * scale);
    let center = [
        u0.mul_add(rms, moments.mean[0]),
        v0.mul_add(rms, moments.mean[1]),
    ];

    [center[0], center[1], major, minor]
        .iter()
        .all(|value| value.is_finite())
        .then(|| {
            Ellipse::new(
                center,
                major,
                minor,
                direction.y.atan2(direction.x).to_degrees(),
            )
        })
}
