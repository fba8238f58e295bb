//! Geometric descriptors derived from the selected contour

/// Ellipse descriptor and least-squares fitting
pub mod ellipse;
/// Axis ratio and astigmatism classification
pub mod ratio;
