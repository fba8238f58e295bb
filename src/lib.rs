//! Ellipse fitting of the outer eye contour as an astigmatism heuristic
//!
//! An eye image is reduced to a Canny edge map, the outermost contour with
//! the largest enclosed area is fitted with an ellipse, and the ratio of its
//! axes is compared against a fixed threshold. The ratio is a shape proxy,
//! not a calibrated clinical measurement.

#![forbid(unsafe_code)]

/// Pipeline orchestration, reports and overlay rendering
pub mod analysis;
/// Ellipse fitting and axis ratio classification
pub mod geometry;
/// Input/output operations, configuration and error handling
pub mod io;
/// Raster preprocessing and contour extraction
pub mod vision;

pub use analysis::pipeline::{AnalysisReport, AstigmatismAnalyzer, analyze};
pub use io::error::{AnalysisError, Result};
