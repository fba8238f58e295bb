//! Pipeline constants and runtime configuration defaults

// Noise suppression
/// Separable 7-tap Gaussian kernel applied in both directions (binomial weights / 64)
pub const BLUR_KERNEL: [f32; 7] = [
    0.031_25, 0.109_375, 0.218_75, 0.281_25, 0.218_75, 0.109_375, 0.031_25,
];

// Edge detection hysteresis thresholds on gradient magnitude
/// Default lower Canny threshold
pub const DEFAULT_CANNY_LOW: f32 = 30.0;
/// Default upper Canny threshold
pub const DEFAULT_CANNY_HIGH: f32 = 150.0;

// Fitting a general conic needs five independent points
/// Minimum number of contour points eligible for ellipse fitting
pub const MIN_ELLIPSE_POINTS: usize = 5;

// Simplified heuristic, not a calibrated clinical value
/// Default axis ratio above which astigmatism is suggested
pub const DEFAULT_RATIO_THRESHOLD: f64 = 1.1;

// Overlay rendering
/// Color of the fitted ellipse drawn over the source image
pub const OVERLAY_COLOR: [u8; 3] = [0, 255, 0];
/// Line thickness of the fitted ellipse; even values draw one pixel wider
pub const OVERLAY_THICKNESS: u32 = 2;

// Input selection
/// File extensions offered by the image prompt
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

// Progress bar display settings
/// Width of the stage progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

/// Tunable parameters for a single analysis run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Lower hysteresis threshold of the edge detector
    pub canny_low: f32,
    /// Upper hysteresis threshold of the edge detector
    pub canny_high: f32,
    /// Axis ratio strictly above which the shape is flagged
    pub ratio_threshold: f64,
    /// RGB color of the overlay ellipse
    pub overlay_color: [u8; 3],
    /// Overlay line thickness in pixels
    pub overlay_thickness: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canny_low: DEFAULT_CANNY_LOW,
            canny_high: DEFAULT_CANNY_HIGH,
            ratio_threshold: DEFAULT_RATIO_THRESHOLD,
            overlay_color: OVERLAY_COLOR,
            overlay_thickness: OVERLAY_THICKNESS,
        }
    }
}

impl PipelineConfig {
    /// Check that thresholds are usable before any image work starts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either Canny threshold is negative or not finite
    /// - The lower Canny threshold exceeds the upper one
    /// - The ratio threshold is below 1 or not finite
    pub fn validate(&self) -> crate::io::error::Result<()> {
        use crate::io::error::invalid_parameter;

        if !self.canny_low.is_finite() || self.canny_low < 0.0 {
            return Err(invalid_parameter(
                "canny_low",
                &self.canny_low,
                &"must be a finite, non-negative number",
            ));
        }
        if !self.canny_high.is_finite() || self.canny_high < 0.0 {
            return Err(invalid_parameter(
                "canny_high",
                &self.canny_high,
                &"must be a finite, non-negative number",
            ));
        }
        if self.canny_low > self.canny_high {
            return Err(invalid_parameter(
                "canny_low",
                &self.canny_low,
                &format!("must not exceed canny_high ({})", self.canny_high),
            ));
        }
        if !self.ratio_threshold.is_finite() || self.ratio_threshold < 1.0 {
            return Err(invalid_parameter(
                "threshold",
                &self.ratio_threshold,
                &"must be a finite ratio of at least 1.0",
            ));
        }
        Ok(())
    }
}
