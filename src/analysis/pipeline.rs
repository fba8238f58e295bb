//! Linear analysis pipeline from decoded image to classified ellipse
//!
//! Each stage consumes the previous stage's output only. The pipeline never
//! blocks or displays anything: the image a run would show is returned as a
//! [`Rendering`], either inside the [`AnalysisReport`] or as the fallback of
//! the terminating [`AnalysisError`].

use crate::analysis::overlay::draw_ellipse_overlay;
use crate::geometry::ellipse::{Ellipse, fit_ellipse};
use crate::geometry::ratio::{Classification, Ratio};
use crate::io::configuration::{MIN_ELLIPSE_POINTS, PipelineConfig};
use crate::io::error::{AnalysisError, Result};
use crate::io::image::{decode_image, load_image};
use crate::vision::contours::{extract_external_contours, largest_contour};
use crate::vision::preprocess::{detect_edges, edge_pixel_count, suppress_noise, to_grayscale};
use image::{DynamicImage, RgbImage};
use std::path::Path;
use tracing::{debug, info, warn};

/// Title shown with the annotated result
pub const RESULT_TITLE: &str = "Ellipse Fit of Cornea";

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading and decoding the image file
    Decode,
    /// Reducing to a single luma channel
    Grayscale,
    /// 7×7 Gaussian smoothing
    Blur,
    /// Canny edge map
    EdgeDetection,
    /// Tracing outer boundaries
    ContourExtraction,
    /// Choosing the largest boundary and checking it can be fit
    ContourSelection,
    /// Least-squares ellipse fit
    EllipseFit,
    /// Axis ratio and threshold verdict
    Classification,
    /// Drawing the overlay
    Render,
}

impl Stage {
    /// Every stage in execution order
    pub const ALL: [Self; 9] = [
        Self::Decode,
        Self::Grayscale,
        Self::Blur,
        Self::EdgeDetection,
        Self::ContourExtraction,
        Self::ContourSelection,
        Self::EllipseFit,
        Self::Classification,
        Self::Render,
    ];

    /// Zero-based position in [`Stage::ALL`]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Short human-readable name
    pub const fn label(self) -> &'static str {
        match self {
            Self::Decode => "decoding image",
            Self::Grayscale => "converting to grayscale",
            Self::Blur => "suppressing noise",
            Self::EdgeDetection => "detecting edges",
            Self::ContourExtraction => "extracting contours",
            Self::ContourSelection => "selecting largest contour",
            Self::EllipseFit => "fitting ellipse",
            Self::Classification => "classifying axis ratio",
            Self::Render => "rendering overlay",
        }
    }
}

/// Receives notice of each stage as the pipeline enters it
pub trait StageObserver {
    /// Called once per stage, in order, before the stage runs
    fn stage_started(&mut self, stage: Stage);
}

/// Observer that ignores every stage
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl StageObserver for SilentObserver {
    fn stage_started(&mut self, _stage: Stage) {}
}

/// An image the run would have displayed, with its window title
#[derive(Debug, Clone)]
pub struct Rendering {
    /// Title describing what the image shows
    pub title: &'static str,
    /// Pixels to display or save
    pub image: DynamicImage,
}

/// Outcome of a successful analysis
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Ellipse fitted to the largest contour
    pub ellipse: Ellipse,
    /// Longer-to-shorter axis ratio
    pub ratio: Ratio,
    /// Verdict against the configured threshold
    pub classification: Classification,
    /// Number of points in the selected (compressed) contour
    pub contour_points: usize,
    /// Enclosed area of the selected contour in square pixels
    pub contour_area: f64,
    /// Source image with the ellipse drawn on it
    pub overlay: RgbImage,
}

impl AnalysisReport {
    /// The annotated result as a titled rendering
    pub fn rendering(&self) -> Rendering {
        Rendering {
            title: RESULT_TITLE,
            image: DynamicImage::ImageRgb8(self.overlay.clone()),
        }
    }

    /// Non-fatal warning raised while computing the ratio
    pub const fn warning(&self) -> Option<&'static str> {
        match self.ratio {
            Ratio::Degenerate => Some(crate::geometry::ratio::DEGENERATE_WARNING),
            Ratio::Finite(_) => None,
        }
    }
}

/// Runs the pipeline with a fixed configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct AstigmatismAnalyzer {
    config: PipelineConfig,
}

impl AstigmatismAnalyzer {
    /// Create an analyzer with the given configuration
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Configuration used for every run
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze an already decoded image
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The edge map contains no outer contour
    /// - The largest contour has fewer than five points
    pub fn analyze(&self, image: &DynamicImage) -> Result<AnalysisReport> {
        self.analyze_observed(image, &mut SilentObserver)
    }

    /// Decode the file at `path` and analyze it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or for any
    /// reason listed on [`AstigmatismAnalyzer::analyze`]
    pub fn analyze_path<O>(&self, path: &Path, observer: &mut O) -> Result<AnalysisReport>
    where
        O: StageObserver + ?Sized,
    {
        observer.stage_started(Stage::Decode);
        let image = load_image(path)?;
        self.run_stages(&image, observer)
    }

    /// Decode encoded image bytes and analyze them
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a supported image, or for any
    /// reason listed on [`AstigmatismAnalyzer::analyze`]
    pub fn analyze_bytes<O>(&self, bytes: &[u8], observer: &mut O) -> Result<AnalysisReport>
    where
        O: StageObserver + ?Sized,
    {
        observer.stage_started(Stage::Decode);
        let image = decode_image(bytes)?;
        self.run_stages(&image, observer)
    }

    /// Analyze a decoded image, reporting progress to `observer`
    ///
    /// # Errors
    ///
    /// Same conditions as [`AstigmatismAnalyzer::analyze`]
    pub fn analyze_observed<O>(&self, image: &DynamicImage, observer: &mut O) -> Result<AnalysisReport>
    where
        O: StageObserver + ?Sized,
    {
        observer.stage_started(Stage::Decode);
        self.run_stages(image, observer)
    }

    fn run_stages<O>(&self, image: &DynamicImage, observer: &mut O) -> Result<AnalysisReport>
    where
        O: StageObserver + ?Sized,
    {
        self.config.validate()?;
        debug!(width = image.width(), height = image.height(), "decoded image");
        let original = image.to_rgb8();

        observer.stage_started(Stage::Grayscale);
        let gray = to_grayscale(image);

        observer.stage_started(Stage::Blur);
        let blurred = suppress_noise(&gray);

        observer.stage_started(Stage::EdgeDetection);
        let edges = detect_edges(&blurred, self.config.canny_low, self.config.canny_high);
        debug!(
            edge_pixels = edge_pixel_count(&edges),
            low = self.config.canny_low,
            high = self.config.canny_high,
            "detected edges"
        );

        observer.stage_started(Stage::ContourExtraction);
        let contours = extract_external_contours(&edges);
        debug!(count = contours.len(), "extracted external contours");

        observer.stage_started(Stage::ContourSelection);
        let Some(largest) = largest_contour(&contours) else {
            return Err(AnalysisError::NoContours { original });
        };
        debug!(
            points = largest.len(),
            area = largest.area(),
            "selected largest contour"
        );
        if largest.len() < MIN_ELLIPSE_POINTS {
            return Err(AnalysisError::InsufficientContourPoints {
                found: largest.len(),
                required: MIN_ELLIPSE_POINTS,
                edges,
            });
        }

        observer.stage_started(Stage::EllipseFit);
        let Some(ellipse) = fit_ellipse(&largest.to_f64_points()) else {
            return Err(AnalysisError::InsufficientContourPoints {
                found: largest.len(),
                required: MIN_ELLIPSE_POINTS,
                edges,
            });
        };
        debug!(
            center_x = ellipse.center()[0],
            center_y = ellipse.center()[1],
            major = ellipse.major_axis(),
            minor = ellipse.minor_axis(),
            angle = ellipse.angle(),
            "fitted ellipse"
        );

        observer.stage_started(Stage::Classification);
        let ratio = Ratio::of(&ellipse);
        if ratio.is_degenerate() {
            warn!("minor axis is zero, axis ratio is undefined");
        }
        let classification = ratio.classify(self.config.ratio_threshold);

        observer.stage_started(Stage::Render);
        let overlay = draw_ellipse_overlay(
            original,
            &ellipse,
            self.config.overlay_color,
            self.config.overlay_thickness,
        );

        info!(%ratio, %classification, "analysis complete");

        Ok(AnalysisReport {
            ellipse,
            ratio,
            classification,
            contour_points: largest.len(),
            contour_area: largest.area(),
            overlay,
        })
    }
}

/// Analyze a decoded image with the default configuration
///
/// # Errors
///
/// Same conditions as [`AstigmatismAnalyzer::analyze`]
pub fn analyze(image: &DynamicImage) -> Result<AnalysisReport> {
    AstigmatismAnalyzer::default().analyze(image)
}
