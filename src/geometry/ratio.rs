//! Axis ratio of a fitted ellipse and its threshold classification

use crate::geometry::ellipse::Ellipse;
use std::fmt;

/// Warning emitted when the minor axis collapses to zero
pub const DEGENERATE_WARNING: &str = "Warning: Minor axis is zero. Cannot calculate a meaningful axis ratio. \
     This may indicate a highly elongated or degenerate ellipse fit.";

/// Longer-to-shorter axis ratio, or the marker for a zero-width fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// `major / minor`, always at least 1
    Finite(f64),
    /// The minor axis is zero, so no ratio exists
    Degenerate,
}

impl Ratio {
    /// Ratio of the longer to the shorter of two axis lengths
    pub const fn from_axes(first: f64, second: f64) -> Self {
        let (shorter, longer) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };

        if shorter <= 0.0 {
            Self::Degenerate
        } else {
            Self::Finite(longer / shorter)
        }
    }

    /// Ratio of a fitted ellipse's axes
    pub const fn of(ellipse: &Ellipse) -> Self {
        Self::from_axes(ellipse.major_axis(), ellipse.minor_axis())
    }

    /// Numeric ratio, absent for a degenerate fit
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Finite(value) => Some(value),
            Self::Degenerate => None,
        }
    }

    /// Whether the ratio could not be computed
    pub const fn is_degenerate(self) -> bool {
        matches!(self, Self::Degenerate)
    }

    /// Whether the ratio lies strictly above `threshold`
    ///
    /// A degenerate ratio is unbounded and exceeds every threshold.
    pub const fn exceeds(self, threshold: f64) -> bool {
        match self {
            Self::Finite(value) => value > threshold,
            Self::Degenerate => true,
        }
    }

    /// Classify the shape against `threshold`
    pub const fn classify(self, threshold: f64) -> Classification {
        if self.exceeds(threshold) {
            Classification::PossibleAstigmatism
        } else {
            Classification::NoSignificantAstigmatism
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{value:.2}"),
            Self::Degenerate => write!(f, "inf"),
        }
    }
}

/// Interpretation of the axis ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The outline is markedly elliptical
    PossibleAstigmatism,
    /// The outline is close to circular
    NoSignificantAstigmatism,
}

impl Classification {
    /// One-line verdict
    pub const fn headline(self) -> &'static str {
        match self {
            Self::PossibleAstigmatism => "Possible Astigmatism Detected.",
            Self::NoSignificantAstigmatism => "No Significant Astigmatism Indicated by Shape Ratio.",
        }
    }

    /// Description of the observed shape
    pub const fn detail(self) -> &'static str {
        match self {
            Self::PossibleAstigmatism => "The cornea's shape appears significantly elliptical.",
            Self::NoSignificantAstigmatism => {
                "The cornea's shape appears relatively spherical or mildly elliptical."
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}
