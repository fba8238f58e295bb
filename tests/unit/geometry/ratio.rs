//! Tests for the axis ratio and its classification

#[cfg(test)]
mod tests {
    use corneafit::geometry::ellipse::Ellipse;
    use corneafit::geometry::ratio::{Classification, DEGENERATE_WARNING, Ratio};
    use corneafit::io::configuration::DEFAULT_RATIO_THRESHOLD;

    // Tests the ratio is longer over shorter regardless of argument order
    // Verified by dividing first by second
    #[test]
    fn test_ratio_is_order_independent() {
        assert_eq!(Ratio::from_axes(120.0, 180.0), Ratio::Finite(1.5));
        assert_eq!(Ratio::from_axes(180.0, 120.0), Ratio::Finite(1.5));
        assert_eq!(Ratio::from_axes(40.0, 40.0).value(), Some(1.0));
    }

    // Tests a zero minor axis gives a degenerate ratio, never infinity or NaN
    // Verified by dividing through the zero axis
    #[test]
    fn test_zero_minor_axis_is_degenerate() {
        let ratio = Ratio::of(&Ellipse::new([0.0, 0.0], 25.0, 0.0, 0.0));

        assert!(ratio.is_degenerate());
        assert_eq!(ratio.value(), None);
        assert_eq!(ratio.to_string(), "inf");
        assert_eq!(Ratio::from_axes(0.0, 0.0), Ratio::Degenerate);
        assert!(DEGENERATE_WARNING.starts_with("Warning: Minor axis is zero."));
    }

    // Tests the threshold comparison is strict on both sides of 1.1
    // Verified by changing > to >=
    #[test]
    fn test_threshold_boundary() {
        let threshold = DEFAULT_RATIO_THRESHOLD;

        assert_eq!(
            Ratio::Finite(1.099).classify(threshold),
            Classification::NoSignificantAstigmatism
        );
        assert_eq!(
            Ratio::Finite(1.1).classify(threshold),
            Classification::NoSignificantAstigmatism
        );
        assert_eq!(
            Ratio::Finite(1.101).classify(threshold),
            Classification::PossibleAstigmatism
        );
    }

    // Tests a degenerate ratio counts as markedly elliptical
    // Verified by treating Degenerate as below threshold
    #[test]
    fn test_degenerate_classifies_as_possible_astigmatism() {
        assert!(Ratio::Degenerate.exceeds(1_000.0));
        assert_eq!(
            Ratio::Degenerate.classify(DEFAULT_RATIO_THRESHOLD),
            Classification::PossibleAstigmatism
        );
    }

    // Tests two-decimal display and the interpretation texts
    // Verified by printing three decimals
    #[test]
    fn test_display_and_interpretation_text() {
        assert_eq!(Ratio::Finite(4.0 / 3.0).to_string(), "1.33");
        assert_eq!(Ratio::Finite(1.005).to_string(), "1.00");

        let possible = Classification::PossibleAstigmatism;
        assert_eq!(possible.to_string(), "Possible Astigmatism Detected.");
        assert_eq!(
            possible.detail(),
            "The cornea's shape appears significantly elliptical."
        );

        let none = Classification::NoSignificantAstigmatism;
        assert_eq!(
            none.headline(),
            "No Significant Astigmatism Indicated by Shape Ratio."
        );
        assert!(none.detail().contains("relatively spherical"));
    }
}
