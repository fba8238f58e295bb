//! Tests for the console text of selections, results and failures

#[cfg(test)]
mod tests {
    use corneafit::analysis::pipeline::AnalysisReport;
    use corneafit::geometry::ellipse::Ellipse;
    use corneafit::geometry::ratio::{Classification, DEGENERATE_WARNING, Ratio};
    use corneafit::io::report::{write_failure, write_report, write_selection};
    use corneafit::AnalysisError;
    use image::RgbImage;
    use std::path::Path;

    fn report_for(ellipse: Ellipse) -> AnalysisReport {
        let ratio = Ratio::of(&ellipse);
        AnalysisReport {
            ellipse,
            ratio,
            classification: ratio.classify(1.1),
            contour_points: 42,
            contour_area: 1234.5,
            overlay: RgbImage::new(1, 1),
        }
    }

    fn written(write: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        write(&mut out).expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("report text is UTF-8")
    }

    // Tests the results block layout and two-decimal formatting
    // Verified by dropping the blank line before the header
    #[test]
    fn test_results_block() {
        let report = report_for(Ellipse::new([100.0, 50.5], 80.0, 60.0, 15.0));
        let text = written(|out| write_report(out, &report));

        let expected = "\n\
            --- Analysis Results ---\n\
            Center of Ellipse: (100.00, 50.50)\n\
            Major Axis Length: 80.00 pixels\n\
            Minor Axis Length: 60.00 pixels\n\
            Orientation Angle: 15.00 degrees\n\
            Axis Ratio (Major/Minor): 1.33\n\
            \n\
            Interpretation: Possible Astigmatism Detected.\n\
            The cornea's shape appears significantly elliptical.\n\
            \n\
            ------------------------\n";
        assert_eq!(text, expected);
    }

    // Tests the near-circular verdict text
    // Verified by swapping the interpretation details
    #[test]
    fn test_results_block_for_round_outline() {
        let report = report_for(Ellipse::new([10.0, 10.0], 41.0, 40.0, 0.0));
        let text = written(|out| write_report(out, &report));

        assert_eq!(report.classification, Classification::NoSignificantAstigmatism);
        assert!(text.contains("Axis Ratio (Major/Minor): 1.02\n"));
        assert!(text.contains("Interpretation: No Significant Astigmatism Indicated by Shape Ratio.\n"));
        assert!(text.contains("relatively spherical or mildly elliptical"));
    }

    // Tests a degenerate fit prints the warning before the block and shows inf
    // Verified by printing the warning after the block
    #[test]
    fn test_degenerate_report_warns_first() {
        let report = report_for(Ellipse::new([5.0, 5.0], 30.0, 0.0, 45.0));
        let text = written(|out| write_report(out, &report));

        assert!(text.starts_with(DEGENERATE_WARNING));
        assert!(text.contains("Axis Ratio (Major/Minor): inf\n"));
        assert!(text.contains("Possible Astigmatism Detected."));
    }

    // Tests the selection line shows only the file name
    // Verified by printing the full path
    #[test]
    fn test_selection_line() {
        let text = written(|out| write_selection(out, Path::new("/home/user/scans/eye.png")));
        assert_eq!(text, "Selected image: eye.png\n");
    }

    // Tests failures are printed as a single diagnostic line
    // Verified by printing the Debug form
    #[test]
    fn test_failure_line() {
        let text = written(|out| write_failure(out, &AnalysisError::NoSelection));
        assert_eq!(text, "No image selected. Exiting.\n");
    }
}
