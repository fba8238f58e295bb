//! Tests for error messages, source chaining and fallback renderings

#[cfg(test)]
mod tests {
    use corneafit::AnalysisError;
    use corneafit::io::error::{INSUFFICIENT_POINTS_TITLE, NO_CONTOURS_TITLE, invalid_parameter};
    use image::{DynamicImage, GrayImage, RgbImage};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests the dismissed-prompt message and its clean-exit status
    // Verified by changing the message punctuation
    #[test]
    fn test_no_selection_is_clean_exit() {
        let error = AnalysisError::NoSelection;

        assert_eq!(error.to_string(), "No image selected. Exiting.");
        assert!(error.is_clean_exit());
        assert!(error.fallback().is_none());
    }

    // Tests load failures name the offending path
    // Verified by omitting the path from the message
    #[test]
    fn test_image_load_message_contains_path() {
        let error = AnalysisError::ImageLoad {
            path: PathBuf::from("/data/eyes/left.jpg"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "missing",
            )),
        };

        let message = error.to_string();
        assert!(message.starts_with("Error: Could not load image from '/data/eyes/left.jpg'."));
        assert!(message.contains("valid image format"));
        assert!(error.source().is_some());
        assert!(!error.is_clean_exit());
    }

    // Tests a run without contours falls back to the original image
    // Verified by returning the edge title for NoContours
    #[test]
    fn test_no_contours_fallback_is_original() {
        let original = RgbImage::new(4, 3);
        let error = AnalysisError::NoContours { original };

        assert!(error.to_string().starts_with("No contours found in the image."));

        let fallback = error.fallback().expect("NoContours should carry a fallback");
        assert_eq!(fallback.title, NO_CONTOURS_TITLE);
        assert!(matches!(fallback.image, DynamicImage::ImageRgb8(_)));
        assert_eq!((fallback.image.width(), fallback.image.height()), (4, 3));
    }

    // Tests a too-small contour falls back to the edge map
    // Verified by returning the original image for this variant
    #[test]
    fn test_insufficient_points_fallback_is_edge_map() {
        let error = AnalysisError::InsufficientContourPoints {
            found: 4,
            required: 5,
            edges: GrayImage::new(6, 5),
        };

        assert!(error.to_string().starts_with(
            "Not enough points found in the largest contour to fit an ellipse."
        ));

        let fallback = error.fallback().expect("edge map fallback expected");
        assert_eq!(fallback.title, INSUFFICIENT_POINTS_TITLE);
        assert!(matches!(fallback.image, DynamicImage::ImageLuma8(_)));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("threshold", &0.5, &"must be at least 1.0");

        let message = error.to_string();
        assert!(message.contains("threshold"));
        assert!(message.contains("0.5"));
        assert!(message.contains("must be at least 1.0"));
        assert!(error.source().is_none());
    }

    // Tests export and file system failures chain their cause
    // Verified by returning None from source for FileSystem
    #[test]
    fn test_io_errors_chain_source() {
        let export = AnalysisError::ImageExport {
            path: PathBuf::from("/out/result.png"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "access denied",
            )),
        };
        assert!(export.to_string().contains("/out/result.png"));
        assert!(export.to_string().contains("access denied"));
        assert!(export.source().is_some());

        let fs_error = AnalysisError::FileSystem {
            path: PathBuf::from("<stdout>"),
            operation: "write report",
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        let message = fs_error.to_string();
        assert!(message.contains("write report on '<stdout>'"));
        assert!(message.contains("pipe closed"));
        assert!(fs_error.source().is_some());
    }
}
