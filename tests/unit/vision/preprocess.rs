//! Tests for grayscale conversion, smoothing and edge detection

#[cfg(test)]
mod tests {
    use crate::support::uniform_image;
    use corneafit::vision::preprocess::{
        EDGE_VALUE, detect_edges, edge_pixel_count, suppress_noise, to_grayscale,
    };
    use image::{DynamicImage, GrayImage, Luma};

    // Tests grayscale conversion keeps dimensions and maps gray to itself
    // Verified by converting through a single color channel
    #[test]
    fn test_to_grayscale() {
        let gray = to_grayscale(&DynamicImage::ImageRgb8(uniform_image(5, 4, [90, 90, 90])));

        assert_eq!(gray.dimensions(), (5, 4));
        assert!(gray.pixels().all(|p| p.0[0] == 90));
    }

    // Tests smoothing leaves a uniform image unchanged, borders included
    // Verified by zero-padding the borders
    #[test]
    fn test_suppress_noise_preserves_uniform_image() {
        let gray = GrayImage::from_pixel(12, 9, Luma([100]));
        assert_eq!(suppress_noise(&gray), gray);
    }

    // Tests an impulse spreads symmetrically over exactly three pixels each way
    // Verified by using a 5-tap kernel
    #[test]
    fn test_suppress_noise_impulse_response() {
        let mut gray = GrayImage::new(15, 15);
        gray.put_pixel(7, 7, Luma([255]));

        let blurred = suppress_noise(&gray);

        // 255 · (9/32)², up to rounding of the intermediate pass
        assert!((19..=20).contains(&blurred.get_pixel(7, 7).0[0]));
        assert_eq!(blurred.get_pixel(6, 7), blurred.get_pixel(8, 7));
        assert_eq!(blurred.get_pixel(7, 5), blurred.get_pixel(7, 9));
        assert!(blurred.get_pixel(10, 7).0[0] > 0);
        assert_eq!(blurred.get_pixel(11, 7).0[0], 0);
        assert_eq!(blurred.get_pixel(7, 3).0[0], 0);
    }

    // Tests a featureless image has no edges
    // Verified by lowering the high threshold to zero
    #[test]
    fn test_detect_edges_on_uniform_image() {
        let gray = GrayImage::from_pixel(32, 32, Luma([128]));
        let edges = detect_edges(&suppress_noise(&gray), 30.0, 150.0);

        assert_eq!(edge_pixel_count(&edges), 0);
    }

    // Tests a vertical step yields binary edges along the step only
    // Verified by returning the gradient magnitude instead of a binary map
    #[test]
    fn test_detect_edges_on_step() {
        let gray = GrayImage::from_fn(40, 40, |x, _| Luma([if x < 20 { 20 } else { 230 }]));
        let edges = detect_edges(&suppress_noise(&gray), 30.0, 150.0);

        assert!(edge_pixel_count(&edges) > 0);
        for (x, _, pixel) in edges.enumerate_pixels() {
            let value = pixel.0[0];
            assert!(value == 0 || value == EDGE_VALUE);
            if value == EDGE_VALUE {
                assert!((16..=23).contains(&x), "edge at column {x}");
            }
        }
    }
}
