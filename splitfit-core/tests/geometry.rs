//! Aspect-fit transform properties checked across many input shapes.

use splitfit_core::{DisplayFrame, build_view_transform, zoom_compensation};
use splitfit_utils::Point;

const IMAGE_SIZES: &[(u32, u32)] = &[
    (400, 300),
    (300, 400),
    (640, 480),
    (1080, 1920),
    (3024, 4032),
    (200, 200),
    (1, 1),
    (5000, 33),
];

const FRAME_SIZES: &[(f32, f32)] = &[
    (200.0, 200.0),
    (375.0, 667.0),
    (667.0, 375.0),
    (1.0, 1.0),
    (123.5, 789.25),
];

#[test]
fn corners_map_into_a_centered_rect_inside_the_frame() {
    for &(iw, ih) in IMAGE_SIZES {
        for &(fw, fh) in FRAME_SIZES {
            let frame = DisplayFrame::sized(fw, fh);
            let transform = build_view_transform((iw, ih), frame);

            let top_left = transform.apply(Point::ZERO);
            let bottom_right = transform.apply(Point::new(iw as f32, ih as f32));

            let eps = 1e-3;
            // Contained within the frame.
            assert!(top_left.x >= -eps && top_left.y >= -eps, "{iw}x{ih} in {fw}x{fh}");
            assert!(
                bottom_right.x <= fw + eps && bottom_right.y <= fh + eps,
                "{iw}x{ih} in {fw}x{fh}"
            );

            // Letterbox margins are symmetric.
            let left_margin = top_left.x;
            let right_margin = fw - bottom_right.x;
            let top_margin = top_left.y;
            let bottom_margin = fh - bottom_right.y;
            assert!((left_margin - right_margin).abs() < eps);
            assert!((top_margin - bottom_margin).abs() < eps);

            // The scaled image touches the frame on at least one axis.
            let touches_x = left_margin.abs() < eps;
            let touches_y = top_margin.abs() < eps;
            assert!(touches_x || touches_y, "{iw}x{ih} in {fw}x{fh}");
        }
    }
}

#[test]
fn image_center_round_trips_to_frame_center() {
    for &(iw, ih) in IMAGE_SIZES {
        for &(fw, fh) in FRAME_SIZES {
            let frame = DisplayFrame::sized(fw, fh);
            let transform = build_view_transform((iw, ih), frame);
            let mapped = transform.apply(Point::new(iw as f32 / 2.0, ih as f32 / 2.0));
            assert!((mapped.x - fw / 2.0).abs() < 1e-3);
            assert!((mapped.y - fh / 2.0).abs() < 1e-3);
        }
    }
}

#[test]
fn scale_matches_the_tighter_axis() {
    for &(iw, ih) in IMAGE_SIZES {
        for &(fw, fh) in FRAME_SIZES {
            let transform = build_view_transform((iw, ih), DisplayFrame::sized(fw, fh));
            let expected = (fw / iw as f32).min(fh / ih as f32);
            assert!((transform.scale - expected).abs() < 1e-5);
        }
    }
}

#[test]
fn compensation_cancels_magnification() {
    for step in 1..=24 {
        let zoom = step as f32 * 0.25;
        let product = zoom * zoom_compensation(zoom);
        assert!((product - 1.0).abs() < 1e-5);
    }
}
